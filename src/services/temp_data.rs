//! Local copy of the last API response.
//!
//! Lets repeated runs over the same range skip the API entirely.

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::services::record_store::write_pretty_json;

const TEMP_DATA_FILE: &str = "apod_data.json";

pub fn temp_data_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join(TEMP_DATA_FILE)
}

/// Write the raw API items to `{temp_dir}/apod_data.json`.
pub fn save_temp_data(temp_dir: &Path, items: &[serde_json::Value]) -> Result<PathBuf, AppError> {
    let path = temp_data_path(temp_dir);
    write_pretty_json(&path, &items)?;
    tracing::debug!(path = %path.display(), count = items.len(), "Saved temp APOD data");
    Ok(path)
}

/// Read the items saved by [`save_temp_data`].
///
/// Returns `Ok(None)` when there is no saved file.
pub fn load_temp_data(temp_dir: &Path) -> Result<Option<Vec<serde_json::Value>>, AppError> {
    let path = temp_data_path(temp_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let items: Vec<serde_json::Value> = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), count = items.len(), "Using temp APOD data");
    Ok(Some(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_temp_data() {
        let dir = TempDir::new().unwrap();
        assert!(load_temp_data(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let items = vec![serde_json::json!({"date": "2024-01-01", "media_type": "image"})];

        let path = save_temp_data(&dir.path().join("nested"), &items).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n    {\n        \"date\""));

        let loaded = load_temp_data(&dir.path().join("nested")).unwrap().unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_corrupt_temp_data() {
        let dir = TempDir::new().unwrap();
        std::fs::write(temp_data_path(dir.path()), "[{").unwrap();
        assert!(matches!(load_temp_data(dir.path()), Err(AppError::Json(_))));
    }
}
