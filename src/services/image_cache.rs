//! On-disk cache for downloaded APOD images.
//!
//! Images are keyed by a hash of their URL so reruns over the same days
//! do not download anything again.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::services::apod_client::FetchedImage;

const CONTENT_TYPE_SUFFIX: &str = "type";

/// Images kept on disk between runs
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// Compute the cache key for an image URL.
///
/// First 16 bytes of the SHA-256 of the URL, encoded as 32 hex characters.
pub fn compute_cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Cache stored under `{temp_dir}/images`.
    pub fn new(temp_dir: &Path) -> Self {
        Self {
            dir: temp_dir.join("images"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn paths(&self, url: &str) -> (PathBuf, PathBuf) {
        let key = compute_cache_key(url);
        let body = self.dir.join(&key);
        let content_type = self.dir.join(format!("{key}.{CONTENT_TYPE_SUFFIX}"));
        (body, content_type)
    }

    /// Get a cached image if it was stored before.
    pub fn get(&self, url: &str) -> Option<FetchedImage> {
        let (body_path, type_path) = self.paths(url);
        let bytes = std::fs::read(&body_path).ok()?;
        let content_type = std::fs::read_to_string(&type_path)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "application/octet-stream".to_string());

        tracing::debug!(url = %url, path = %body_path.display(), "Image cache hit");
        Some(FetchedImage {
            bytes,
            content_type,
        })
    }

    /// Store an image and its content type.
    pub fn store(&self, url: &str, image: &FetchedImage) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.dir)?;
        let (body_path, type_path) = self.paths(url);
        std::fs::write(&body_path, &image.bytes)?;
        std::fs::write(&type_path, &image.content_type)?;
        tracing::debug!(
            url = %url,
            path = %body_path.display(),
            size = image.bytes.len(),
            "Image cache: stored image"
        );
        Ok(())
    }

    /// Forget a cached image.
    pub fn remove(&self, url: &str) {
        let (body_path, type_path) = self.paths(url);
        for path in [body_path, type_path] {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove cached image");
                }
            }
        }
        tracing::debug!(url = %url, "Image cache: removed image");
    }

    /// Keep only the `max_entries` most recently written images.
    ///
    /// Returns the number of images removed.
    pub fn prune(&self, max_entries: usize) -> Result<usize, AppError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut bodies = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some() {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            bodies.push((modified, path));
        }

        if bodies.len() <= max_entries {
            return Ok(0);
        }

        // Newest first; the tail is evicted
        bodies.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        let evicted = bodies.split_off(max_entries);
        for (_, path) in &evicted {
            std::fs::remove_file(path)?;
            let _ = std::fs::remove_file(path.with_extension(CONTENT_TYPE_SUFFIX));
            tracing::debug!(path = %path.display(), "Image cache: evicted oldest image");
        }
        Ok(evicted.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_key_deterministic() {
        let key1 = compute_cache_key("https://apod.nasa.gov/apod/image/a.jpg");
        let key2 = compute_cache_key("https://apod.nasa.gov/apod/image/a.jpg");
        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 32);
    }

    #[test]
    fn test_cache_key_differs_by_url() {
        let key1 = compute_cache_key("https://apod.nasa.gov/apod/image/a.jpg");
        let key2 = compute_cache_key("https://apod.nasa.gov/apod/image/b.jpg");
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_miss_then_hit() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path());
        let url = "https://apod.nasa.gov/apod/image/a.jpg";

        assert!(cache.get(url).is_none());

        let image = FetchedImage {
            bytes: vec![1, 2, 3],
            content_type: "image/jpeg".to_string(),
        };
        cache.store(url, &image).unwrap();

        assert_eq!(cache.get(url), Some(image));
        assert!(cache.dir().ends_with("images"));
    }

    #[test]
    fn test_missing_type_file_defaults() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path());
        let url = "https://apod.nasa.gov/apod/image/c.jpg";

        std::fs::create_dir_all(cache.dir()).unwrap();
        std::fs::write(cache.dir().join(compute_cache_key(url)), [9u8]).unwrap();

        let image = cache.get(url).unwrap();
        assert_eq!(image.content_type, "application/octet-stream");
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path());
        let url = "https://apod.nasa.gov/apod/image/d.jpg";
        let image = FetchedImage {
            bytes: b"<html>busy</html>".to_vec(),
            content_type: "text/html".to_string(),
        };
        cache.store(url, &image).unwrap();

        cache.remove(url);
        assert!(cache.get(url).is_none());
        assert!(!cache.dir().join(format!("{}.type", compute_cache_key(url))).exists());

        // Removing again is harmless
        cache.remove(url);
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path());
        let image = FetchedImage {
            bytes: vec![1],
            content_type: "image/png".to_string(),
        };

        let urls: Vec<String> = (0..4).map(|i| format!("https://apod.example/{i}.png")).collect();
        for url in &urls {
            cache.store(url, &image).unwrap();
            // Distinct modification times
            std::thread::sleep(std::time::Duration::from_millis(20));
        }

        assert_eq!(cache.prune(2).unwrap(), 2);
        assert!(cache.get(&urls[0]).is_none());
        assert!(cache.get(&urls[1]).is_none());
        assert!(cache.get(&urls[2]).is_some());
        assert!(cache.get(&urls[3]).is_some());
        assert_eq!(std::fs::read_dir(cache.dir()).unwrap().count(), 4);

        assert_eq!(cache.prune(2).unwrap(), 0);
    }

    #[test]
    fn test_prune_without_dir() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(&dir.path().join("missing"));
        assert_eq!(cache.prune(1).unwrap(), 0);
    }
}
