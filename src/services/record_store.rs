//! Output layout on disk.
//!
//! ```text
//! {output_dir}/data/YYYY/MM/DD.json       per-day record
//! {output_dir}/images/YYYY-MM-DD.jpg      palette preview
//! {output_dir}/filter_colors_preview.png  reference palette chart
//! ```

use apod_colors::{save_jpeg, ReferencePalette};
use chrono::NaiveDate;
use image::RgbImage;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::DayRecord;

const CHART_FILE: &str = "filter_colors_preview.png";

/// `{root}/data/YYYY/MM/DD.json`
pub fn dated_json_path(root: &Path, date: NaiveDate) -> PathBuf {
    root.join("data")
        .join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(format!("{}.json", date.format("%d")))
}

/// Serialize `value` as JSON indented with 4 spaces, creating parent
/// directories as needed.
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value.serialize(&mut serializer)?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

pub struct RecordStore {
    output_dir: PathBuf,
}

impl RecordStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn record_path(&self, date: NaiveDate) -> PathBuf {
        dated_json_path(&self.output_dir, date)
    }

    pub fn composite_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir
            .join("images")
            .join(format!("{}.jpg", date.format("%Y-%m-%d")))
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE)
    }

    pub fn save_record(&self, record: &DayRecord) -> Result<PathBuf, AppError> {
        let path = self.record_path(record.date);
        write_pretty_json(&path, record)?;
        tracing::debug!(date = %record.date, path = %path.display(), "Saved day record");
        Ok(path)
    }

    pub fn save_composite(
        &self,
        date: NaiveDate,
        canvas: &RgbImage,
        quality: u8,
    ) -> Result<PathBuf, AppError> {
        let path = self.composite_path(date);
        save_jpeg(canvas, &path, quality)?;
        tracing::debug!(date = %date, path = %path.display(), "Saved palette preview");
        Ok(path)
    }

    pub fn save_chart(&self, reference: &ReferencePalette) -> Result<PathBuf, AppError> {
        let path = self.chart_path();
        reference.save_preview(&path)?;
        tracing::info!(path = %path.display(), "Saved reference palette chart");
        Ok(path)
    }
}

/// Store raw API items under `{archive_dir}/data/YYYY/MM/DD.json`.
///
/// Items without a parseable `date` are skipped with a warning. Returns the
/// number of items written.
pub fn archive_items(archive_dir: &Path, items: &[serde_json::Value]) -> Result<usize, AppError> {
    let mut written = 0;
    for item in items {
        let date = item
            .get("date")
            .and_then(|d| d.as_str())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let Some(date) = date else {
            tracing::warn!("Skipping archive item without a valid date");
            continue;
        };

        write_pretty_json(&dated_json_path(archive_dir, date), item)?;
        written += 1;
    }
    Ok(written)
}
