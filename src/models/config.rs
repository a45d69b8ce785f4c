use apod_colors::{ExtractOptions, PreviewLayout, DEFAULT_JPEG_QUALITY, DEFAULT_LIMIT, DEFAULT_TOLERANCE};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Application configuration loaded from config.yml
///
/// Every option is optional; missing options keep their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Single day to process (`today`, `yesterday`, `tomorrow` or
    /// `YYYY-MM-DD`). Overrides the range when valid.
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default = "default_day")]
    pub start_date: String,

    #[serde(default = "default_day")]
    pub end_date: String,

    /// Read the day list from the temp dir instead of calling the API
    #[serde(default)]
    pub use_temp_apod_data: bool,

    /// Prefer the high-resolution image URL when there is one
    #[serde(default)]
    pub use_hdurl: bool,

    #[serde(default = "default_true")]
    pub save_url: bool,

    #[serde(default = "default_true")]
    pub save_media_type: bool,

    #[serde(default)]
    pub save_content_type: bool,

    #[serde(default = "default_true")]
    pub save_color_palette: bool,

    /// Classify dominant colors against the reference palette
    #[serde(default = "default_true")]
    pub save_filterable_colors: bool,

    #[serde(default)]
    pub save_img_width: bool,

    #[serde(default)]
    pub save_img_height: bool,

    #[serde(default)]
    pub save_img_wh_ratio: bool,

    #[serde(default = "default_true")]
    pub generate_combined_image: bool,

    #[serde(default = "default_tolerance")]
    pub extcolors_tolerance: u32,

    #[serde(default = "default_limit")]
    pub extcolors_limit: usize,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Where `archive` stores raw day records
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_day() -> String {
    "today".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".output")
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from(".temp")
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from(".local_apod")
}

fn default_api_url() -> String {
    "https://api.nasa.gov/planetary/apod".to_string()
}

/// A day named relative to today or given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    Today,
    Yesterday,
    Tomorrow,
    Exact(NaiveDate),
}

impl DateSelection {
    /// Parse `today`, `yesterday`, `tomorrow` or `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "tomorrow" => Some(Self::Tomorrow),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .ok()
                .map(Self::Exact),
        }
    }

    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Yesterday => today.checked_sub_days(Days::new(1)).unwrap_or(today),
            Self::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or(today),
            Self::Exact(date) => date,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            tolerance = config.extcolors_tolerance,
            limit = config.extcolors_limit,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolve the inclusive date range to process.
    ///
    /// A valid `date` wins over `start_date`/`end_date`; an invalid one is
    /// reported and ignored.
    pub fn date_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
        if let Some(ref date) = self.date {
            match DateSelection::parse(date) {
                Some(selection) => {
                    let day = selection.resolve(today);
                    return Ok((day, day));
                }
                None => tracing::warn!(
                    date = %date,
                    "The 'date' configuration option is invalid; the date range will be used instead"
                ),
            }
        }

        let start = parse_date_field("start_date", &self.start_date, today)?;
        let end = parse_date_field("end_date", &self.end_date, today)?;
        Ok((start, end))
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new(self.extcolors_tolerance, self.extcolors_limit)
    }

    pub fn preview_layout(&self) -> PreviewLayout {
        PreviewLayout::new(self.save_filterable_colors)
    }
}

fn parse_date_field(field: &str, value: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    DateSelection::parse(value)
        .map(|selection| selection.resolve(today))
        .ok_or_else(|| AppError::InvalidDate(format!("{field}: {value:?}")))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            date: None,
            start_date: default_day(),
            end_date: default_day(),
            use_temp_apod_data: false,
            use_hdurl: false,
            save_url: true,
            save_media_type: true,
            save_content_type: false,
            save_color_palette: true,
            save_filterable_colors: true,
            save_img_width: false,
            save_img_height: false,
            save_img_wh_ratio: false,
            generate_combined_image: true,
            extcolors_tolerance: DEFAULT_TOLERANCE,
            extcolors_limit: DEFAULT_LIMIT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            output_dir: default_output_dir(),
            temp_dir: default_temp_dir(),
            archive_dir: default_archive_dir(),
            api_url: default_api_url(),
        }
    }
}
