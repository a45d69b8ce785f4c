use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MediaType;

/// Per-day output record.
///
/// Optional fields are left out of the JSON when the matching `save_*`
/// option is disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Dominant colors, most prominent first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,

    /// Reference palette entries matching `colors`, index for index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// width / height, rounded to 4 decimals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            url: None,
            media_type: None,
            content_type: None,
            colors: None,
            filterable: None,
            width: None,
            height: None,
            ratio: None,
        }
    }
}

/// Width-to-height ratio rounded to 4 decimals (`None` for zero height).
pub fn aspect_ratio(width: u32, height: u32) -> Option<f64> {
    if height == 0 {
        return None;
    }
    Some((width as f64 / height as f64 * 10_000.0).round() / 10_000.0)
}
