use apod_colors::ColorError;
use thiserror::Error;

/// Errors that stop a run or a single day.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("'{field}' cannot be later than {latest} or earlier than {earliest} (the day APOD started), got {date}")]
    DateOutOfRange {
        field: &'static str,
        date: chrono::NaiveDate,
        earliest: chrono::NaiveDate,
        latest: chrono::NaiveDate,
    },

    #[error("Start date {start} is after end date {end}")]
    InvertedRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("APOD API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the run can continue with the next day after this error.
    ///
    /// Network hiccups and bad images only affect one day; configuration
    /// and date problems affect all of them.
    pub fn is_day_local(&self) -> bool {
        matches!(
            self,
            AppError::Api { .. } | AppError::Http(_) | AppError::Color(_) | AppError::Json(_)
        )
    }
}
