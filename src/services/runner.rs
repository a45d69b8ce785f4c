//! Whole-run orchestration: one date range, or one archived year.

use apod_colors::ReferencePalette;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

use crate::error::AppError;
use crate::models::AppConfig;
use crate::services::apod_client::parse_records;
use crate::services::dates::{day_count, validate_range, year_range};
use crate::services::record_store::archive_items;
use crate::services::temp_data::{load_temp_data, save_temp_data};
use crate::services::{ApodClient, DayOutcome, DayPipeline};

/// Counts logged at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Run the pipeline over the configured date range.
///
/// Errors that only affect one day are logged and counted; anything else
/// stops the run.
pub fn run(config: Arc<AppConfig>, client: ApodClient, today: NaiveDate) -> Result<RunSummary, AppError> {
    let started = Instant::now();
    let (start, end) = config.date_range(today)?;
    validate_range(start, end, today)?;
    config.extract_options().validate()?;

    tracing::info!(
        start = %start,
        end = %end,
        days = day_count(start, end),
        "Starting APOD run"
    );

    // Built once here and shared read-only by every day
    let reference = config
        .save_filterable_colors
        .then(ReferencePalette::shared);
    let pipeline = DayPipeline::new(config.clone(), client, reference);

    if let Some(reference) = reference {
        pipeline.store().save_chart(reference)?;
    }

    let items = load_items(&config, pipeline.client(), start, end)?;
    let records: Vec<_> = parse_records(items)
        .into_iter()
        .filter(|record| record.date >= start && record.date <= end)
        .collect();

    let mut summary = RunSummary::default();
    for record in &records {
        match pipeline.process_day(record) {
            Ok(DayOutcome::Processed { .. }) => summary.processed += 1,
            Ok(DayOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(e) if e.is_day_local() => {
                tracing::error!(date = %record.date, error = %e, "Failed to process day");
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "APOD run finished"
    );
    Ok(summary)
}

fn load_items(
    config: &AppConfig,
    client: &ApodClient,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<serde_json::Value>, AppError> {
    if config.use_temp_apod_data {
        match load_temp_data(&config.temp_dir)? {
            Some(items) => return Ok(items),
            None => tracing::warn!(
                temp_dir = %config.temp_dir.display(),
                "No temp APOD data found, fetching from the API"
            ),
        }
    }

    let items = client.fetch_range_raw(start, end)?;
    if let Err(e) = save_temp_data(&config.temp_dir, &items) {
        tracing::warn!(error = %e, "Failed to save temp APOD data");
    }
    Ok(items)
}

/// Store every raw day of `year` under the archive directory.
///
/// Returns the number of days written.
pub fn archive_year(
    config: &AppConfig,
    client: &ApodClient,
    year: i32,
    today: NaiveDate,
) -> Result<usize, AppError> {
    let (start, end) = year_range(year, today).ok_or_else(|| {
        AppError::InvalidDate(format!("{year} has no APOD days"))
    })?;

    let items = client.fetch_range_raw(start, end)?;
    let written = archive_items(&config.archive_dir, &items)?;
    tracing::info!(
        year,
        written,
        archive_dir = %config.archive_dir.display(),
        "Archived APOD year"
    );
    Ok(written)
}
