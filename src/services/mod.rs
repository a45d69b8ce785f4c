pub mod apod_client;
pub mod dates;
pub mod day_pipeline;
pub mod image_cache;
pub mod record_store;
pub mod runner;
pub mod temp_data;

pub use apod_client::{ApodClient, FetchedImage};
pub use day_pipeline::{DayOutcome, DayPipeline};
pub use image_cache::ImageCache;
pub use record_store::RecordStore;
pub use runner::{archive_year, run, RunSummary};
