pub mod apod;
pub mod config;
pub mod day_record;

pub use apod::{ApodRecord, MediaType};
pub use config::{AppConfig, DateSelection};
pub use day_record::{aspect_ratio, DayRecord};
