//! Apodify - color palettes for the Astronomy Picture of the Day
//!
//! Fetches APOD days, extracts each picture's dominant colors, matches them
//! to a fixed reference palette and writes per-day records and previews.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
