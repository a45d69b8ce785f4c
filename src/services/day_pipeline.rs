use apod_colors::{analyze, decode_image, ReferencePalette};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{aspect_ratio, ApodRecord, AppConfig, DayRecord, MediaType};
use crate::services::image_cache::DEFAULT_MAX_ENTRIES;
use crate::services::{ApodClient, FetchedImage, ImageCache, RecordStore};

/// What happened to one day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    Processed {
        date: NaiveDate,
        colors: Vec<String>,
        /// Reference matches, when classification is enabled
        filterable: Option<Vec<String>>,
        /// Written palette preview, when enabled
        composite: Option<PathBuf>,
    },
    Skipped {
        date: NaiveDate,
        reason: String,
    },
}

/// Pipeline that turns one APOD day into a record and a preview:
/// fetch → decode → extract → classify → save
pub struct DayPipeline {
    config: Arc<AppConfig>,
    client: ApodClient,
    cache: ImageCache,
    store: RecordStore,
    reference: Option<&'static ReferencePalette>,
}

impl DayPipeline {
    /// `reference` is the palette days are classified against; `None`
    /// disables classification.
    pub fn new(
        config: Arc<AppConfig>,
        client: ApodClient,
        reference: Option<&'static ReferencePalette>,
    ) -> Self {
        let cache = ImageCache::new(&config.temp_dir);
        let store = RecordStore::new(config.output_dir.clone());

        Self {
            config,
            client,
            cache,
            store,
            reference,
        }
    }

    pub fn client(&self) -> &ApodClient {
        &self.client
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Process a single day.
    ///
    /// Days without a usable picture are skipped, not failed.
    pub fn process_day(&self, apod: &ApodRecord) -> Result<DayOutcome, AppError> {
        let date = apod.date;

        if !apod.media_type.is_supported() {
            return Ok(skipped(date, format!("unsupported media type '{}'", apod.media_type)));
        }
        if apod.media_type == MediaType::Video && apod.thumbnail_url.is_none() {
            return Ok(skipped(date, "video without thumbnail".to_string()));
        }
        let Some(url) = apod.image_url(self.config.use_hdurl) else {
            return Ok(skipped(date, "no image url".to_string()));
        };

        let (fetched, cached) = match self.cache.get(url) {
            Some(image) => (image, true),
            None => (self.client.fetch_image(url)?, false),
        };

        // Only bytes that decode are kept, so a bad response is fetched again
        // on the next run.
        let image = match decode_image(&fetched.bytes) {
            Ok(image) => image,
            Err(e) => {
                if cached {
                    self.cache.remove(url);
                }
                return Err(e.into());
            }
        };
        if !cached {
            self.cache_image(url, &fetched);
        }
        let analysis = analyze(&image, &self.config.extract_options(), self.reference)?;

        let colors = analysis.dominant_hex();
        let filterable = analysis.classified_hex();

        tracing::info!(
            date = %date,
            colors = ?colors,
            filterable = ?filterable,
            "Extracted palette"
        );

        let (width, height) = (image.width(), image.height());
        let config = &self.config;
        let record = DayRecord {
            url: config.save_url.then(|| url.to_string()),
            media_type: config.save_media_type.then(|| apod.media_type.clone()),
            content_type: config
                .save_content_type
                .then(|| fetched.content_type.clone()),
            colors: config.save_color_palette.then(|| colors.clone()),
            filterable: filterable.clone(),
            width: config.save_img_width.then_some(width),
            height: config.save_img_height.then_some(height),
            ratio: if config.save_img_wh_ratio {
                aspect_ratio(width, height)
            } else {
                None
            },
            ..DayRecord::new(date)
        };
        self.store.save_record(&record)?;

        let composite = if config.generate_combined_image {
            let canvas = analysis.compose(&image, config.preview_layout())?;
            Some(self.store.save_composite(date, &canvas, config.jpeg_quality)?)
        } else {
            None
        };

        Ok(DayOutcome::Processed {
            date,
            colors,
            filterable,
            composite,
        })
    }

    fn cache_image(&self, url: &str, image: &FetchedImage) {
        if let Err(e) = self.cache.store(url, image) {
            tracing::warn!(url = %url, error = %e, "Failed to cache image");
            return;
        }
        if let Err(e) = self.cache.prune(DEFAULT_MAX_ENTRIES) {
            tracing::warn!(error = %e, "Failed to prune image cache");
        }
    }
}

fn skipped(date: NaiveDate, reason: String) -> DayOutcome {
    tracing::info!(date = %date, reason = %reason, "Skipping day");
    DayOutcome::Skipped { date, reason }
}
