//! School settings service
//!
//! The settings row is read on every report and dashboard request, so it is
//! cached for a short time and invalidated whenever it is updated.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::{info, warn};

use crate::errors::{AttendanceError, Result};
use crate::storage::{SchoolSettings, SeaOrmStorage, backend::SETTINGS_ROW_ID};

const SETTINGS_CACHE_TTL: Duration = Duration::from_secs(60);

pub struct SettingsService {
    storage: Arc<SeaOrmStorage>,
    cache: Cache<&'static str, SchoolSettings>,
    default_name: String,
}

impl SettingsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        let default_name = crate::config::get_config().school.default_name.clone();
        Self::with_default_name(storage, default_name)
    }

    pub fn with_default_name(storage: Arc<SeaOrmStorage>, default_name: String) -> Self {
        Self {
            storage,
            cache: Cache::builder()
                .time_to_live(SETTINGS_CACHE_TTL)
                .max_capacity(1)
                .build(),
            default_name,
        }
    }

    fn fallback(&self) -> SchoolSettings {
        SchoolSettings {
            id: SETTINGS_ROW_ID.to_string(),
            school_name: self.default_name.clone(),
        }
    }

    /// Current settings; never fails, falls back to the configured default name.
    pub async fn get_settings(&self) -> SchoolSettings {
        if let Some(cached) = self.cache.get(SETTINGS_ROW_ID) {
            return cached;
        }

        match self.storage.get_settings().await {
            Ok(Some(settings)) => {
                self.cache.insert(SETTINGS_ROW_ID, settings.clone());
                settings
            }
            Ok(None) => self.fallback(),
            Err(e) => {
                warn!("SettingsService: failed to load settings, using default: {}", e);
                self.fallback()
            }
        }
    }

    pub async fn school_name(&self) -> String {
        self.get_settings().await.school_name
    }

    pub async fn update_settings(&self, school_name: &str) -> Result<SchoolSettings> {
        let school_name = school_name.trim();
        if school_name.is_empty() {
            return Err(AttendanceError::validation("School name must not be empty"));
        }

        let settings = self.storage.upsert_settings(school_name).await?;
        self.cache.invalidate(SETTINGS_ROW_ID);
        info!("SettingsService: school name set to '{}'", settings.school_name);
        Ok(settings)
    }
}
