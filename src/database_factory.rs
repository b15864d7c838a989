use crate::database::Database;
use crate::date_provider::{DateProvider, ManualDateProvider, OverrideDateProvider, SystemDateProvider};
use crate::error::StorageError;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

pub const DEFAULT_DB_PATH: &str = "mindkids.db";

/// Database configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Whether to use in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
    /// Clock used for profile and result timestamps
    pub date_provider: Arc<dyn DateProvider>,
}

impl DatabaseConfig {
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("is_test_mode", &self.is_test_mode)
            .field("custom_path", &self.custom_path)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct DatabaseConfigBuilder {
    is_test_mode: bool,
    custom_path: Option<String>,
    date_provider: Option<Arc<dyn DateProvider>>,
}

impl DatabaseConfigBuilder {
    pub fn test_mode(mut self) -> Self {
        self.is_test_mode = true;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.custom_path = Some(path.into());
        self
    }

    /// Keeps the wall clock's time of day but pins the calendar date
    pub fn override_date(mut self, date: NaiveDate) -> Self {
        self.date_provider = Some(Arc::new(OverrideDateProvider::new(date)));
        self
    }

    /// Frozen clock at midnight UTC of the given day
    pub fn date_ymd(mut self, year: i32, month: u32, day: u32) -> Self {
        let start = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        self.date_provider = Some(Arc::new(ManualDateProvider::new(start)));
        self
    }

    pub fn date_provider(mut self, provider: Arc<dyn DateProvider>) -> Self {
        self.date_provider = Some(provider);
        self
    }

    pub fn build(self) -> DatabaseConfig {
        DatabaseConfig {
            is_test_mode: self.is_test_mode,
            custom_path: self.custom_path,
            date_provider: self
                .date_provider
                .unwrap_or_else(|| Arc::new(SystemDateProvider)),
        }
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    pub fn create(config: DatabaseConfig) -> Result<Database, StorageError> {
        let path = config.get_path();
        Database::with_date_provider(path, config.date_provider.clone())
    }
}
