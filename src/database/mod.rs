pub mod connection;
pub mod records;

use crate::auth::User;
use crate::date_provider::{DateProvider, SystemDateProvider};
use crate::error::StorageError;
use crate::profile::ChildProfile;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub use records::RecordsRepository;

/// Record holding the array of child profiles
pub const PROFILES_KEY: &str = "childProfiles";
/// Record holding the signed-in user, or `null`
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Set once the educational disclaimer has been acknowledged
pub const DISCLAIMER_KEY: &str = "hasSeenDisclaimer";

/// Main Database struct providing access to the durable records
pub struct Database {
    pub conn: Connection,
    date_provider: Arc<dyn DateProvider>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        Self::init(db_path, Arc::new(SystemDateProvider))
    }

    pub fn with_date_provider(
        db_path: &str,
        date_provider: Arc<dyn DateProvider>,
    ) -> Result<Self, StorageError> {
        Self::init(db_path, date_provider)
    }

    fn init(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self, StorageError> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database {
            conn,
            date_provider,
        })
    }

    pub fn get_current_time(&self) -> DateTime<Utc> {
        self.date_provider.get_current_time()
    }

    pub fn date_provider(&self) -> Arc<dyn DateProvider> {
        self.date_provider.clone()
    }

    // ===== Generic record access =====

    pub fn load_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let repo = RecordsRepository::new(&self.conn);
        match repo.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Json {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn save_record<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        let repo = RecordsRepository::new(&self.conn);
        repo.put(key, &raw)?;
        debug!("Wrote record '{}' ({} bytes)", key, raw.len());
        Ok(())
    }

    pub fn count_records(&self) -> Result<i64, StorageError> {
        Ok(RecordsRepository::new(&self.conn).count()?)
    }

    // ===== Profiles record =====

    pub fn load_profiles(&self) -> Result<Vec<ChildProfile>, StorageError> {
        Ok(self.load_record(PROFILES_KEY)?.unwrap_or_default())
    }

    pub fn save_profiles(&self, profiles: &[ChildProfile]) -> Result<(), StorageError> {
        self.save_record(PROFILES_KEY, profiles)
    }

    // ===== Current user record =====

    pub fn load_current_user(&self) -> Result<Option<User>, StorageError> {
        Ok(self.load_record::<Option<User>>(CURRENT_USER_KEY)?.flatten())
    }

    pub fn save_current_user(&self, user: Option<&User>) -> Result<(), StorageError> {
        self.save_record(CURRENT_USER_KEY, &user)
    }

    // ===== Disclaimer flag =====

    pub fn has_seen_disclaimer(&self) -> Result<bool, StorageError> {
        Ok(self.load_record(DISCLAIMER_KEY)?.unwrap_or(false))
    }

    pub fn mark_disclaimer_seen(&self) -> Result<(), StorageError> {
        self.save_record(DISCLAIMER_KEY, &true)
    }
}
