use crate::database::Database;
use crate::error::StoreError;
use crate::game::GameResult;
use crate::profile::ChildProfile;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

/// Durable list of child profiles, kept in memory and mirrored to the
/// `childProfiles` record
///
/// Every mutation builds the next collection, writes it whole, and only then
/// replaces the in-memory copy.
pub struct ProfileStore {
    db: Arc<Database>,
    profiles: Vec<ChildProfile>,
}

impl ProfileStore {
    pub fn load(db: Arc<Database>) -> Result<Self, StoreError> {
        let profiles = db.load_profiles()?;
        debug!("Loaded {} profiles", profiles.len());
        Ok(ProfileStore { db, profiles })
    }

    /// Creation order
    pub fn list_profiles(&self) -> &[ChildProfile] {
        &self.profiles
    }

    pub fn get_profile(&self, id: Uuid) -> Option<&ChildProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// First profile whose name matches, ignoring case and surrounding spaces
    pub fn find_by_name(&self, name: &str) -> Option<&ChildProfile> {
        let wanted = name.trim().to_lowercase();
        self.profiles
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn create_profile(&mut self, name: &str) -> Result<&ChildProfile, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let profile = ChildProfile::new(name, self.db.get_current_time());
        let mut next = self.profiles.clone();
        next.push(profile);
        self.commit(next)?;

        let created = &self.profiles[self.profiles.len() - 1];
        info!("Created profile '{}' ({})", created.name, created.id);
        Ok(created)
    }

    pub fn append_result(&mut self, profile_id: Uuid, result: GameResult) -> Result<(), StoreError> {
        let mut next = self.profiles.clone();
        let profile = next
            .iter_mut()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| StoreError::ProfileNotFound(profile_id.to_string()))?;
        info!(
            "Recording {} for '{}': score {}, errors {}",
            result.game_type, profile.name, result.score, result.errors
        );
        profile.game_results.push(result);
        self.commit(next)
    }

    fn commit(&mut self, next: Vec<ChildProfile>) -> Result<(), StoreError> {
        self.db.save_profiles(&next)?;
        self.profiles = next;
        Ok(())
    }
}
