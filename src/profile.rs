use crate::game::GameResult;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named child record accumulating game results over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    pub id: Uuid,
    pub name: String,
    /// Never collected by the current flows; always 0
    pub age: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Append-only, oldest first
    pub game_results: Vec<GameResult>,
}

impl ChildProfile {
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Self {
        ChildProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age: 0,
            created_at: created_at.trunc_subsecs(3),
            game_results: Vec::new(),
        }
    }

    /// Upper-cased first letter, used as the avatar in listings
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
