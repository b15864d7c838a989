use super::GameType;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points awarded per correct answer in the round-based games
pub const POINTS_PER_CORRECT: u32 = 10;

/// Outcome of one completed session; never modified after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub id: Uuid,
    pub game_type: GameType,
    pub score: u32,
    pub errors: u32,
    /// Whole seconds from start to completion
    pub time_spent: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub details: ResultDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetails {
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// Skills exercised by the game
    pub patterns: Vec<String>,
    pub reactions: Vec<String>,
}

impl GameResult {
    pub fn new(
        game_type: GameType,
        score: u32,
        errors: u32,
        time_spent: u32,
        date: DateTime<Utc>,
        correct_answers: u32,
        reactions: Vec<String>,
    ) -> Self {
        GameResult {
            id: Uuid::new_v4(),
            game_type,
            score,
            errors,
            time_spent,
            // stored as epoch milliseconds
            date: date.trunc_subsecs(3),
            details: ResultDetails {
                correct_answers,
                incorrect_answers: errors,
                patterns: game_type
                    .skills()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                reactions,
            },
        }
    }
}

/// Rounded whole seconds between two instants, never negative
pub fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let millis = (end - start).num_milliseconds().max(0);
    ((millis + 500) / 1000) as u32
}

/// Headline shown on the post-game screen
pub fn performance_message(score: u32, errors: u32) -> &'static str {
    if score >= 90 && errors <= 1 {
        "🌟 Excelente trabalho!"
    } else if score >= 70 && errors <= 3 {
        "👍 Muito bem!"
    } else if score >= 50 {
        "😊 Bom trabalho!"
    } else {
        "💪 Continue praticando!"
    }
}
