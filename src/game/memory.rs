use super::result::{GameResult, elapsed_seconds};
use super::timer::Timer;
use super::{FeedbackDelays, GameError, GameSession, GameType, Outcome, SessionState};
use crate::date_provider::DateProvider;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

pub const SYMBOLS: [&str; 6] = ["😊", "⭐", "❤️", "☀️", "🌙", "☁️"];
pub const PAIRS: u32 = SYMBOLS.len() as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    /// Index into [`SYMBOLS`]; the two cards of a pair share it
    pub symbol: usize,
    pub face_up: bool,
    pub matched: bool,
}

impl Card {
    pub fn symbol_text(&self) -> &'static str {
        SYMBOLS[self.symbol]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryTransition {
    Compare,
    Finish,
}

pub fn score_for_errors(errors: u32) -> u32 {
    100u32.saturating_sub(errors.saturating_mul(10))
}

/// Twelve face-down cards, six pairs
pub struct MemorySession {
    clock: Arc<dyn DateProvider>,
    delays: FeedbackDelays,
    cards: Vec<Card>,
    face_up: Vec<usize>,
    state: SessionState,
    matches: u32,
    attempts: u32,
    errors: u32,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    last_pair_matched: Option<bool>,
    timer: Timer<MemoryTransition>,
}

impl MemorySession {
    pub fn new(clock: Arc<dyn DateProvider>, delays: FeedbackDelays, mut rng: StdRng) -> Self {
        let mut cards: Vec<Card> = (0..SYMBOLS.len() * 2)
            .map(|id| Card {
                id,
                symbol: id / 2,
                face_up: false,
                matched: false,
            })
            .collect();
        cards.shuffle(&mut rng);

        MemorySession {
            clock,
            delays,
            cards,
            face_up: Vec::with_capacity(2),
            state: SessionState::NotStarted,
            matches: 0,
            attempts: 0,
            errors: 0,
            started_at: None,
            completed_at: None,
            last_pair_matched: None,
            timer: Timer::new(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Pairs turned over so far, matched or not
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the most recently compared pair matched
    pub fn last_pair_matched(&self) -> Option<bool> {
        self.last_pair_matched
    }

    fn compare(&mut self, now: DateTime<Utc>) {
        let [first, second] = [self.face_up[0], self.face_up[1]];
        self.face_up.clear();

        if self.cards[first].symbol == self.cards[second].symbol {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.matches += 1;
            self.last_pair_matched = Some(true);
            debug!("memory pair {} matched ({}/{})", self.cards[first].symbol, self.matches, PAIRS);
        } else {
            self.cards[first].face_up = false;
            self.cards[second].face_up = false;
            self.errors += 1;
            self.last_pair_matched = Some(false);
        }

        if self.matches == PAIRS {
            self.state = SessionState::Correct;
            self.completed_at = Some(now);
            self.timer
                .schedule(now, self.delays.memory_finish, MemoryTransition::Finish);
        }
    }

    fn finish(&mut self, now: DateTime<Utc>) -> GameResult {
        self.state = SessionState::Ended;
        let completed_at = self.completed_at.unwrap_or(now);
        let started_at = self.started_at.unwrap_or(completed_at);
        let reaction = if self.errors < 3 {
            "Excelente memória"
        } else {
            "Precisa treinar mais"
        };
        let result = GameResult::new(
            GameType::Memory,
            score_for_errors(self.errors),
            self.errors,
            elapsed_seconds(started_at, completed_at),
            now,
            self.matches,
            vec![reaction.to_string()],
        );
        info!(
            "memory finished after {} attempts: score {}, errors {}",
            self.attempts, result.score, result.errors
        );
        result
    }
}

impl GameSession for MemorySession {
    fn game_type(&self) -> GameType {
        GameType::Memory
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn start(&mut self) -> Result<(), GameError> {
        if self.state != SessionState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        self.started_at = Some(self.clock.get_current_time());
        self.state = SessionState::InRound;
        Ok(())
    }

    fn select(&mut self, index: usize) -> Result<Outcome, GameError> {
        match self.state {
            SessionState::NotStarted => return Err(GameError::NotStarted),
            SessionState::Ended | SessionState::Abandoned => return Err(GameError::Finished),
            SessionState::Correct => return Err(GameError::InputLocked),
            _ => {}
        }
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(GameError::InvalidChoice { index, len })?;

        if self.face_up.len() == 2 || card.face_up || card.matched {
            return Ok(Outcome::Ignored);
        }
        card.face_up = true;
        self.face_up.push(index);

        if self.face_up.len() == 2 {
            self.attempts += 1;
            let now = self.clock.get_current_time();
            self.timer
                .schedule(now, self.delays.memory_compare, MemoryTransition::Compare);
        }
        Ok(Outcome::Accepted)
    }

    fn tick(&mut self) -> Option<GameResult> {
        let now = self.clock.get_current_time();
        match self.timer.poll(now)? {
            MemoryTransition::Compare => {
                self.compare(now);
                None
            }
            MemoryTransition::Finish => Some(self.finish(now)),
        }
    }

    fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.deadline()
    }

    fn abandon(&mut self) {
        self.timer.cancel();
        if !self.state.is_terminal() {
            debug!("memory abandoned with {} matches", self.matches);
            self.state = SessionState::Abandoned;
        }
    }

    /// Live score; the game only loses points, for mismatched pairs
    fn score(&self) -> u32 {
        score_for_errors(self.errors)
    }

    fn errors(&self) -> u32 {
        self.errors
    }
}
