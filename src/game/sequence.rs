use super::result::{GameResult, POINTS_PER_CORRECT, elapsed_seconds};
use super::timer::Timer;
use super::{FeedbackDelays, GameError, GameSession, GameType, Outcome, SessionState};
use crate::date_provider::DateProvider;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;

pub const SEQUENCE_SHAPES: [&str; 3] = ["quadrado", "círculo", "triângulo"];
pub const MAX_LEVEL: u32 = 5;
/// Wrong steps allowed before the session ends
pub const ERROR_BUDGET: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceTransition {
    EndPresentation,
    RestartLevel,
    Finish,
}

/// Repeat-the-pattern ladder: level `n` shows `n + 2` shapes
pub struct SequenceSession {
    clock: Arc<dyn DateProvider>,
    delays: FeedbackDelays,
    rng: StdRng,
    state: SessionState,
    level: u32,
    levels_completed: u32,
    sequence: Vec<usize>,
    entered: Vec<usize>,
    presented_at: Option<DateTime<Utc>>,
    score: u32,
    errors: u32,
    started_at: Option<DateTime<Utc>>,
    timer: Timer<SequenceTransition>,
}

impl SequenceSession {
    pub fn new(clock: Arc<dyn DateProvider>, delays: FeedbackDelays, rng: StdRng) -> Self {
        SequenceSession {
            clock,
            delays,
            rng,
            state: SessionState::NotStarted,
            level: 1,
            levels_completed: 0,
            sequence: Vec::new(),
            entered: Vec::new(),
            presented_at: None,
            score: 0,
            errors: 0,
            started_at: None,
            timer: Timer::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Steps entered so far for the current sequence
    pub fn progress(&self) -> (usize, usize) {
        (self.entered.len(), self.sequence.len())
    }

    /// Index of the step highlighted at this instant while the pattern is on screen
    pub fn highlight_step(&self) -> Option<usize> {
        if self.state != SessionState::Presenting {
            return None;
        }
        let presented_at = self.presented_at?;
        let step_ms = self.delays.sequence_step.num_milliseconds();
        if step_ms <= 0 {
            return None;
        }
        let elapsed = (self.clock.get_current_time() - presented_at).num_milliseconds();
        let step = usize::try_from(elapsed / step_ms).ok()?;
        (step < self.sequence.len()).then_some(step)
    }

    /// Shape highlighted at this instant
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight_step().map(|step| self.sequence[step])
    }

    /// When the highlight moves to the next step, while the pattern is on screen
    pub fn next_highlight_change(&self) -> Option<DateTime<Utc>> {
        if self.state != SessionState::Presenting {
            return None;
        }
        let presented_at = self.presented_at?;
        let step_ms = self.delays.sequence_step.num_milliseconds();
        if step_ms <= 0 {
            return None;
        }
        let elapsed = (self.clock.get_current_time() - presented_at).num_milliseconds();
        let next_step = elapsed.max(0) / step_ms + 1;
        Some(presented_at + Duration::milliseconds(next_step * step_ms))
    }

    fn present_level(&mut self, now: DateTime<Utc>) {
        let length = self.level as usize + 2;
        self.sequence = (0..length)
            .map(|_| self.rng.gen_range(0..SEQUENCE_SHAPES.len()))
            .collect();
        self.entered.clear();
        self.presented_at = Some(now);
        self.state = SessionState::Presenting;
        // one step per shape plus a trailing blank step
        let showing = self.delays.sequence_step * (length as i32 + 1);
        self.timer
            .schedule(now, showing, SequenceTransition::EndPresentation);
        debug!("sequence level {} presenting {} shapes", self.level, length);
    }

    fn finish(&mut self, now: DateTime<Utc>) -> GameResult {
        self.state = SessionState::Ended;
        let started_at = self.started_at.unwrap_or(now);
        let reaction = if self.levels_completed >= 3 {
            "Ótima capacidade de sequenciamento"
        } else {
            "Pode melhorar a atenção aos padrões"
        };
        let result = GameResult::new(
            GameType::Sequence,
            self.score,
            self.errors,
            elapsed_seconds(started_at, now),
            now,
            self.levels_completed,
            vec![reaction.to_string()],
        );
        info!(
            "sequence finished at level {}: score {}, errors {}",
            self.level, result.score, result.errors
        );
        result
    }
}

impl GameSession for SequenceSession {
    fn game_type(&self) -> GameType {
        GameType::Sequence
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn start(&mut self) -> Result<(), GameError> {
        if self.state != SessionState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        let now = self.clock.get_current_time();
        self.started_at = Some(now);
        self.present_level(now);
        Ok(())
    }

    fn select(&mut self, index: usize) -> Result<Outcome, GameError> {
        match self.state {
            SessionState::NotStarted => return Err(GameError::NotStarted),
            SessionState::Ended | SessionState::Abandoned => return Err(GameError::Finished),
            SessionState::Presenting | SessionState::Correct | SessionState::Incorrect => {
                return Err(GameError::InputLocked);
            }
            SessionState::InRound => {}
        }
        if index >= SEQUENCE_SHAPES.len() {
            return Err(GameError::InvalidChoice {
                index,
                len: SEQUENCE_SHAPES.len(),
            });
        }
        let now = self.clock.get_current_time();
        let step = self.entered.len();
        self.entered.push(index);

        if self.sequence.get(step) != Some(&index) {
            self.errors += 1;
            self.state = SessionState::Incorrect;
            let next = if self.errors >= ERROR_BUDGET {
                SequenceTransition::Finish
            } else {
                SequenceTransition::RestartLevel
            };
            self.timer.schedule(now, self.delays.sequence_resolve, next);
            debug!("sequence step {} wrong, errors {}", step + 1, self.errors);
            return Ok(Outcome::Incorrect);
        }

        if self.entered.len() < self.sequence.len() {
            return Ok(Outcome::Accepted);
        }

        self.score += self.level * POINTS_PER_CORRECT;
        self.levels_completed += 1;
        if self.level >= MAX_LEVEL {
            self.state = SessionState::Correct;
            self.timer
                .schedule(now, self.delays.sequence_resolve, SequenceTransition::Finish);
        } else {
            self.level += 1;
            self.present_level(now);
        }
        Ok(Outcome::Correct)
    }

    fn tick(&mut self) -> Option<GameResult> {
        let now = self.clock.get_current_time();
        match self.timer.poll(now)? {
            SequenceTransition::EndPresentation => {
                self.state = SessionState::InRound;
                None
            }
            SequenceTransition::RestartLevel => {
                self.present_level(now);
                None
            }
            SequenceTransition::Finish => Some(self.finish(now)),
        }
    }

    fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.deadline()
    }

    fn abandon(&mut self) {
        self.timer.cancel();
        if !self.state.is_terminal() {
            debug!("sequence abandoned at level {}", self.level);
            self.state = SessionState::Abandoned;
        }
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn errors(&self) -> u32 {
        self.errors
    }
}
