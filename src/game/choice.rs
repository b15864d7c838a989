use super::candidates::{Round, generate_round};
use super::result::{GameResult, POINTS_PER_CORRECT, elapsed_seconds};
use super::timer::Timer;
use super::{FeedbackDelays, GameError, GameSession, GameType, Outcome, SessionState};
use crate::date_provider::DateProvider;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use std::sync::Arc;

pub const INCORRECT_FEEDBACK: &str = "Ops! Tente novamente. 🤔";

/// Something a choice game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stimulus {
    /// How the option is labelled on its button
    pub name: &'static str,
    /// How the prompt presents it (a colour name, a digit, an animal sound)
    pub cue: &'static str,
}

const fn stimulus(name: &'static str, cue: &'static str) -> Stimulus {
    Stimulus { name, cue }
}

const COLORS: [Stimulus; 6] = [
    stimulus("Vermelho", "Vermelho"),
    stimulus("Azul", "Azul"),
    stimulus("Verde", "Verde"),
    stimulus("Amarelo", "Amarelo"),
    stimulus("Rosa", "Rosa"),
    stimulus("Roxo", "Roxo"),
];

const SHAPES: [Stimulus; 6] = [
    stimulus("Quadrado", "Quadrado"),
    stimulus("Círculo", "Círculo"),
    stimulus("Triângulo", "Triângulo"),
    stimulus("Estrela", "Estrela"),
    stimulus("Coração", "Coração"),
    stimulus("Losango", "Losango"),
];

const NUMBERS: [Stimulus; 10] = [
    stimulus("1", "1"),
    stimulus("2", "2"),
    stimulus("3", "3"),
    stimulus("4", "4"),
    stimulus("5", "5"),
    stimulus("6", "6"),
    stimulus("7", "7"),
    stimulus("8", "8"),
    stimulus("9", "9"),
    stimulus("10", "10"),
];

const ANIMALS: [Stimulus; 6] = [
    stimulus("🐕 Cachorro", "🐕 \"Au au!\""),
    stimulus("🐱 Gato", "🐱 \"Miau!\""),
    stimulus("🐄 Vaca", "🐄 \"Muuu!\""),
    stimulus("🐦 Pássaro", "🐦 \"Piu piu!\""),
    stimulus("🦁 Leão", "🦁 \"Roar!\""),
    stimulus("🐷 Porco", "🐷 \"Oinc oinc!\""),
];

/// Static description of one "find the target" game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceGame {
    pub game_type: GameType,
    pub rounds: u32,
    pub candidate_count: usize,
    pub stimuli: &'static [Stimulus],
    pub prompt: &'static str,
    pub correct_feedback: &'static str,
    /// Reaction recorded when the child made fewer than 3 errors
    pub positive_reaction: &'static str,
    pub practice_reaction: &'static str,
}

impl ChoiceGame {
    pub const COLOR: ChoiceGame = ChoiceGame {
        game_type: GameType::Color,
        rounds: 10,
        candidate_count: 6,
        stimuli: &COLORS,
        prompt: "Clique na cor:",
        correct_feedback: "Correto! 🎉",
        positive_reaction: "Excelente reconhecimento de cores",
        practice_reaction: "Pode praticar mais o reconhecimento",
    };

    pub const SHAPE: ChoiceGame = ChoiceGame {
        game_type: GameType::Shape,
        rounds: 12,
        candidate_count: 4,
        stimuli: &SHAPES,
        prompt: "Clique na forma:",
        correct_feedback: "Perfeito! 🌟",
        positive_reaction: "Excelente reconhecimento de formas",
        practice_reaction: "Pode praticar mais o reconhecimento",
    };

    pub const NUMBER: ChoiceGame = ChoiceGame {
        game_type: GameType::Number,
        rounds: 10,
        candidate_count: 4,
        stimuli: &NUMBERS,
        prompt: "Clique no número:",
        correct_feedback: "Muito bem! 🎉",
        positive_reaction: "Excelente reconhecimento numérico",
        practice_reaction: "Pode praticar mais os números",
    };

    pub const SOUND: ChoiceGame = ChoiceGame {
        game_type: GameType::Sound,
        rounds: 10,
        candidate_count: 3,
        stimuli: &ANIMALS,
        prompt: "Ouça o som e clique no animal:",
        correct_feedback: "Correto! 🎵",
        positive_reaction: "Excelente reconhecimento auditivo",
        practice_reaction: "Pode praticar mais a associação de sons",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChoiceTransition {
    NextRound,
    ClearFeedback,
}

/// Fixed number of rounds; a miss is retried on the same target
pub struct ChoiceSession {
    game: ChoiceGame,
    clock: Arc<dyn DateProvider>,
    delays: FeedbackDelays,
    rng: StdRng,
    state: SessionState,
    round_number: u32,
    round: Option<Round>,
    score: u32,
    errors: u32,
    correct_answers: u32,
    started_at: Option<DateTime<Utc>>,
    feedback: Option<&'static str>,
    timer: Timer<ChoiceTransition>,
}

impl ChoiceSession {
    pub fn new(
        game: ChoiceGame,
        clock: Arc<dyn DateProvider>,
        delays: FeedbackDelays,
        rng: StdRng,
    ) -> Self {
        ChoiceSession {
            game,
            clock,
            delays,
            rng,
            state: SessionState::NotStarted,
            round_number: 0,
            round: None,
            score: 0,
            errors: 0,
            correct_answers: 0,
            started_at: None,
            feedback: None,
            timer: Timer::new(),
        }
    }

    pub fn game(&self) -> &ChoiceGame {
        &self.game
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// 1-based number of the round on screen
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn feedback(&self) -> Option<&'static str> {
        self.feedback
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn target_stimulus(&self) -> Option<Stimulus> {
        self.round.as_ref().map(|r| self.game.stimuli[r.target])
    }

    pub fn candidate_stimuli(&self) -> Vec<Stimulus> {
        self.round
            .as_ref()
            .map(|r| r.candidates.iter().map(|&c| self.game.stimuli[c]).collect())
            .unwrap_or_default()
    }

    fn next_round(&mut self) {
        self.round_number += 1;
        self.round = Some(generate_round(
            &mut self.rng,
            self.game.stimuli.len(),
            self.game.candidate_count,
        ));
        self.feedback = None;
        self.state = SessionState::InRound;
        debug!(
            "{}: round {}/{}",
            self.game.game_type, self.round_number, self.game.rounds
        );
    }

    fn finish(&mut self, now: DateTime<Utc>) -> GameResult {
        self.state = SessionState::Ended;
        self.feedback = None;
        let started_at = self.started_at.unwrap_or(now);
        let reaction = if self.errors < 3 {
            self.game.positive_reaction
        } else {
            self.game.practice_reaction
        };
        let result = GameResult::new(
            self.game.game_type,
            self.score,
            self.errors,
            elapsed_seconds(started_at, now),
            now,
            self.correct_answers,
            vec![reaction.to_string()],
        );
        info!(
            "{} finished: score {}, errors {}, {}s",
            self.game.game_type, result.score, result.errors, result.time_spent
        );
        result
    }
}

impl GameSession for ChoiceSession {
    fn game_type(&self) -> GameType {
        self.game.game_type
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn start(&mut self) -> Result<(), GameError> {
        if self.state != SessionState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        self.started_at = Some(self.clock.get_current_time());
        self.next_round();
        Ok(())
    }

    fn select(&mut self, index: usize) -> Result<Outcome, GameError> {
        match self.state {
            SessionState::NotStarted => return Err(GameError::NotStarted),
            SessionState::Ended | SessionState::Abandoned => return Err(GameError::Finished),
            SessionState::Correct => return Err(GameError::InputLocked),
            _ => {}
        }
        let round = self.round.as_ref().ok_or(GameError::NotStarted)?;
        let picked = *round
            .candidates
            .get(index)
            .ok_or(GameError::InvalidChoice {
                index,
                len: round.candidates.len(),
            })?;
        let now = self.clock.get_current_time();

        if picked == round.target {
            self.score += POINTS_PER_CORRECT;
            self.correct_answers += 1;
            self.state = SessionState::Correct;
            self.feedback = Some(self.game.correct_feedback);
            self.timer
                .schedule(now, self.delays.correct, ChoiceTransition::NextRound);
            Ok(Outcome::Correct)
        } else {
            self.errors += 1;
            self.state = SessionState::Incorrect;
            self.feedback = Some(INCORRECT_FEEDBACK);
            self.timer
                .schedule(now, self.delays.incorrect, ChoiceTransition::ClearFeedback);
            Ok(Outcome::Incorrect)
        }
    }

    fn tick(&mut self) -> Option<GameResult> {
        let now = self.clock.get_current_time();
        match self.timer.poll(now)? {
            ChoiceTransition::NextRound => {
                if self.round_number >= self.game.rounds {
                    return Some(self.finish(now));
                }
                self.next_round();
                None
            }
            ChoiceTransition::ClearFeedback => {
                if self.state == SessionState::Incorrect {
                    self.state = SessionState::InRound;
                    self.feedback = None;
                }
                None
            }
        }
    }

    fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.deadline()
    }

    fn abandon(&mut self) {
        self.timer.cancel();
        if !self.state.is_terminal() {
            debug!("{} abandoned in round {}", self.game.game_type, self.round_number);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_provider::ManualDateProvider;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;

    fn clock() -> Arc<ManualDateProvider> {
        Arc::new(ManualDateProvider::new(
            Utc.with_ymd_and_hms(2025, 6, 20, 10, 0, 0).unwrap(),
        ))
    }

    fn session(game: ChoiceGame, clock: Arc<ManualDateProvider>, delays: FeedbackDelays) -> ChoiceSession {
        ChoiceSession::new(game, clock, delays, StdRng::seed_from_u64(3))
    }

    fn wrong_position(session: &ChoiceSession) -> usize {
        let round = session.round().unwrap();
        (round.target_position() + 1) % round.candidates.len()
    }

    /// Plays every round, missing `misses_per_round` times before answering
    fn play_out(session: &mut ChoiceSession, misses_per_round: u32) -> Vec<GameResult> {
        let mut results = Vec::new();
        session.start().unwrap();
        while !session.state().is_terminal() {
            for _ in 0..misses_per_round {
                let wrong = wrong_position(session);
                assert_eq!(session.select(wrong).unwrap(), Outcome::Incorrect);
            }
            let right = session.round().unwrap().target_position();
            assert_eq!(session.select(right).unwrap(), Outcome::Correct);
            results.extend(session.tick());
        }
        results
    }

    #[test]
    fn test_perfect_color_game() {
        let clock = clock();
        let mut session = session(ChoiceGame::COLOR, clock, FeedbackDelays::immediate());
        let results = play_out(&mut session, 0);

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.game_type, GameType::Color);
        assert_eq!(result.score, 100);
        assert_eq!(result.errors, 0);
        assert_eq!(result.details.correct_answers, 10);
        assert_eq!(result.details.reactions, vec!["Excelente reconhecimento de cores"]);
    }

    #[test]
    fn test_round_counts_per_game() {
        for (game, rounds) in [
            (ChoiceGame::COLOR, 10),
            (ChoiceGame::SHAPE, 12),
            (ChoiceGame::NUMBER, 10),
            (ChoiceGame::SOUND, 10),
        ] {
            let mut session = session(game, clock(), FeedbackDelays::immediate());
            let results = play_out(&mut session, 0);
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].details.correct_answers, rounds);
            assert_eq!(results[0].score, rounds * 10);
        }
    }

    #[test]
    fn test_misses_count_as_errors_and_retry_same_target() {
        let mut session = session(ChoiceGame::NUMBER, clock(), FeedbackDelays::immediate());
        session.start().unwrap();
        let before = session.round().unwrap().clone();

        let wrong = wrong_position(&session);
        assert_eq!(session.select(wrong).unwrap(), Outcome::Incorrect);
        assert_eq!(session.tick(), None);

        assert_eq!(session.state(), SessionState::InRound);
        assert_eq!(session.round(), Some(&before));
        assert_eq!(session.round_number(), 1);
        assert_eq!(session.errors(), 1);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_score_matches_correct_answers_and_errors_match_incorrect() {
        let mut session = session(ChoiceGame::SOUND, clock(), FeedbackDelays::immediate());
        let results = play_out(&mut session, 1);
        let result = &results[0];

        assert_eq!(result.score, 10 * result.details.correct_answers);
        assert_eq!(result.errors, result.details.incorrect_answers);
        assert_eq!(result.errors, 10);
        assert_eq!(
            result.details.reactions,
            vec!["Pode praticar mais a associação de sons"]
        );
    }

    #[test]
    fn test_input_locked_during_correct_feedback() {
        let clock = clock();
        let mut session = session(ChoiceGame::SHAPE, clock.clone(), FeedbackDelays::default());
        session.start().unwrap();
        let right = session.round().unwrap().target_position();
        session.select(right).unwrap();

        assert_eq!(session.select(right), Err(GameError::InputLocked));
        assert_eq!(session.score(), 10);

        clock.advance(Duration::milliseconds(1499));
        assert_eq!(session.tick(), None);
        assert_eq!(session.round_number(), 1);

        clock.advance(Duration::milliseconds(1));
        assert_eq!(session.tick(), None);
        assert_eq!(session.round_number(), 2);
        assert_eq!(session.state(), SessionState::InRound);
    }

    #[test]
    fn test_incorrect_feedback_clears_after_delay() {
        let clock = clock();
        let mut session = session(ChoiceGame::COLOR, clock.clone(), FeedbackDelays::default());
        session.start().unwrap();
        let wrong = wrong_position(&session);
        session.select(wrong).unwrap();
        assert_eq!(session.feedback(), Some(INCORRECT_FEEDBACK));

        clock.advance(Duration::milliseconds(2000));
        session.tick();
        assert_eq!(session.feedback(), None);
        assert_eq!(session.state(), SessionState::InRound);
    }

    #[test]
    fn test_time_spent_measured_from_start() {
        let clock = clock();
        let mut session = session(ChoiceGame::NUMBER, clock.clone(), FeedbackDelays::immediate());
        session.start().unwrap();
        let mut result = None;
        while result.is_none() {
            clock.advance(Duration::milliseconds(4200));
            let right = session.round().unwrap().target_position();
            session.select(right).unwrap();
            result = session.tick();
        }
        assert_eq!(result.unwrap().time_spent, 42);
    }

    #[test]
    fn test_abandoned_session_never_emits() {
        let clock = clock();
        let mut session = session(ChoiceGame::COLOR, clock.clone(), FeedbackDelays::default());
        session.start().unwrap();
        for _ in 0..9 {
            let right = session.round().unwrap().target_position();
            session.select(right).unwrap();
            clock.advance(Duration::seconds(2));
            assert_eq!(session.tick(), None);
        }
        let right = session.round().unwrap().target_position();
        session.select(right).unwrap();
        session.abandon();

        clock.advance(Duration::seconds(10));
        assert_eq!(session.tick(), None);
        assert_eq!(session.state(), SessionState::Abandoned);
        assert_eq!(session.select(0), Err(GameError::Finished));
    }

    #[test]
    fn test_select_before_start_and_out_of_range() {
        let mut session = session(ChoiceGame::SOUND, clock(), FeedbackDelays::immediate());
        assert_eq!(session.select(0), Err(GameError::NotStarted));
        session.start().unwrap();
        assert_eq!(session.start(), Err(GameError::AlreadyStarted));
        assert_eq!(
            session.select(3),
            Err(GameError::InvalidChoice { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_no_result_after_end() {
        let mut session = session(ChoiceGame::COLOR, clock(), FeedbackDelays::immediate());
        let results = play_out(&mut session, 0);
        assert_eq!(results.len(), 1);
        assert_eq!(session.tick(), None);
        assert_eq!(session.select(0), Err(GameError::Finished));
    }
}
