//! The six mini-games and the session contract they share
//!
//! Every game is a small state machine driven by two inputs: `select` (the
//! learner picked something) and `tick` (time passed). Feedback pauses are
//! scheduled transitions on a [`Timer`], never sleeps, and the only way a
//! [`GameResult`] leaves a session is the `tick` that reaches `Ended`.

pub mod candidates;
pub mod choice;
pub mod memory;
pub mod result;
pub mod sequence;
pub mod timer;

use crate::date_provider::DateProvider;
use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use candidates::{Round, generate_round};
pub use choice::{ChoiceGame, ChoiceSession};
pub use memory::{Card, MemorySession};
pub use result::{GameResult, ResultDetails, performance_message};
pub use sequence::SequenceSession;
pub use timer::Timer;

/// The closed set of mini-games; serialized as the label stored with each result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameType {
    #[serde(rename = "Jogo da Memória")]
    Memory,
    #[serde(rename = "Jogo de Sequências")]
    Sequence,
    #[serde(rename = "Jogo das Cores")]
    Color,
    #[serde(rename = "Jogo das Formas")]
    Shape,
    #[serde(rename = "Jogo dos Números")]
    Number,
    #[serde(rename = "Jogo dos Sons")]
    Sound,
}

impl GameType {
    pub const ALL: [GameType; 6] = [
        GameType::Memory,
        GameType::Sequence,
        GameType::Color,
        GameType::Shape,
        GameType::Number,
        GameType::Sound,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GameType::Memory => "Jogo da Memória",
            GameType::Sequence => "Jogo de Sequências",
            GameType::Color => "Jogo das Cores",
            GameType::Shape => "Jogo das Formas",
            GameType::Number => "Jogo dos Números",
            GameType::Sound => "Jogo dos Sons",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            GameType::Memory => "memory",
            GameType::Sequence => "pattern",
            GameType::Color => "color",
            GameType::Shape => "shape",
            GameType::Number => "number",
            GameType::Sound => "sound",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        GameType::ALL
            .into_iter()
            .find(|game| game.slug() == s || game.label() == s)
    }

    /// Skill labels recorded in every result of this game
    pub fn skills(&self) -> [&'static str; 2] {
        match self {
            GameType::Memory => ["Memória visual", "Concentração"],
            GameType::Sequence => ["Memória sequencial", "Reconhecimento de padrões"],
            GameType::Color => ["Reconhecimento de cores", "Coordenação visual"],
            GameType::Shape => ["Reconhecimento de formas", "Coordenação visual-motora"],
            GameType::Number => ["Reconhecimento numérico", "Coordenação visual"],
            GameType::Sound => ["Reconhecimento auditivo", "Associação som-imagem"],
        }
    }

    pub fn catalogue_entry(&self) -> CatalogueEntry {
        match self {
            GameType::Memory => CatalogueEntry {
                title: "🧠 Jogo da Memória",
                description: "Desenvolve memória visual e concentração através de pares de formas coloridas. Observa padrões de atenção e capacidade de retenção.",
                difficulty: Difficulty::Easy,
            },
            GameType::Sequence => CatalogueEntry {
                title: "⚡ Jogo de Sequências",
                description: "Treina memória sequencial e reconhecimento de padrões. Avalia capacidade de seguir instruções e processar informações ordenadas.",
                difficulty: Difficulty::Medium,
            },
            GameType::Color => CatalogueEntry {
                title: "🎨 Jogo das Cores",
                description: "Aprimora reconhecimento visual e coordenação. Observa velocidade de processamento e precisão na identificação de estímulos.",
                difficulty: Difficulty::Easy,
            },
            GameType::Shape => CatalogueEntry {
                title: "🔷 Jogo das Formas",
                description: "Desenvolve reconhecimento de formas geométricas e coordenação visual-motora. Avalia capacidade de diferenciação visual.",
                difficulty: Difficulty::Easy,
            },
            GameType::Number => CatalogueEntry {
                title: "🔢 Jogo dos Números",
                description: "Estimula reconhecimento numérico e habilidades matemáticas básicas. Observa capacidade de associação e memória numérica.",
                difficulty: Difficulty::Medium,
            },
            GameType::Sound => CatalogueEntry {
                title: "🔊 Jogo dos Sons",
                description: "Desenvolve reconhecimento auditivo e associação som-imagem. Avalia processamento auditivo e capacidade de correlação.",
                difficulty: Difficulty::Medium,
            },
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Médio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    /// Sequence game only: the pattern is being shown and input is locked
    Presenting,
    InRound,
    Correct,
    Incorrect,
    Ended,
    Abandoned,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Ended | SessionState::Abandoned)
    }
}

/// Immediate answer to a `select`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Accepted but not yet judged: a sequence step or a revealed card
    Accepted,
    /// Input had no effect (card already face up, two cards already showing)
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game has not started yet")]
    NotStarted,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game is over")]
    Finished,
    #[error("input is locked while feedback is showing")]
    InputLocked,
    #[error("choice {index} is out of range (0..{len})")]
    InvalidChoice { index: usize, len: usize },
}

/// Presentation pauses between transitions
///
/// They carry no meaning for scoring; [`FeedbackDelays::immediate`] collapses
/// them all to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackDelays {
    pub correct: Duration,
    pub incorrect: Duration,
    pub sequence_step: Duration,
    pub sequence_resolve: Duration,
    pub memory_compare: Duration,
    pub memory_finish: Duration,
}

impl Default for FeedbackDelays {
    fn default() -> Self {
        FeedbackDelays {
            correct: Duration::milliseconds(1500),
            incorrect: Duration::milliseconds(2000),
            sequence_step: Duration::milliseconds(800),
            sequence_resolve: Duration::milliseconds(1000),
            memory_compare: Duration::milliseconds(1000),
            memory_finish: Duration::milliseconds(1000),
        }
    }
}

impl FeedbackDelays {
    pub fn immediate() -> Self {
        FeedbackDelays {
            correct: Duration::zero(),
            incorrect: Duration::zero(),
            sequence_step: Duration::zero(),
            sequence_resolve: Duration::zero(),
            memory_compare: Duration::zero(),
            memory_finish: Duration::zero(),
        }
    }
}

/// Contract shared by every mini-game session
pub trait GameSession {
    fn game_type(&self) -> GameType;

    fn state(&self) -> SessionState;

    fn start(&mut self) -> Result<(), GameError>;

    /// The learner picked option `index`; its meaning depends on the game
    fn select(&mut self, index: usize) -> Result<Outcome, GameError>;

    /// Fires the pending transition if it is due; yields the result exactly
    /// once, on the transition into `Ended`
    fn tick(&mut self) -> Option<GameResult>;

    /// When the pending transition becomes due, if any
    fn next_deadline(&self) -> Option<DateTime<Utc>>;

    /// Drops pending transitions; the session will never produce a result
    fn abandon(&mut self);

    fn score(&self) -> u32;

    fn errors(&self) -> u32;
}

/// Any of the six games, dispatched by variant
pub enum Session {
    Choice(ChoiceSession),
    Sequence(SequenceSession),
    Memory(MemorySession),
}

impl Session {
    pub fn new(game_type: GameType, clock: Arc<dyn DateProvider>, delays: FeedbackDelays) -> Self {
        Self::with_rng(game_type, clock, delays, StdRng::from_entropy())
    }

    pub fn with_rng(
        game_type: GameType,
        clock: Arc<dyn DateProvider>,
        delays: FeedbackDelays,
        rng: StdRng,
    ) -> Self {
        match game_type {
            GameType::Memory => Session::Memory(MemorySession::new(clock, delays, rng)),
            GameType::Sequence => Session::Sequence(SequenceSession::new(clock, delays, rng)),
            GameType::Color => Session::Choice(ChoiceSession::new(ChoiceGame::COLOR, clock, delays, rng)),
            GameType::Shape => Session::Choice(ChoiceSession::new(ChoiceGame::SHAPE, clock, delays, rng)),
            GameType::Number => Session::Choice(ChoiceSession::new(ChoiceGame::NUMBER, clock, delays, rng)),
            GameType::Sound => Session::Choice(ChoiceSession::new(ChoiceGame::SOUND, clock, delays, rng)),
        }
    }

    fn inner(&self) -> &dyn GameSession {
        match self {
            Session::Choice(s) => s as &dyn GameSession,
            Session::Sequence(s) => s as &dyn GameSession,
            Session::Memory(s) => s as &dyn GameSession,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn GameSession {
        match self {
            Session::Choice(s) => s as &mut dyn GameSession,
            Session::Sequence(s) => s as &mut dyn GameSession,
            Session::Memory(s) => s as &mut dyn GameSession,
        }
    }
}

impl GameSession for Session {
    fn game_type(&self) -> GameType {
        self.inner().game_type()
    }

    fn state(&self) -> SessionState {
        self.inner().state()
    }

    fn start(&mut self) -> Result<(), GameError> {
        self.inner_mut().start()
    }

    fn select(&mut self, index: usize) -> Result<Outcome, GameError> {
        self.inner_mut().select(index)
    }

    fn tick(&mut self) -> Option<GameResult> {
        self.inner_mut().tick()
    }

    fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.inner().next_deadline()
    }

    fn abandon(&mut self) {
        self.inner_mut().abandon()
    }

    fn score(&self) -> u32 {
        self.inner().score()
    }

    fn errors(&self) -> u32 {
        self.inner().errors()
    }
}
