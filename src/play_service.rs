use crate::auth::{AccessDenied, AccessGate};
use crate::date_provider::DateProvider;
use crate::error::StoreError;
use crate::game::{FeedbackDelays, GameError, GameResult, GameSession, GameType, Session};
use crate::profile_store::ProfileStore;
use crate::report::Report;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),
    #[error("selecione um perfil antes de jogar")]
    NoProfileSelected,
    #[error("perfil {0} não encontrado")]
    ProfileNotFound(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A running game bound to the profile that will receive its result
pub struct PlaySession {
    pub profile_id: Uuid,
    pub profile_name: String,
    pub session: Session,
}

/// Glue between the gate, the profile store and the games
pub struct PlayService {
    clock: Arc<dyn DateProvider>,
    delays: FeedbackDelays,
}

impl PlayService {
    pub fn new(clock: Arc<dyn DateProvider>, delays: FeedbackDelays) -> Self {
        Self { clock, delays }
    }

    pub fn begin(
        &self,
        gate: &AccessGate,
        store: &ProfileStore,
        profile_id: Option<Uuid>,
        game_type: GameType,
    ) -> Result<PlaySession, PlayError> {
        self.begin_with_rng(gate, store, profile_id, game_type, StdRng::from_entropy())
    }

    pub fn begin_with_rng(
        &self,
        gate: &AccessGate,
        store: &ProfileStore,
        profile_id: Option<Uuid>,
        game_type: GameType,
        rng: StdRng,
    ) -> Result<PlaySession, PlayError> {
        let user = gate.require_entitlement().inspect_err(|denied| {
            warn!("Refused to start {}: {}", game_type, denied);
        })?;
        let profile_id = profile_id.ok_or(PlayError::NoProfileSelected)?;
        let profile = store
            .get_profile(profile_id)
            .ok_or(PlayError::ProfileNotFound(profile_id))?;

        info!("{} starts {} for '{}'", user.email, game_type, profile.name);
        let mut session = Session::with_rng(game_type, self.clock.clone(), self.delays, rng);
        session.start()?;
        Ok(PlaySession {
            profile_id,
            profile_name: profile.name.clone(),
            session,
        })
    }

    /// Stores the result a session emitted on its final tick
    pub fn record(
        &self,
        store: &mut ProfileStore,
        play: &PlaySession,
        result: GameResult,
    ) -> Result<(), PlayError> {
        store.append_result(play.profile_id, result)?;
        Ok(())
    }

    pub fn report(
        &self,
        gate: &AccessGate,
        store: &ProfileStore,
        profile_id: Uuid,
    ) -> Result<Report, PlayError> {
        gate.require_entitlement()?;
        let profile = store
            .get_profile(profile_id)
            .ok_or(PlayError::ProfileNotFound(profile_id))?;
        Ok(Report::from_results(&profile.game_results))
    }
}
