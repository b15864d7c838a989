use chrono::{Duration, TimeZone, Utc};
use mindkids::auth::{AccessGate, Credentials};
use mindkids::database::Database;
use mindkids::database_factory::{DatabaseConfig, DatabaseFactory};
use mindkids::date_provider::ManualDateProvider;
use mindkids::game::{FeedbackDelays, GameSession, GameType, Session, SessionState};
use mindkids::play_service::PlayService;
use mindkids::profile_store::ProfileStore;
use mindkids::report::Report;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;

fn temp_db_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mindkids-{}-{}.db", tag, uuid::Uuid::new_v4()))
}

fn premium_gate(db: Arc<Database>) -> AccessGate {
    let mut gate = AccessGate::load(db).unwrap();
    gate.login(&Credentials {
        email: "familia@example.com".to_string(),
        password: "senha".to_string(),
    })
    .unwrap();
    gate.activate_premium().unwrap();
    gate
}

/// Repeats each pattern back until the ladder is exhausted
fn play_sequence_perfectly(session: &mut Session) -> mindkids::game::GameResult {
    loop {
        if let Some(result) = session.tick() {
            return result;
        }
        if session.state() != SessionState::InRound {
            continue;
        }
        let Session::Sequence(sequence) = session else {
            panic!("expected a sequence session");
        };
        for shape in sequence.sequence().to_vec() {
            sequence.select(shape).unwrap();
        }
    }
}

#[test]
fn test_full_flow_from_login_to_report() {
    let clock = Arc::new(ManualDateProvider::new(
        Utc.with_ymd_and_hms(2025, 6, 20, 10, 0, 0).unwrap(),
    ));
    let config = DatabaseConfig::builder()
        .test_mode()
        .date_provider(clock.clone())
        .build();
    let db = Arc::new(DatabaseFactory::create(config).unwrap());
    let gate = premium_gate(db.clone());
    let mut store = ProfileStore::load(db.clone()).unwrap();
    let ana = store.create_profile("Ana").unwrap().id;

    let service = PlayService::new(clock.clone(), FeedbackDelays::immediate());
    let mut play = service
        .begin_with_rng(&gate, &store, Some(ana), GameType::Sequence, StdRng::seed_from_u64(5))
        .unwrap();
    clock.advance(Duration::seconds(95));
    let result = play_sequence_perfectly(&mut play.session);
    service.record(&mut store, &play, result).unwrap();

    let report = service.report(&gate, &store, ana).unwrap();
    assert_eq!(report.total_games, 1);
    assert_eq!(report.average_score, 150);
    assert_eq!(report.average_time_spent, 95);
    assert!(report
        .observations
        .development_areas
        .contains(&"Pode trabalhar a velocidade de resposta"));
    assert!(report
        .observations
        .development_areas
        .contains(&"Treinar mais a memória visual"));
}

#[test]
fn test_results_persist_across_reopen() {
    let path = temp_db_path("reopen");
    let path_str = path.to_string_lossy().to_string();
    {
        let db = Arc::new(Database::new(&path_str).unwrap());
        let gate = premium_gate(db.clone());
        let mut store = ProfileStore::load(db.clone()).unwrap();
        let bia = store.create_profile("Bia").unwrap().id;

        let service = PlayService::new(db.date_provider(), FeedbackDelays::immediate());
        let mut play = service
            .begin_with_rng(&gate, &store, Some(bia), GameType::Sequence, StdRng::seed_from_u64(9))
            .unwrap();
        let result = play_sequence_perfectly(&mut play.session);
        service.record(&mut store, &play, result).unwrap();
    }

    let db = Arc::new(Database::new(&path_str).unwrap());
    let gate = AccessGate::load(db.clone()).unwrap();
    assert!(gate.has_entitlement());
    let store = ProfileStore::load(db).unwrap();
    let bia = store.find_by_name("Bia").unwrap();
    assert_eq!(bia.game_results.len(), 1);
    assert_eq!(bia.game_results[0].game_type, GameType::Sequence);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_profiles_are_isolated() {
    let db = Arc::new(Database::new(":memory:").unwrap());
    let gate = premium_gate(db.clone());
    let mut store = ProfileStore::load(db.clone()).unwrap();
    let ana = store.create_profile("Ana").unwrap().id;
    let caio = store.create_profile("Caio").unwrap().id;

    let service = PlayService::new(db.date_provider(), FeedbackDelays::immediate());
    for seed in 0..3 {
        let mut play = service
            .begin_with_rng(&gate, &store, Some(ana), GameType::Sequence, StdRng::seed_from_u64(seed))
            .unwrap();
        let result = play_sequence_perfectly(&mut play.session);
        service.record(&mut store, &play, result).unwrap();
    }

    let ana_report = Report::from_results(&store.get_profile(ana).unwrap().game_results);
    let caio_report = Report::from_results(&store.get_profile(caio).unwrap().game_results);
    assert_eq!(ana_report.stats_for(GameType::Sequence).unwrap().count, 3);
    assert_eq!(caio_report.total_games, 0);
    assert!(caio_report.observations.is_empty());
}

#[test]
fn test_abandoned_session_is_never_recorded() {
    let db = Arc::new(Database::new(":memory:").unwrap());
    let gate = premium_gate(db.clone());
    let mut store = ProfileStore::load(db.clone()).unwrap();
    let ana = store.create_profile("Ana").unwrap().id;

    let service = PlayService::new(db.date_provider(), FeedbackDelays::immediate());
    let mut play = service.begin(&gate, &store, Some(ana), GameType::Memory).unwrap();
    play.session.select(0).unwrap();
    play.session.abandon();
    assert!(play.session.tick().is_none());

    let reloaded = ProfileStore::load(db).unwrap();
    assert!(reloaded.get_profile(ana).unwrap().game_results.is_empty());
}
