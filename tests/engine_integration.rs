//! Integration tests for the adaptive engine
//!
//! These tests drive full decision cycles through the public API:
//! - snapshot -> decide -> execute -> complete_turn
//! - innovation after a failure streak
//! - export/import and file persistence of learned state
//! - sandbox skirmishes end to end

use serde_json::json;
use stratagem::engine::{load_state, load_state_or_default, save_state, EngineState};
use stratagem::genome::GenomeParam;
use stratagem::learning::{score, TurnOutcome};
use stratagem::ledger::OutcomeRecord;
use stratagem::perception::{EnemyPattern, GamePhase};
use stratagem::sandbox::{run_skirmish, OpponentKind, Skirmish};
use stratagem::strategy::{should_innovate, Focus, Strategy};
use stratagem::{AdaptiveEngine, EngineConfig, EngineError, SharedEngine};

fn calm_rich_snapshot(turn: u32) -> serde_json::Value {
    // 12000 gold-equivalent -> abundance 0.8; 9 enemy units of 90 -> pressure 0.1
    json!({
        "turn": turn,
        "own_resources": {"gold": 10000, "wood": 10, "ore": 10},
        "enemy_resources": {"gold": 2000},
        "own_army": {"archers": 81},
        "enemy_army": {"archers": 9},
    })
}

fn failing_record(focus: Focus) -> OutcomeRecord {
    OutcomeRecord::new(
        1,
        Strategy::new(focus, Focus::StrategicPositioning),
        Vec::new(),
        TurnOutcome::new(1.0, 0.0, 0.0, 0.0, 1.0),
    )
}

// ============================================================================
// Decision scenarios
// ============================================================================

#[test]
fn test_calm_rich_early_turn_expands() {
    let mut engine = AdaptiveEngine::default();
    let plan = engine.decide(&calm_rich_snapshot(3));

    assert_eq!(plan.factors.game_phase, GamePhase::Early);
    assert!((plan.factors.resource_abundance - 0.8).abs() < 1e-12);
    assert!((plan.factors.military_pressure - 0.1).abs() < 1e-12);
    assert_eq!(plan.strategy.primary_focus, Focus::AdaptiveExploration);
    assert!(plan.strategy.tactics.iter().any(|t| t == "rapid_expansion"));
    assert!(plan.strategy.novel_elements.is_empty());
}

#[test]
fn test_failure_streak_forces_innovation() {
    let engine = AdaptiveEngine::default();
    let mut recent: Vec<OutcomeRecord> = (0..4).map(|_| failing_record(Focus::SituationalDominance)).collect();
    recent.insert(
        2,
        OutcomeRecord::new(
            1,
            Strategy::new(Focus::VictoryConditionPursuit, Focus::OpponentElimination),
            Vec::new(),
            TurnOutcome::new(1.0, 1.0, 1.0, 1.0, 1.0),
        ),
    );
    assert_eq!(recent.iter().filter(|r| r.effectiveness == 0.3).count(), 4);
    assert!(should_innovate(&recent, engine.config()));

    let factors = engine.analyze(&json!({"turn": 8}));
    let strategy = engine.evolve(&factors, &recent);
    assert!(!strategy.novel_elements.is_empty());
    assert!(strategy.innovation_level > 0.0);
}

#[test]
fn test_failures_after_successes_produce_hybrid() {
    let mut engine = AdaptiveEngine::default();
    let snapshot = json!({"turn": 7});
    let won = TurnOutcome::new(1.0, 1.0, 1.0, 1.0, 1.0);
    let lost = TurnOutcome::default();

    for outcome in [won, won, lost, lost, lost] {
        engine.decide(&snapshot);
        engine.complete_turn(&outcome).unwrap();
    }
    assert_eq!(engine.archive().successful().len(), 2);

    let plan = engine.decide(&snapshot);
    let hybrid = plan
        .strategy
        .novel_elements
        .iter()
        .find(|tag| tag.starts_with("hybrid:"))
        .expect("hybrid element");
    let (first, second) = hybrid["hybrid:".len()..].split_once('+').unwrap();
    assert_ne!(first, second);
    assert!(plan
        .actions
        .iter()
        .any(|a| a.reasoning == format!("hybrid: {}", hybrid)));
}

#[test]
fn test_outcome_score_is_exact() {
    let outcome: TurnOutcome = serde_json::from_value(json!({
        "resource_gain": 1,
        "military_victories": 0,
        "territory_gained": 1,
        "economic_improvement": 0,
        "position_improvement": 0
    }))
    .unwrap();
    assert_eq!(score(&outcome), 0.4);
}

#[test]
fn test_declared_fields_win_over_inference() {
    let engine = AdaptiveEngine::default();
    let factors = engine.analyze(&json!({
        "turn": 2,
        "phase": "late",
        "enemy_pattern": "turtle",
        "enemy_recent_actions": ["attack", "attack", "attack"]
    }));
    assert_eq!(factors.game_phase, GamePhase::Late);
    assert_eq!(factors.enemy_behavior_pattern, EnemyPattern::Turtle);

    let strategy = engine.evolve(&factors, &[]);
    assert_eq!(strategy.primary_focus, Focus::VictoryConditionPursuit);
    assert_eq!(strategy.counter_tactics, vec!["economic_advantage", "map_control", "slow_pressure"]);
}

#[test]
fn test_garbage_snapshot_still_decides() {
    let mut engine = AdaptiveEngine::default();
    let plan = engine.decide(&json!({
        "turn": "soon",
        "own_resources": [1, 2, 3],
        "enemy_army": {"archers": -40},
        "locations": "everywhere"
    }));
    assert_eq!(plan.turn, 1);
    assert!(!plan.actions.is_empty());
}

// ============================================================================
// Turn cycle and learning
// ============================================================================

#[test]
fn test_complete_turn_requires_decision() {
    let mut engine = AdaptiveEngine::default();
    assert!(matches!(
        engine.complete_turn(&TurnOutcome::default()),
        Err(EngineError::NoPendingTurn)
    ));
}

#[test]
fn test_successes_move_genome_toward_strategy() {
    let mut engine = AdaptiveEngine::default();
    let start = engine.genome().get(GenomeParam::ExplorationWeight);

    for turn in 1..=3 {
        let plan = engine.decide(&calm_rich_snapshot(turn));
        assert!(plan.strategy.parameters.contains_key("exploration_weight"));
        engine
            .complete_turn(&TurnOutcome::new(1.0, 1.0, 1.0, 1.0, 1.0))
            .unwrap();
    }

    assert!(engine.genome().get(GenomeParam::ExplorationWeight) > start);
    assert_eq!(engine.archive().successful().len(), 3);
    assert_eq!(engine.ledger().len(), 3);

    let factors = engine.analyze(&calm_rich_snapshot(4));
    let recalled = engine.recall(&factors).unwrap();
    assert_eq!(recalled.successes, 3);
}

#[test]
fn test_genome_stays_bounded_under_long_runs() {
    let mut engine = AdaptiveEngine::default();
    for turn in 1..=60 {
        engine.decide(&json!({"turn": turn, "enemy_recent_actions": ["attack", "raid"]}));
        let outcome = if turn % 3 == 0 {
            TurnOutcome::new(1.0, 1.0, 1.0, 1.0, 1.0)
        } else {
            TurnOutcome::default()
        };
        engine.complete_turn(&outcome).unwrap();
    }
    for (_, value) in engine.genome().iter() {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_decisions_are_deterministic() {
    let run = || {
        let mut engine = AdaptiveEngine::default();
        let mut strategies = Vec::new();
        for turn in 1..=12 {
            let plan = engine.decide(&json!({
                "turn": turn,
                "own_army": {"archers": 10 + turn},
                "enemy_army": {"archers": 20},
                "enemy_recent_actions": ["build", "trade", "build"]
            }));
            strategies.push(plan.strategy);
            engine
                .complete_turn(&TurnOutcome::new(f64::from(turn % 2), 0.0, 1.0, 0.0, 0.0))
                .unwrap();
        }
        (strategies, engine.genome().clone())
    };
    assert_eq!(run(), run());
}

// ============================================================================
// Persistence
// ============================================================================

fn trained_engine() -> AdaptiveEngine {
    let mut engine = AdaptiveEngine::default();
    let mut skirmish = Skirmish::new(OpponentKind::Rush, 9);
    run_skirmish(&mut engine, &mut skirmish, 10, |_, _, _| {}).unwrap();
    engine
}

#[test]
fn test_export_import_round_trip() {
    let engine = trained_engine();
    let exported = engine.export_state();

    let json = exported.to_json().unwrap();
    let restored = EngineState::from_json(&json).unwrap();
    assert_eq!(restored, exported);

    let mut fresh = AdaptiveEngine::default();
    fresh.import_state(restored);
    assert_eq!(fresh.export_state(), exported);
    assert_eq!(fresh.genome(), engine.genome());

    let factors = engine.analyze(&calm_rich_snapshot(7));
    assert_eq!(
        fresh.evolve(&factors, fresh.recent()),
        engine.evolve(&factors, engine.recent())
    );
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let engine = trained_engine();
    engine.save(&path).unwrap();

    let loaded = load_state(&path).unwrap();
    assert_eq!(loaded, engine.export_state());

    let resumed = AdaptiveEngine::with_state(EngineConfig::default(), loaded).unwrap();
    assert_eq!(resumed.ledger().len(), engine.ledger().len());
}

#[test]
fn test_corrupt_state_falls_back_to_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let (state, err) = load_state_or_default(&path);
    assert_eq!(state, EngineState::default());
    assert!(matches!(err, Some(EngineError::Serde(_))));

    let (state, err) = load_state_or_default(&dir.path().join("missing.json"));
    assert_eq!(state, EngineState::default());
    assert!(err.is_none());
}

#[test]
fn test_partial_state_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut state = EngineState::default();
    state.genome.set(GenomeParam::DefensiveStance, 0.95);
    save_state(&state, &path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object_mut().unwrap();
    object.remove("ledger");
    object.insert("future_section".into(), json!({"anything": true}));
    std::fs::write(&path, value.to_string()).unwrap();

    let loaded = load_state(&path).unwrap();
    assert_eq!(loaded.genome.get(GenomeParam::DefensiveStance), 0.95);
    assert!(loaded.ledger.is_empty());
}

// ============================================================================
// Sandbox and shared engine
// ============================================================================

#[test]
fn test_skirmish_against_every_opponent() {
    for kind in OpponentKind::ALL {
        let mut engine = AdaptiveEngine::default();
        let mut skirmish = Skirmish::new(kind, 2024);
        let tally = run_skirmish(&mut engine, &mut skirmish, 15, |plan, _, effectiveness| {
            assert!(!plan.actions.is_empty());
            assert!((0.0..=1.0).contains(&effectiveness));
        })
        .unwrap();
        assert!(tally.turns >= 1);
        assert_eq!(engine.ledger().len(), tally.turns as usize);
        assert!(engine.pending().is_none());
    }
}

#[test]
fn test_shared_engine_cycle() {
    let shared = SharedEngine::new(AdaptiveEngine::default());
    let plan = shared.decide(&calm_rich_snapshot(1));
    assert_eq!(plan.strategy.primary_focus, Focus::AdaptiveExploration);
    let effectiveness = shared
        .complete_turn(&TurnOutcome::new(0.0, 1.0, 0.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(effectiveness, 0.3);
    assert_eq!(shared.with(|engine| engine.ledger().len()), 1);
}
