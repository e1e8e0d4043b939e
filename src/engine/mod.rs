//! Adaptive engine: one instance per game
//!
//! Per turn: snapshot -> analyze -> evolve -> translate -> (host executes)
//! -> complete_turn -> learn + ledger append. A decision stays pending until
//! its outcome arrives; the genome only changes when an outcome is applied.

pub mod persistence;

pub use persistence::{load_state, load_state_or_default, save_state, EngineState, STATE_FORMAT_VERSION};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::actions::{ActionIntent, ActionTranslator};
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::Turn;
use crate::genome::{Genome, GenomeStore};
use crate::learning::{FocusRecord, LearningReport, OutcomeLearner, PatternMemory, StrategyArchive, TurnOutcome};
use crate::ledger::{HistoryLedger, OutcomeRecord};
use crate::perception::{SituationAnalyzer, SituationFactors};
use crate::strategy::{should_innovate, Strategy, StrategyEvolver};

/// A decision handed to the host for execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPlan {
    pub turn: Turn,
    pub factors: SituationFactors,
    pub strategy: Strategy,
    pub actions: Vec<ActionIntent>,
}

#[derive(Debug, Clone)]
pub struct AdaptiveEngine {
    config: EngineConfig,
    analyzer: SituationAnalyzer,
    evolver: StrategyEvolver,
    translator: ActionTranslator,
    learner: OutcomeLearner,
    genome: GenomeStore,
    archive: StrategyArchive,
    ledger: HistoryLedger,
    patterns: PatternMemory,
    pending: Option<TurnPlan>,
}

impl Default for AdaptiveEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl AdaptiveEngine {
    /// Engine with a fresh genome and empty history
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            analyzer: SituationAnalyzer::new(&config),
            evolver: StrategyEvolver::new(config.clone()),
            translator: ActionTranslator::new(),
            learner: OutcomeLearner::new(&config),
            genome: GenomeStore::new(),
            archive: StrategyArchive::new(),
            ledger: HistoryLedger::new(),
            patterns: PatternMemory::new(),
            pending: None,
            config,
        }
    }

    /// Engine resuming from a saved state
    pub fn with_state(config: EngineConfig, state: EngineState) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.import_state(state);
        Ok(engine)
    }

    pub fn analyze(&self, raw: &Value) -> SituationFactors {
        self.analyzer.analyze(raw)
    }

    /// Evolve against an explicit history window and the live genome
    pub fn evolve(&self, factors: &SituationFactors, recent: &[OutcomeRecord]) -> Strategy {
        self.evolver
            .evolve(factors, recent, self.genome.genome(), &self.archive)
    }

    pub fn translate(&self, strategy: &Strategy) -> Vec<ActionIntent> {
        self.translator.translate(strategy)
    }

    /// Trailing ledger window the evolver sees
    pub fn recent(&self) -> &[OutcomeRecord] {
        self.ledger.recent(self.config.feedback_window)
    }

    pub fn should_innovate(&self) -> bool {
        should_innovate(self.recent(), &self.config)
    }

    /// Full decision for one snapshot, held pending until `complete_turn`
    ///
    /// Deciding again before completing replaces the pending plan.
    pub fn decide(&mut self, raw: &Value) -> TurnPlan {
        let factors = self.analyze(raw);
        let turn = SituationAnalyzer::turn_of(raw);
        let strategy = self.evolve(&factors, self.recent());
        let actions = self.translate(&strategy);

        if let Some(previous) = &self.pending {
            warn!(turn = previous.turn, "discarding decision that never received an outcome");
        }

        debug!(turn, actions = actions.len(), "decided turn");

        let plan = TurnPlan {
            turn,
            factors,
            strategy,
            actions,
        };
        self.pending = Some(plan.clone());
        plan
    }

    /// Apply the outcome of the pending decision. Returns its effectiveness.
    pub fn complete_turn(&mut self, outcome: &TurnOutcome) -> Result<f64> {
        let plan = self.pending.take().ok_or(EngineError::NoPendingTurn)?;
        let report = self.learn(plan, outcome);
        Ok(report.effectiveness)
    }

    /// Learn from an executed plan, whether or not it came from `decide`
    pub fn learn(&mut self, plan: TurnPlan, outcome: &TurnOutcome) -> LearningReport {
        let report = self.learner.learn(
            &plan.factors,
            &plan.strategy,
            outcome,
            &mut self.genome,
            &mut self.archive,
            &mut self.patterns,
        );
        self.ledger
            .append(OutcomeRecord::new(plan.turn, plan.strategy, plan.actions, *outcome));
        report
    }

    /// Best known focus for situations like this one
    pub fn recall(&self, factors: &SituationFactors) -> Option<&FocusRecord> {
        self.patterns.recall(factors)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn genome(&self) -> &Genome {
        self.genome.genome()
    }

    pub fn genome_store(&self) -> &GenomeStore {
        &self.genome
    }

    pub fn genome_store_mut(&mut self) -> &mut GenomeStore {
        &mut self.genome
    }

    pub fn archive(&self) -> &StrategyArchive {
        &self.archive
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn patterns(&self) -> &PatternMemory {
        &self.patterns
    }

    pub fn pending(&self) -> Option<&TurnPlan> {
        self.pending.as_ref()
    }

    pub fn export_state(&self) -> EngineState {
        EngineState {
            version: STATE_FORMAT_VERSION,
            genome: self.genome.snapshot(),
            archive: self.archive.clone(),
            ledger: self.ledger.clone(),
            patterns: self.patterns.clone(),
        }
    }

    /// Replace all learned state. Any pending decision is dropped.
    pub fn import_state(&mut self, state: EngineState) {
        self.genome.restore(state.genome);
        self.archive = state.archive;
        self.ledger = state.ledger;
        self.patterns = state.patterns;
        self.pending = None;
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_state(&self.export_state(), path)
    }
}

/// Engine behind a single lock for concurrent hosts
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<AdaptiveEngine>>,
}

impl SharedEngine {
    pub fn new(engine: AdaptiveEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn decide(&self, raw: &Value) -> TurnPlan {
        self.inner.lock().decide(raw)
    }

    pub fn complete_turn(&self, outcome: &TurnOutcome) -> Result<f64> {
        self.inner.lock().complete_turn(outcome)
    }

    pub fn export_state(&self) -> EngineState {
        self.inner.lock().export_state()
    }

    pub fn import_state(&self, state: EngineState) {
        self.inner.lock().import_state(state)
    }

    /// Run a closure with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut AdaptiveEngine) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}
