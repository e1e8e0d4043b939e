//! History ledger - append-only record of executed turns

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::ActionIntent;
use crate::core::types::{now, unit_clamp, Timestamp, Turn};
use crate::learning::outcome::{score, TurnOutcome};
use crate::strategy::Strategy;

/// One executed turn: what was chosen, what was done, how it went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct OutcomeRecord {
    pub id: Uuid,
    pub turn: Turn,
    pub strategy: Strategy,
    pub actions: Vec<ActionIntent>,
    pub outcome: TurnOutcome,
    pub effectiveness: f64,
    pub recorded_at: Timestamp,
}

/// On-disk form; a missing effectiveness is rescored from the outcome
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default)]
    turn: Turn,
    #[serde(default)]
    strategy: Strategy,
    #[serde(default)]
    actions: Vec<ActionIntent>,
    #[serde(default)]
    outcome: TurnOutcome,
    #[serde(default)]
    effectiveness: Option<f64>,
    #[serde(default = "now")]
    recorded_at: Timestamp,
}

impl From<StoredRecord> for OutcomeRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            turn: stored.turn,
            effectiveness: stored
                .effectiveness
                .map(unit_clamp)
                .unwrap_or_else(|| score(&stored.outcome)),
            strategy: stored.strategy,
            actions: stored.actions,
            outcome: stored.outcome,
            recorded_at: stored.recorded_at,
        }
    }
}

impl OutcomeRecord {
    pub fn new(turn: Turn, strategy: Strategy, actions: Vec<ActionIntent>, outcome: TurnOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            turn,
            effectiveness: score(&outcome),
            strategy,
            actions,
            outcome,
            recorded_at: now(),
        }
    }
}

/// Records are never edited or removed once appended
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryLedger {
    records: Vec<OutcomeRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: OutcomeRecord) -> Uuid {
        let id = record.id;
        self.records.push(record);
        id
    }

    /// The last `window` records, oldest first
    pub fn recent(&self, window: usize) -> &[OutcomeRecord] {
        &self.records[self.records.len().saturating_sub(window)..]
    }

    pub fn last(&self) -> Option<&OutcomeRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter()
    }

    pub fn records_for_turn(&self, turn: Turn) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(move |r| r.turn == turn)
    }

    /// Mean effectiveness over the whole ledger
    pub fn mean_effectiveness(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: f64 = self.records.iter().map(|r| r.effectiveness).sum();
        Some(total / self.records.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
