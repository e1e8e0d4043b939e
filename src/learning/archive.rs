//! Archive of past strategies split by success

use serde::{Deserialize, Serialize};

use crate::core::types::Timestamp;
use crate::learning::outcome::TurnOutcome;
use crate::perception::SituationFactors;
use crate::strategy::Strategy;

/// Full situation + strategy + outcome bundle for one turn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchivedStrategy {
    pub situation: SituationFactors,
    pub strategy: Strategy,
    pub outcome: TurnOutcome,
    pub effectiveness: f64,
    pub recorded_at: Timestamp,
}

/// Successful and failed strategies, each oldest first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyArchive {
    successful: Vec<ArchivedStrategy>,
    failed: Vec<ArchivedStrategy>,
}

impl StrategyArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// File the entry as a success if its effectiveness is strictly above
    /// the threshold. Returns whether it was a success.
    pub fn record(&mut self, entry: ArchivedStrategy, success_threshold: f64) -> bool {
        let success = entry.effectiveness > success_threshold;
        if success {
            self.successful.push(entry);
        } else {
            self.failed.push(entry);
        }
        success
    }

    pub fn successful(&self) -> &[ArchivedStrategy] {
        &self.successful
    }

    pub fn failed(&self) -> &[ArchivedStrategy] {
        &self.failed
    }

    /// The two most recent successes, older first
    pub fn last_two_successes(&self) -> Option<(&ArchivedStrategy, &ArchivedStrategy)> {
        match self.successful.as_slice() {
            [.., older, newer] => Some((older, newer)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(effectiveness: f64) -> ArchivedStrategy {
        ArchivedStrategy {
            effectiveness,
            ..Default::default()
        }
    }

    #[test]
    fn test_partition_at_threshold() {
        let mut archive = StrategyArchive::new();
        assert!(archive.record(entry(0.7), 0.6));
        assert!(!archive.record(entry(0.6), 0.6));
        assert!(!archive.record(entry(0.1), 0.6));
        assert_eq!(archive.successful().len(), 1);
        assert_eq!(archive.failed().len(), 2);
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_last_two_successes_order() {
        let mut archive = StrategyArchive::new();
        assert!(archive.last_two_successes().is_none());
        archive.record(entry(0.7), 0.6);
        assert!(archive.last_two_successes().is_none());
        archive.record(entry(0.8), 0.6);
        archive.record(entry(0.9), 0.6);
        let (older, newer) = archive.last_two_successes().unwrap();
        assert_eq!(older.effectiveness, 0.8);
        assert_eq!(newer.effectiveness, 0.9);
    }
}
