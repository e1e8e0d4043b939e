//! Pattern memory: what tended to work in which kind of situation
//!
//! Situations are bucketed by a coarse signature (phase, enemy pattern,
//! pressure band, resource band). Under each signature every primary focus
//! that has been tried keeps a success/failure tally with a Bayesian
//! confidence that starts low and only rises with repeated success.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::perception::SituationFactors;
use crate::strategy::Focus;

// Constants
pub const PRIOR_WEIGHT: f64 = 2.0;
pub const LOW_BAND: f64 = 0.3;
pub const HIGH_BAND: f64 = 0.7;

/// Tally for one focus under one situation signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRecord {
    pub focus: Focus,
    pub successes: u32,
    pub failures: u32,
    pub confidence: f64,
    pub mean_effectiveness: f64,
}

impl FocusRecord {
    fn new(focus: Focus) -> Self {
        Self {
            focus,
            successes: 0,
            failures: 0,
            confidence: 0.0,
            mean_effectiveness: 0.0,
        }
    }

    fn calculate_confidence(successes: u32, failures: u32) -> f64 {
        let total = f64::from(successes) + f64::from(failures) + PRIOR_WEIGHT;
        f64::from(successes) / total
    }

    fn observe(&mut self, effectiveness: f64, success: bool) {
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        let n = f64::from(self.successes + self.failures);
        self.mean_effectiveness += (effectiveness - self.mean_effectiveness) / n;
        self.confidence = Self::calculate_confidence(self.successes, self.failures);
    }

    pub fn trials(&self) -> u32 {
        self.successes + self.failures
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternMemory {
    entries: AHashMap<String, Vec<FocusRecord>>,
}

fn band(value: f64) -> &'static str {
    if value < LOW_BAND {
        "low"
    } else if value > HIGH_BAND {
        "high"
    } else {
        "mid"
    }
}

/// Coarse key for a situation, e.g. `early/rush/pressure-high/resources-low`
pub fn situation_signature(factors: &SituationFactors) -> String {
    format!(
        "{}/{}/pressure-{}/resources-{}",
        factors.game_phase,
        factors.enemy_behavior_pattern,
        band(factors.military_pressure),
        band(factors.resource_abundance)
    )
}

impl PatternMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, factors: &SituationFactors, focus: Focus, effectiveness: f64, success: bool) {
        let records = self.entries.entry(situation_signature(factors)).or_default();
        let index = match records.iter().position(|r| r.focus == focus) {
            Some(index) => index,
            None => {
                records.push(FocusRecord::new(focus));
                records.len() - 1
            }
        };
        records[index].observe(effectiveness, success);
    }

    /// Best known focus for situations like this one: highest confidence,
    /// ties broken by mean effectiveness.
    pub fn recall(&self, factors: &SituationFactors) -> Option<&FocusRecord> {
        self.entries
            .get(&situation_signature(factors))?
            .iter()
            .max_by(|a, b| {
                a.confidence
                    .total_cmp(&b.confidence)
                    .then(a.mean_effectiveness.total_cmp(&b.mean_effectiveness))
            })
    }

    /// All tallies kept for this kind of situation
    pub fn records_for(&self, factors: &SituationFactors) -> &[FocusRecord] {
        self.entries
            .get(&situation_signature(factors))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Best record across every signature, by confidence
    pub fn strongest(&self) -> Option<(&str, &FocusRecord)> {
        self.entries
            .iter()
            .flat_map(|(key, records)| records.iter().map(move |r| (key.as_str(), r)))
            .max_by(|(ka, a), (kb, b)| {
                a.confidence
                    .total_cmp(&b.confidence)
                    .then(a.mean_effectiveness.total_cmp(&b.mean_effectiveness))
                    .then(kb.cmp(ka))
            })
    }

    /// Number of distinct situation signatures seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::{EnemyPattern, GamePhase};

    #[test]
    fn test_signature_bands() {
        let factors = SituationFactors::default()
            .with_pattern(EnemyPattern::Rush)
            .with_pressure(0.9)
            .with_resources(0.1);
        assert_eq!(situation_signature(&factors), "early/rush/pressure-high/resources-low");
        let factors = factors.with_phase(GamePhase::Late).with_pressure(0.3).with_resources(0.7);
        assert_eq!(situation_signature(&factors), "late/rush/pressure-mid/resources-mid");
    }

    #[test]
    fn test_confidence_calculation() {
        let mut memory = PatternMemory::new();
        let factors = SituationFactors::default();
        memory.observe(&factors, Focus::AdaptiveExploration, 0.8, true);
        let record = memory.recall(&factors).unwrap();
        assert!((record.confidence - 1.0 / 3.0).abs() < 1e-12);

        memory.observe(&factors, Focus::AdaptiveExploration, 0.2, false);
        let record = memory.recall(&factors).unwrap();
        assert_eq!(record.trials(), 2);
        assert!((record.confidence - 0.25).abs() < 1e-12);
        assert!((record.mean_effectiveness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_recall_prefers_confident_focus() {
        let mut memory = PatternMemory::new();
        let factors = SituationFactors::default();
        memory.observe(&factors, Focus::AdaptiveExploration, 0.4, false);
        memory.observe(&factors, Focus::DefensiveConsolidation, 0.7, true);
        memory.observe(&factors, Focus::DefensiveConsolidation, 0.9, true);
        assert_eq!(memory.recall(&factors).unwrap().focus, Focus::DefensiveConsolidation);
        assert_eq!(memory.records_for(&factors).len(), 2);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_recall_unknown_situation() {
        let memory = PatternMemory::new();
        assert!(memory.recall(&SituationFactors::default()).is_none());
        assert!(memory.strongest().is_none());
    }
}
