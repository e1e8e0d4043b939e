//! Outcome learner: scores a turn and feeds the result back into the
//! genome, the strategy archive and pattern memory

use tracing::{debug, trace};

use crate::core::config::EngineConfig;
use crate::core::types::now;
use crate::genome::{GenomeParam, GenomeStore};
use crate::learning::archive::{ArchivedStrategy, StrategyArchive};
use crate::learning::outcome::{score, TurnOutcome};
use crate::learning::patterns::PatternMemory;
use crate::perception::SituationFactors;
use crate::strategy::Strategy;

/// What one learning step did
#[derive(Debug, Clone, PartialEq)]
pub struct LearningReport {
    pub effectiveness: f64,
    pub success: bool,
    /// Parameters touched, with their new values
    pub adjusted: Vec<(GenomeParam, f64)>,
}

#[derive(Debug, Clone)]
pub struct OutcomeLearner {
    adaptation_rate: f64,
    success_threshold: f64,
}

impl Default for OutcomeLearner {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl OutcomeLearner {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            adaptation_rate: config.adaptation_rate,
            success_threshold: config.success_threshold,
        }
    }

    pub fn is_success(&self, effectiveness: f64) -> bool {
        effectiveness > self.success_threshold
    }

    /// Score the outcome and apply it
    ///
    /// Only genome parameters named in the strategy's `parameters` move.
    /// A success pulls each one toward the strategy's value, a failure pushes
    /// it away, with step `adaptation_rate * effectiveness`.
    pub fn learn(
        &self,
        situation: &SituationFactors,
        strategy: &Strategy,
        outcome: &TurnOutcome,
        genome: &mut GenomeStore,
        archive: &mut StrategyArchive,
        patterns: &mut PatternMemory,
    ) -> LearningReport {
        let effectiveness = score(outcome);
        let success = self.is_success(effectiveness);

        archive.record(
            ArchivedStrategy {
                situation: *situation,
                strategy: strategy.clone(),
                outcome: *outcome,
                effectiveness,
                recorded_at: now(),
            },
            self.success_threshold,
        );

        let rate = self.adaptation_rate * effectiveness;
        let mut adjusted = Vec::new();
        for (name, &target) in &strategy.parameters {
            let Ok(param) = name.parse::<GenomeParam>() else {
                trace!(parameter = %name, "strategy parameter is not a genome parameter");
                continue;
            };
            let pull = rate * (target - genome.get(param));
            let delta = if success { pull } else { -pull };
            adjusted.push((param, genome.update(param, delta)));
        }

        patterns.observe(situation, strategy.primary_focus, effectiveness, success);

        debug!(
            effectiveness,
            success,
            focus = %strategy.primary_focus,
            adjusted = adjusted.len(),
            "learned from turn outcome"
        );

        LearningReport {
            effectiveness,
            success,
            adjusted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Focus;

    struct Fixture {
        genome: GenomeStore,
        archive: StrategyArchive,
        patterns: PatternMemory,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                genome: GenomeStore::new(),
                archive: StrategyArchive::new(),
                patterns: PatternMemory::new(),
            }
        }

        fn learn(&mut self, strategy: &Strategy, outcome: TurnOutcome) -> LearningReport {
            OutcomeLearner::default().learn(
                &SituationFactors::default(),
                strategy,
                &outcome,
                &mut self.genome,
                &mut self.archive,
                &mut self.patterns,
            )
        }
    }

    fn exploring(target: f64) -> Strategy {
        let mut strategy = Strategy::new(Focus::AdaptiveExploration, Focus::OpportunisticResourceGrab);
        strategy.parameters.insert("exploration_weight".into(), target);
        strategy
    }

    #[test]
    fn test_success_pulls_toward_strategy() {
        let mut fx = Fixture::new();
        let report = fx.learn(&exploring(0.9), TurnOutcome::new(1.0, 1.0, 1.0, 0.0, 0.0));
        assert!(report.success);
        // 0.5 + 0.1 * 0.7 * (0.9 - 0.5)
        let value = fx.genome.get(GenomeParam::ExplorationWeight);
        assert!((value - 0.528).abs() < 1e-12);
        assert_eq!(fx.archive.successful().len(), 1);
    }

    #[test]
    fn test_failure_pushes_away() {
        let mut fx = Fixture::new();
        let report = fx.learn(&exploring(0.9), TurnOutcome::new(1.0, 0.0, 1.0, 0.0, 0.0));
        assert!(!report.success);
        // 0.5 - 0.1 * 0.4 * (0.9 - 0.5)
        let value = fx.genome.get(GenomeParam::ExplorationWeight);
        assert!((value - 0.484).abs() < 1e-12);
        assert_eq!(fx.archive.failed().len(), 1);
    }

    #[test]
    fn test_zero_effectiveness_leaves_genome_alone() {
        let mut fx = Fixture::new();
        let before = fx.genome.snapshot();
        fx.learn(&exploring(0.9), TurnOutcome::default());
        assert_eq!(fx.genome.snapshot(), before);
        assert_eq!(fx.archive.failed().len(), 1);
    }

    #[test]
    fn test_untouched_and_unknown_parameters() {
        let mut fx = Fixture::new();
        let mut strategy = exploring(0.9);
        strategy.parameters.insert("morale".into(), 1.0);
        let report = fx.learn(&strategy, TurnOutcome::new(1.0, 1.0, 1.0, 1.0, 1.0));
        assert_eq!(report.adjusted.len(), 1);
        assert_eq!(fx.genome.get(GenomeParam::MilitaryWeight), 0.7);
    }

    #[test]
    fn test_updates_pattern_memory() {
        let mut fx = Fixture::new();
        fx.learn(&exploring(0.9), TurnOutcome::new(1.0, 1.0, 1.0, 0.0, 0.0));
        let record = fx.patterns.recall(&SituationFactors::default()).unwrap();
        assert_eq!(record.focus, Focus::AdaptiveExploration);
        assert_eq!(record.successes, 1);
    }
}
