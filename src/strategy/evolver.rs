//! Strategy evolver: factors + recent history + genome -> strategy
//!
//! Deterministic: identical inputs always produce an identical strategy.

use tracing::{debug, info};

use crate::core::config::EngineConfig;
use crate::genome::{Genome, GenomeParam};
use crate::learning::archive::StrategyArchive;
use crate::ledger::OutcomeRecord;
use crate::perception::SituationFactors;
use crate::strategy::counters::counter_tactics;
use crate::strategy::innovation::{innovation_trigger, novel_elements};
use crate::strategy::phase_policies::{base_policy, focus_parameters, temperament_tactics};
use crate::strategy::types::Strategy;

/// Extra risk an innovative strategy leans toward, scaled by innovation level
pub const NOVELTY_RISK_BIAS: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct StrategyEvolver {
    config: EngineConfig,
}

impl Default for StrategyEvolver {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StrategyEvolver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build this turn's strategy
    ///
    /// `recent` is the trailing ledger window, oldest first.
    pub fn evolve(
        &self,
        factors: &SituationFactors,
        recent: &[OutcomeRecord],
        genome: &Genome,
        archive: &StrategyArchive,
    ) -> Strategy {
        let base = base_policy(factors);

        let mut strategy = Strategy::new(base.primary_focus, base.secondary_focus);
        strategy.tactics = base.tactics;
        for tag in temperament_tactics(genome, factors, self.config.temperament_threshold) {
            if !strategy.tactics.contains(&tag) {
                strategy.tactics.push(tag);
            }
        }
        strategy.counter_tactics = counter_tactics(factors.enemy_behavior_pattern);
        strategy.parameters = focus_parameters(strategy.primary_focus, genome);

        if let Some(trigger) = innovation_trigger(recent, &self.config) {
            strategy.novel_elements = novel_elements(factors, recent, archive);
            strategy.innovation_level =
                (self.config.innovation_per_element * strategy.novel_elements.len() as f64).min(1.0);

            let risk = GenomeParam::RiskTolerance;
            let leaning = strategy
                .parameters
                .get(risk.as_str())
                .copied()
                .unwrap_or_else(|| genome.get(risk));
            strategy.parameters.insert(
                risk.as_str().to_string(),
                (leaning + NOVELTY_RISK_BIAS * strategy.innovation_level).clamp(0.0, 1.0),
            );

            info!(
                %trigger,
                novel = ?strategy.novel_elements,
                level = strategy.innovation_level,
                "innovating"
            );
        }

        debug!(
            phase = %factors.game_phase,
            pattern = %factors.enemy_behavior_pattern,
            primary = %strategy.primary_focus,
            secondary = %strategy.secondary_focus,
            tactics = strategy.tactics.len(),
            counters = strategy.counter_tactics.len(),
            novel = strategy.novel_elements.len(),
            "evolved strategy"
        );

        strategy
    }
}
