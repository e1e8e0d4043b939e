//! Phase-specific base policies
//!
//! Each game phase has its own rule set for picking a focus pair and the
//! opening tactics:
//! - Early: resource posture, then pressure response
//! - Mid: economy versus military, then an answer to the enemy's style
//! - Late: consolidate, strike or grind

use std::collections::BTreeMap;

use crate::genome::{Genome, GenomeParam};
use crate::perception::{EnemyPattern, GamePhase, SituationFactors};
use crate::strategy::tactics;
use crate::strategy::types::Focus;

/// Focus pair and tactics chosen by a phase policy
#[derive(Debug, Clone, PartialEq)]
pub struct BasePolicy {
    pub primary_focus: Focus,
    pub secondary_focus: Focus,
    pub tactics: Vec<String>,
}

impl BasePolicy {
    fn new(primary_focus: Focus, secondary_focus: Focus) -> Self {
        Self {
            primary_focus,
            secondary_focus,
            tactics: Vec::new(),
        }
    }

    fn push(&mut self, tag: &str) {
        if !self.tactics.iter().any(|t| t == tag) {
            self.tactics.push(tag.to_string());
        }
    }
}

/// Dispatch on the factors' phase
pub fn base_policy(factors: &SituationFactors) -> BasePolicy {
    match factors.game_phase {
        GamePhase::Early => early_game(factors),
        GamePhase::Mid => mid_game(factors),
        GamePhase::Late => late_game(factors),
    }
}

pub fn early_game(factors: &SituationFactors) -> BasePolicy {
    let mut policy = BasePolicy::new(Focus::AdaptiveExploration, Focus::OpportunisticResourceGrab);

    if factors.resource_abundance > 0.7 {
        policy.push(tactics::AGGRESSIVE_RESOURCE_MONOPOLIZATION);
    } else if factors.resource_abundance < 0.3 {
        policy.push(tactics::EFFICIENT_RESOURCE_CONSERVATION);
    } else {
        policy.push(tactics::BALANCED_RESOURCE_ACQUISITION);
    }

    if factors.military_pressure > 0.6 {
        policy.push(tactics::EARLY_MILITARY_PREPARATION);
        policy.primary_focus = Focus::DefensiveConsolidation;
    } else if factors.military_pressure < 0.2 {
        policy.push(tactics::RAPID_EXPANSION);
    }

    policy
}

pub fn mid_game(factors: &SituationFactors) -> BasePolicy {
    let mut policy = BasePolicy::new(Focus::SituationalDominance, Focus::StrategicPositioning);

    if factors.economic_potential > factors.military_pressure {
        policy.push(tactics::ECONOMIC_ACCELERATION);
        policy.push(tactics::DELAYED_MILITARY_BUILDUP);
    } else {
        policy.push(tactics::IMMEDIATE_MILITARY_FOCUS);
        policy.push(tactics::TERRITORIAL_DEFENSE);
    }

    match factors.enemy_behavior_pattern {
        EnemyPattern::Aggressive => policy.push(tactics::COUNTER_AGGRESSIVE_POSITIONING),
        EnemyPattern::Economic => policy.push(tactics::ECONOMIC_DISRUPTION),
        EnemyPattern::Defensive => policy.push(tactics::PRESSURE_APPLICATION),
        _ => {}
    }

    policy
}

pub fn late_game(factors: &SituationFactors) -> BasePolicy {
    let mut policy = BasePolicy::new(Focus::VictoryConditionPursuit, Focus::OpponentElimination);

    if factors.map_control > 0.7 {
        policy.push(tactics::TERRITORIAL_CONSOLIDATION);
    } else if factors.military_pressure > 0.8 {
        policy.push(tactics::DECISIVE_STRIKE);
    } else {
        policy.push(tactics::GRADUAL_DOMINANCE);
    }

    policy
}

/// Tactics contributed by strongly expressed genome traits
///
/// Scouting only pays off while there is unclaimed ground to find.
pub fn temperament_tactics(genome: &Genome, factors: &SituationFactors, threshold: f64) -> Vec<String> {
    let mut found = Vec::new();
    if genome.get(GenomeParam::AggressionLevel) > threshold {
        found.push(tactics::RELENTLESS_RAIDING.to_string());
    }
    if genome.get(GenomeParam::DefensiveStance) > threshold {
        found.push(tactics::FORTIFIED_OUTPOSTS.to_string());
    }
    if genome.get(GenomeParam::ExplorationWeight) > threshold && factors.expansion_opportunity > 0.5 {
        found.push(tactics::DEEP_SCOUTING.to_string());
    }
    found
}

/// How far each focus pulls genome parameters
const FOCUS_BIASES: [(Focus, &[(GenomeParam, f64)]); 4] = [
    (
        Focus::AdaptiveExploration,
        &[(GenomeParam::ExplorationWeight, 0.2), (GenomeParam::ExpansionPriority, 0.1)],
    ),
    (
        Focus::DefensiveConsolidation,
        &[
            (GenomeParam::DefensiveStance, 0.2),
            (GenomeParam::RiskTolerance, -0.1),
            (GenomeParam::MilitaryWeight, 0.1),
        ],
    ),
    (
        Focus::SituationalDominance,
        &[(GenomeParam::EconomicWeight, 0.1), (GenomeParam::MilitaryWeight, 0.1)],
    ),
    (
        Focus::VictoryConditionPursuit,
        &[(GenomeParam::AggressionLevel, 0.2), (GenomeParam::RiskTolerance, 0.1)],
    ),
];

/// Parameter values the strategy leans toward: the genome's current value
/// shifted by the focus bias, clamped to [0, 1]. Secondary foci carry no
/// bias and produce an empty map.
pub fn focus_parameters(focus: Focus, genome: &Genome) -> BTreeMap<String, f64> {
    FOCUS_BIASES
        .iter()
        .find(|(f, _)| *f == focus)
        .map(|(_, biases)| {
            biases
                .iter()
                .map(|(param, bias)| {
                    let value = (genome.get(*param) + bias).clamp(0.0, 1.0);
                    (param.as_str().to_string(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn early(abundance: f64, pressure: f64) -> SituationFactors {
        SituationFactors::default()
            .with_phase(GamePhase::Early)
            .with_resources(abundance)
            .with_pressure(pressure)
    }

    #[test]
    fn test_early_abundant_and_calm() {
        let policy = early_game(&early(0.8, 0.1));
        assert_eq!(policy.primary_focus, Focus::AdaptiveExploration);
        assert_eq!(
            policy.tactics,
            vec![tactics::AGGRESSIVE_RESOURCE_MONOPOLIZATION, tactics::RAPID_EXPANSION]
        );
    }

    #[test]
    fn test_early_under_pressure_turns_defensive() {
        let policy = early_game(&early(0.2, 0.7));
        assert_eq!(policy.primary_focus, Focus::DefensiveConsolidation);
        assert!(policy.tactics.contains(&tactics::EFFICIENT_RESOURCE_CONSERVATION.to_string()));
        assert!(policy.tactics.contains(&tactics::EARLY_MILITARY_PREPARATION.to_string()));
    }

    #[test]
    fn test_early_boundaries_are_exclusive() {
        let policy = early_game(&early(0.7, 0.6));
        assert_eq!(policy.primary_focus, Focus::AdaptiveExploration);
        assert_eq!(policy.tactics, vec![tactics::BALANCED_RESOURCE_ACQUISITION]);
    }

    #[test]
    fn test_mid_economy_against_aggressor() {
        let factors = SituationFactors::default()
            .with_phase(GamePhase::Mid)
            .with_economy(0.7)
            .with_pressure(0.4)
            .with_pattern(EnemyPattern::Aggressive);
        let policy = mid_game(&factors);
        assert_eq!(policy.primary_focus, Focus::SituationalDominance);
        assert_eq!(
            policy.tactics,
            vec![
                tactics::ECONOMIC_ACCELERATION,
                tactics::DELAYED_MILITARY_BUILDUP,
                tactics::COUNTER_AGGRESSIVE_POSITIONING
            ]
        );
    }

    #[test]
    fn test_mid_tie_goes_military() {
        let factors = SituationFactors::default().with_phase(GamePhase::Mid);
        let policy = mid_game(&factors);
        assert_eq!(policy.tactics[0], tactics::IMMEDIATE_MILITARY_FOCUS);
    }

    #[test]
    fn test_late_rules() {
        let base = SituationFactors::default().with_phase(GamePhase::Late);
        assert_eq!(
            late_game(&base.with_map_control(0.8)).tactics,
            vec![tactics::TERRITORIAL_CONSOLIDATION]
        );
        assert_eq!(late_game(&base.with_pressure(0.9)).tactics, vec![tactics::DECISIVE_STRIKE]);
        assert_eq!(late_game(&base).tactics, vec![tactics::GRADUAL_DOMINANCE]);
        assert_eq!(late_game(&base).primary_focus, Focus::VictoryConditionPursuit);
    }

    #[test]
    fn test_default_genome_has_no_temperament() {
        let factors = SituationFactors::default();
        assert!(temperament_tactics(&Genome::default(), &factors, 0.7).is_empty());
    }

    #[test]
    fn test_strong_aggression_adds_raiding() {
        let mut genome = Genome::default();
        genome.set(GenomeParam::AggressionLevel, 0.9);
        let factors = SituationFactors::default();
        assert_eq!(temperament_tactics(&genome, &factors, 0.7), vec![tactics::RELENTLESS_RAIDING]);
    }

    #[test]
    fn test_scouting_needs_open_ground() {
        let mut genome = Genome::default();
        genome.set(GenomeParam::ExplorationWeight, 0.9);
        let closed = SituationFactors::default().with_expansion(0.2);
        let open = SituationFactors::default().with_expansion(0.8);
        assert!(temperament_tactics(&genome, &closed, 0.7).is_empty());
        assert_eq!(temperament_tactics(&genome, &open, 0.7), vec![tactics::DEEP_SCOUTING]);
    }

    #[test]
    fn test_focus_parameters_clamped() {
        let mut genome = Genome::default();
        genome.set(GenomeParam::ExplorationWeight, 0.95);
        let params = focus_parameters(Focus::AdaptiveExploration, &genome);
        assert_eq!(params["exploration_weight"], 1.0);
        assert!((params["expansion_priority"] - 0.5).abs() < 1e-12);
        assert!(focus_parameters(Focus::OpponentElimination, &genome).is_empty());
    }
}
