//! Strategy -> action intent translation
//!
//! Pure table lookup. Output order is fixed: base actions for the primary
//! focus, then tactic actions in tactic order, then novel-element actions in
//! novel order, then counter-tactic actions. Tags with no table entry add
//! nothing; the evolver may emit tags this table has not caught up with.

use tracing::trace;

use crate::actions::{ActionIntent, ActionKind};
use crate::strategy::tactics::{self, split_hybrid};
use crate::strategy::{Focus, Strategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionTranslator;

impl ActionTranslator {
    pub fn new() -> Self {
        Self
    }

    pub fn translate(&self, strategy: &Strategy) -> Vec<ActionIntent> {
        let mut actions = base_actions(strategy.primary_focus);

        for tag in &strategy.tactics {
            match tactic_actions(tag, "tactic") {
                Some(found) => actions.extend(found),
                None => trace!(tag = %tag, "no actions for tactic"),
            }
        }

        for tag in &strategy.novel_elements {
            match novel_or_hybrid_actions(tag) {
                Some(found) => actions.extend(found),
                None => trace!(tag = %tag, "no actions for novel element"),
            }
        }

        for tag in &strategy.counter_tactics {
            match tactic_actions(tag, "counter") {
                Some(found) => actions.extend(found),
                None => trace!(tag = %tag, "no actions for counter-tactic"),
            }
        }

        actions
    }
}

fn base_actions(focus: Focus) -> Vec<ActionIntent> {
    let intent = match focus {
        Focus::AdaptiveExploration => {
            ActionIntent::new(ActionKind::Explore, "adaptive exploration").with_target("optimal_path")
        }
        Focus::DefensiveConsolidation => {
            ActionIntent::new(ActionKind::Fortify, "defensive consolidation").with_param("priority", "high")
        }
        Focus::SituationalDominance => {
            ActionIntent::new(ActionKind::Expand, "situational dominance").with_param("method", "strategic")
        }
        Focus::VictoryConditionPursuit => {
            ActionIntent::new(ActionKind::VictoryPush, "victory pursuit").with_param("condition", "optimal")
        }
        Focus::OpportunisticResourceGrab => {
            ActionIntent::new(ActionKind::SecureResources, "opportunistic resource grab")
                .with_target("nearest_resource")
        }
        Focus::StrategicPositioning => {
            ActionIntent::new(ActionKind::Capture, "strategic positioning").with_target("contested_locations")
        }
        Focus::OpponentElimination => {
            ActionIntent::new(ActionKind::Attack, "opponent elimination").with_target("enemy_main_force")
        }
    };
    vec![intent]
}

/// Phase, temperament and counter-tactic table
fn tactic_actions(tag: &str, source: &str) -> Option<Vec<ActionIntent>> {
    let why = format!("{}: {}", source, tag);
    let act = |kind: ActionKind| ActionIntent::new(kind, why.clone());

    let actions = match tag {
        tactics::AGGRESSIVE_RESOURCE_MONOPOLIZATION => vec![act(ActionKind::SecureResources)
            .with_target("all_resources")
            .with_param("urgency", "high")],
        tactics::EFFICIENT_RESOURCE_CONSERVATION => vec![act(ActionKind::ConserveResources)],
        tactics::BALANCED_RESOURCE_ACQUISITION => {
            vec![act(ActionKind::SecureResources).with_target("nearest_resource")]
        }
        tactics::EARLY_MILITARY_PREPARATION => vec![
            act(ActionKind::Recruit).with_param("priority", "high"),
            act(ActionKind::Fortify).with_target("castle"),
        ],
        tactics::RAPID_EXPANSION => vec![
            act(ActionKind::Capture).with_target("nearest_neutral"),
            act(ActionKind::Explore).with_target("frontier"),
        ],
        tactics::ECONOMIC_ACCELERATION => vec![act(ActionKind::BoostEconomy).with_param("method", "rapid")],
        tactics::DELAYED_MILITARY_BUILDUP => vec![act(ActionKind::Recruit).with_param("amount", "small")],
        tactics::IMMEDIATE_MILITARY_FOCUS => vec![act(ActionKind::Recruit).with_param("priority", "high")],
        tactics::TERRITORIAL_DEFENSE => vec![act(ActionKind::Fortify).with_target("owned_locations")],
        tactics::COUNTER_AGGRESSIVE_POSITIONING => {
            vec![act(ActionKind::DefensiveCounter).with_param("style", "aggressive")]
        }
        tactics::ECONOMIC_DISRUPTION => vec![act(ActionKind::Raid).with_target("enemy_economy")],
        tactics::PRESSURE_APPLICATION => vec![act(ActionKind::Attack)
            .with_target("enemy_outposts")
            .with_param("intensity", "measured")],
        tactics::TERRITORIAL_CONSOLIDATION => vec![
            act(ActionKind::Fortify).with_target("owned_locations"),
            act(ActionKind::BoostEconomy),
        ],
        tactics::DECISIVE_STRIKE => vec![act(ActionKind::Attack)
            .with_target("enemy_main_force")
            .with_param("commitment", "full")],
        tactics::GRADUAL_DOMINANCE => vec![
            act(ActionKind::Capture).with_target("contested_locations"),
            act(ActionKind::Recruit),
        ],
        tactics::RELENTLESS_RAIDING => vec![act(ActionKind::Raid).with_target("enemy_locations")],
        tactics::FORTIFIED_OUTPOSTS => vec![act(ActionKind::Fortify).with_target("frontier")],
        tactics::DEEP_SCOUTING => vec![act(ActionKind::Scout).with_target("unexplored")],

        tactics::EARLY_DEFENSE => vec![act(ActionKind::Fortify).with_target("castle")],
        tactics::ECONOMIC_BUILDUP | tactics::ECONOMIC_ADVANTAGE => vec![act(ActionKind::BoostEconomy)],
        tactics::COUNTER_ATTACK => vec![act(ActionKind::Attack)
            .with_target("enemy_army")
            .with_param("timing", "after_enemy_commits")],
        tactics::MAP_CONTROL => vec![act(ActionKind::Capture).with_target("contested_locations")],
        tactics::SLOW_PRESSURE => vec![act(ActionKind::Attack)
            .with_target("enemy_outposts")
            .with_param("intensity", "low")],
        tactics::EARLY_HARASSMENT => vec![act(ActionKind::Raid).with_target("enemy_economy")],
        tactics::RESOURCE_DENIAL => vec![act(ActionKind::Capture).with_target("enemy_resource_sites")],
        tactics::MILITARY_PRESSURE => vec![act(ActionKind::Attack).with_target("enemy_outposts")],
        tactics::SELECTIVE_BLOCKING => vec![act(ActionKind::Capture).with_target("chokepoints")],
        tactics::QUALITY_OVER_QUANTITY => vec![act(ActionKind::Recruit).with_param("unit", "elite")],
        tactics::STRATEGIC_RETREATS => vec![act(ActionKind::Retreat)],
        tactics::DEFENSIVE_DEPTH => vec![act(ActionKind::Fortify)
            .with_target("owned_locations")
            .with_param("layers", "2")],
        tactics::ATTRITION_TRADING => vec![act(ActionKind::DefensiveCounter).with_param("style", "attrition")],
        tactics::EXPLOIT_TIMING_WINDOWS => vec![act(ActionKind::Ambush).with_param("timing", "enemy_cycle")],
        tactics::AMBUSH_KNOWN_ROUTES => vec![act(ActionKind::Ambush).with_target("known_routes")],
        _ => return None,
    };
    Some(actions)
}

fn novel_actions(tag: &str, why: &str) -> Option<Vec<ActionIntent>> {
    let act = |kind: ActionKind| ActionIntent::new(kind, why.to_string());

    let actions = match tag {
        tactics::RESOURCE_FLOODING => {
            vec![act(ActionKind::ResourceOverwhelm).with_param("method", "flooding")]
        }
        tactics::PATTERN_BREAKING_CHAOS => {
            vec![act(ActionKind::RandomManeuver).with_param("predictability", "none")]
        }
        tactics::HIDDEN_ECONOMIC_EMPIRE => {
            vec![act(ActionKind::StealthDevelopment).with_param("visibility", "minimal")]
        }
        tactics::FLANKING_GAMBIT => vec![act(ActionKind::Attack)
            .with_target("enemy_flank")
            .with_param("approach", "flank")],
        tactics::DECOY_EXPEDITION => vec![
            act(ActionKind::Explore).with_target("decoy_route"),
            act(ActionKind::Ambush).with_target("pursuers"),
        ],
        tactics::TEMPO_SACRIFICE => vec![
            act(ActionKind::ConserveResources),
            act(ActionKind::Recruit).with_param("amount", "large"),
        ],
        _ => return None,
    };
    Some(actions)
}

/// Hybrid halves may name either a novel element or a tactic
fn novel_or_hybrid_actions(tag: &str) -> Option<Vec<ActionIntent>> {
    match split_hybrid(tag) {
        Some((first, second)) => {
            let why = format!("hybrid: {}", tag);
            let half = |part: &str| {
                novel_actions(part, &why).or_else(|| {
                    tactic_actions(part, "hybrid").map(|found| {
                        found
                            .into_iter()
                            .map(|mut intent| {
                                intent.reasoning = why.clone();
                                intent
                            })
                            .collect()
                    })
                })
            };
            match (half(first), half(second)) {
                (None, None) => None,
                (a, b) => Some(a.into_iter().chain(b).flatten().collect()),
            }
        }
        None => novel_actions(tag, &format!("novel: {}", tag)),
    }
}
