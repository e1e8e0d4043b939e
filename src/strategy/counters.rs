//! Static counter-tactic table keyed by observed enemy pattern

use crate::perception::EnemyPattern;
use crate::strategy::tactics;

const COUNTER_TABLE: [(EnemyPattern, &[&str]); 6] = [
    (
        EnemyPattern::Rush,
        &[tactics::EARLY_DEFENSE, tactics::ECONOMIC_BUILDUP, tactics::COUNTER_ATTACK],
    ),
    (
        EnemyPattern::Turtle,
        &[tactics::ECONOMIC_ADVANTAGE, tactics::MAP_CONTROL, tactics::SLOW_PRESSURE],
    ),
    (
        EnemyPattern::Economic,
        &[tactics::EARLY_HARASSMENT, tactics::RESOURCE_DENIAL, tactics::MILITARY_PRESSURE],
    ),
    (
        EnemyPattern::AggressiveExpansion,
        &[
            tactics::SELECTIVE_BLOCKING,
            tactics::QUALITY_OVER_QUANTITY,
            tactics::STRATEGIC_RETREATS,
        ],
    ),
    (
        EnemyPattern::Aggressive,
        &[tactics::DEFENSIVE_DEPTH, tactics::ATTRITION_TRADING, tactics::COUNTER_ATTACK],
    ),
    (
        EnemyPattern::Predictable,
        &[tactics::EXPLOIT_TIMING_WINDOWS, tactics::AMBUSH_KNOWN_ROUTES],
    ),
];

/// Counter-tactics for a pattern; empty for patterns with no entry
pub fn counters_for(pattern: EnemyPattern) -> &'static [&'static str] {
    COUNTER_TABLE
        .iter()
        .find(|(p, _)| *p == pattern)
        .map(|(_, counters)| *counters)
        .unwrap_or(&[])
}

pub fn counter_tactics(pattern: EnemyPattern) -> Vec<String> {
    counters_for(pattern).iter().map(|t| t.to_string()).collect()
}
