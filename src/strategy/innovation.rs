//! Innovation gate and novelty generation
//!
//! The gate is a hard rule over the trailing ledger window, not a dice
//! roll. Once it fires, situational rules pick novel elements; a hybrid of
//! the two latest archived successes is added when available, and a fixed
//! experimental pool guarantees at least one element otherwise.

use std::fmt;

use crate::core::config::EngineConfig;
use crate::learning::archive::StrategyArchive;
use crate::ledger::OutcomeRecord;
use crate::perception::{EnemyPattern, SituationFactors};
use crate::strategy::tactics;
use crate::strategy::types::Focus;

/// Why the gate fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InnovationTrigger {
    /// Too many recent turns at or below the success threshold
    RepeatedFailure { failures: usize },
    /// The same primary focus for the whole stagnation window
    Stagnation { focus: Focus },
}

impl fmt::Display for InnovationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InnovationTrigger::RepeatedFailure { failures } => write!(f, "repeated failure ({} recent)", failures),
            InnovationTrigger::Stagnation { focus } => write!(f, "stagnation on {}", focus),
        }
    }
}

fn tail(records: &[OutcomeRecord], window: usize) -> &[OutcomeRecord] {
    &records[records.len().saturating_sub(window)..]
}

/// Evaluate the gate. Repeated failure is checked before stagnation.
pub fn innovation_trigger(recent: &[OutcomeRecord], config: &EngineConfig) -> Option<InnovationTrigger> {
    if recent.len() < config.innovation_min_history {
        return None;
    }

    let failures = tail(recent, config.failure_window)
        .iter()
        .filter(|r| r.effectiveness <= config.success_threshold)
        .count();
    if failures >= config.failure_trigger {
        return Some(InnovationTrigger::RepeatedFailure { failures });
    }

    if config.stagnation_window > 0 && recent.len() >= config.stagnation_window {
        let window = tail(recent, config.stagnation_window);
        let focus = window[0].strategy.primary_focus;
        if window.iter().all(|r| r.strategy.primary_focus == focus) {
            return Some(InnovationTrigger::Stagnation { focus });
        }
    }

    None
}

pub fn should_innovate(recent: &[OutcomeRecord], config: &EngineConfig) -> bool {
    innovation_trigger(recent, config).is_some()
}

/// Novel elements for this situation, never empty
pub fn novel_elements(
    factors: &SituationFactors,
    recent: &[OutcomeRecord],
    archive: &StrategyArchive,
) -> Vec<String> {
    let mut novel = Vec::new();

    if factors.resource_abundance > 0.5 && factors.military_pressure < 0.3 {
        novel.push(tactics::RESOURCE_FLOODING.to_string());
    }
    if factors.enemy_behavior_pattern == EnemyPattern::Predictable {
        novel.push(tactics::PATTERN_BREAKING_CHAOS.to_string());
    }
    if factors.map_control < 0.3 && factors.economic_potential > 0.6 {
        novel.push(tactics::HIDDEN_ECONOMIC_EMPIRE.to_string());
    }
    if let Some(tag) = hybrid_of_recent_successes(archive) {
        novel.push(tag);
    }
    if novel.is_empty() {
        novel.push(untried_approach(recent).to_string());
    }

    novel
}

/// `hybrid:<a>+<b>` from the two latest successes, older first.
///
/// When both share a signature the newer half falls back to the first
/// element of either strategy that differs from it.
pub fn hybrid_of_recent_successes(archive: &StrategyArchive) -> Option<String> {
    let (older, newer) = archive.last_two_successes()?;
    let first = older.strategy.signature_element();
    let mut second = newer.strategy.signature_element();
    if second == first {
        second = newer
            .strategy
            .elements()
            .chain(older.strategy.elements())
            .find(|e| *e != first)
            .unwrap_or(second);
    }
    Some(tactics::hybrid(first, second))
}

/// First experimental approach no recent strategy used; cycles through
/// the pool by history length once all have been tried.
pub fn untried_approach(recent: &[OutcomeRecord]) -> &'static str {
    tactics::EXPERIMENTAL_POOL
        .iter()
        .copied()
        .find(|tag| !recent.iter().any(|r| r.strategy.uses(tag)))
        .unwrap_or(tactics::EXPERIMENTAL_POOL[recent.len() % tactics::EXPERIMENTAL_POOL.len()])
}
