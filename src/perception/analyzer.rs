//! Converts a raw game-state snapshot into situational factors
//!
//! The analyzer is a pure function of the snapshot. Every field is optional;
//! anything missing or malformed degrades to a documented default so a bad
//! perception never stops decision-making.
//!
//! Recognised keys:
//! - `turn`: current turn number (default 1)
//! - `phase`: declared phase, overrides `turn`
//! - `own_resources` / `enemy_resources`: name -> amount
//! - `own_army` / `enemy_army`: unit -> count
//! - `locations`: name -> `{ "owner": "own" | "enemy" | null, "income": n }`
//! - `enemy_recent_actions`: list of observed enemy action words
//! - `enemy_pattern`: declared opponent pattern, overrides inference

use serde_json::{Map, Value};

use crate::core::config::EngineConfig;
use crate::core::types::{unit_clamp, Turn};
use crate::perception::factors::{EnemyPattern, GamePhase, SituationFactors};

/// Gold-equivalent value of one unit of any non-gold resource
pub const RESOURCE_GOLD_EQUIVALENT: f64 = 100.0;

/// Resource value at which abundance reads 0.5
pub const RESOURCE_REFERENCE_VALUE: f64 = 3000.0;

/// Factor used whenever the inputs for a ratio are missing
pub const DEFAULT_FACTOR: f64 = 0.5;

/// Minimum repetitions before a periodic enemy is called predictable
const MIN_PERIODIC_REPEATS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionCategory {
    Attack,
    Expansion,
    Defence,
    Economy,
}

fn classify_action(word: &str) -> Option<ActionCategory> {
    const ATTACK: [&str; 4] = ["attack", "raid", "siege", "strike"];
    const EXPANSION: [&str; 4] = ["capture", "expand", "claim", "settle"];
    const DEFENCE: [&str; 4] = ["recruit", "fortify", "defend", "garrison"];
    const ECONOMY: [&str; 4] = ["build", "trade", "economy", "harvest"];

    let word = word.to_ascii_lowercase();
    if ATTACK.iter().any(|k| word.contains(k)) {
        Some(ActionCategory::Attack)
    } else if EXPANSION.iter().any(|k| word.contains(k)) {
        Some(ActionCategory::Expansion)
    } else if DEFENCE.iter().any(|k| word.contains(k)) {
        Some(ActionCategory::Defence)
    } else if ECONOMY.iter().any(|k| word.contains(k)) {
        Some(ActionCategory::Economy)
    } else {
        None
    }
}

/// Stateless situation analyzer
#[derive(Debug, Clone)]
pub struct SituationAnalyzer {
    early_phase_last_turn: u32,
    mid_phase_last_turn: u32,
}

impl Default for SituationAnalyzer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SituationAnalyzer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            early_phase_last_turn: config.early_phase_last_turn,
            mid_phase_last_turn: config.mid_phase_last_turn,
        }
    }

    /// Analyze a snapshot. Total over any JSON value.
    pub fn analyze(&self, raw: &Value) -> SituationFactors {
        let game_phase = self.game_phase(raw);

        let own_value = resource_value(object_field(raw, "own_resources"));
        let enemy_value = resource_value(object_field(raw, "enemy_resources"));

        let resource_abundance = match own_value {
            Some(v) => v / (v + RESOURCE_REFERENCE_VALUE),
            None => DEFAULT_FACTOR,
        };

        let military_pressure = {
            let own = army_total(object_field(raw, "own_army"));
            let enemy = army_total(object_field(raw, "enemy_army"));
            match (own, enemy) {
                (None, None) => DEFAULT_FACTOR,
                (own, enemy) => share(enemy.unwrap_or(0.0), own.unwrap_or(0.0)),
            }
        };

        let sites = LocationSummary::from_field(object_field(raw, "locations"));
        let (expansion_opportunity, map_control) = if sites.total == 0 {
            (DEFAULT_FACTOR, DEFAULT_FACTOR)
        } else {
            let total = sites.total as f64;
            (sites.neutral as f64 / total, sites.own as f64 / total)
        };

        let economic_potential = if sites.own_income + sites.enemy_income > 0.0 {
            share(sites.own_income, sites.enemy_income)
        } else {
            match (own_value, enemy_value) {
                (Some(own), Some(enemy)) => share(own, enemy),
                _ => DEFAULT_FACTOR,
            }
        };

        SituationFactors {
            resource_abundance: unit_clamp(resource_abundance),
            military_pressure: unit_clamp(military_pressure),
            expansion_opportunity: unit_clamp(expansion_opportunity),
            economic_potential: unit_clamp(economic_potential),
            map_control: unit_clamp(map_control),
            enemy_behavior_pattern: self.enemy_pattern(raw, game_phase),
            game_phase,
        }
    }

    /// Turn number reported by the snapshot (default 1)
    pub fn turn_of(raw: &Value) -> Turn {
        raw.get("turn")
            .and_then(non_negative)
            .map(|t| (t.floor() as Turn).max(1))
            .unwrap_or(1)
    }

    fn game_phase(&self, raw: &Value) -> GamePhase {
        if let Some(declared) = raw.get("phase").and_then(Value::as_str) {
            match declared.parse() {
                Ok(phase) => return phase,
                Err(e) => tracing::warn!("Ignoring declared phase: {}", e),
            }
        }

        let turn = Self::turn_of(raw);
        if turn <= self.early_phase_last_turn {
            GamePhase::Early
        } else if turn <= self.mid_phase_last_turn {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    fn enemy_pattern(&self, raw: &Value, phase: GamePhase) -> EnemyPattern {
        if let Some(declared) = raw.get("enemy_pattern").and_then(Value::as_str) {
            match declared.parse() {
                Ok(pattern) => return pattern,
                Err(e) => tracing::warn!("Ignoring declared enemy pattern: {}", e),
            }
        }

        let actions: Vec<String> = match raw.get("enemy_recent_actions") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_ascii_lowercase)
                .collect(),
            Some(_) => {
                tracing::warn!("enemy_recent_actions is not a list, assuming balanced opponent");
                Vec::new()
            }
            None => Vec::new(),
        };

        infer_pattern(&actions, phase)
    }
}

/// Pattern inference rules, evaluated in order, first match wins
fn infer_pattern(actions: &[String], phase: GamePhase) -> EnemyPattern {
    if actions.is_empty() {
        return EnemyPattern::Balanced;
    }

    let count = |category: ActionCategory| {
        actions
            .iter()
            .filter(|a| classify_action(a) == Some(category))
            .count()
    };
    let n = actions.len() as f64;
    let attacks = count(ActionCategory::Attack);
    let attack_share = attacks as f64 / n;
    let expansion_share = count(ActionCategory::Expansion) as f64 / n;
    let defence_share = count(ActionCategory::Defence) as f64 / n;
    let economy_share = count(ActionCategory::Economy) as f64 / n;

    if expansion_share >= 0.5 && attacks > 0 {
        EnemyPattern::AggressiveExpansion
    } else if attack_share > 0.5 {
        if phase == GamePhase::Early {
            EnemyPattern::Rush
        } else {
            EnemyPattern::Aggressive
        }
    } else if defence_share > 0.6 {
        EnemyPattern::Turtle
    } else if defence_share > 0.4 {
        EnemyPattern::Defensive
    } else if economy_share > 0.5 {
        EnemyPattern::Economic
    } else if is_periodic(actions) {
        EnemyPattern::Predictable
    } else {
        EnemyPattern::Balanced
    }
}

/// True if the sequence repeats with a period of 1 to 3 at least twice over
fn is_periodic(actions: &[String]) -> bool {
    (1..=3).any(|period| {
        actions.len() >= period * MIN_PERIODIC_REPEATS
            && (period..actions.len()).all(|i| actions[i] == actions[i - period])
    })
}

fn non_negative(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
}

/// `part / (part + rest)`, or the default when both are zero
fn share(part: f64, rest: f64) -> f64 {
    let total = part + rest;
    if total > 0.0 {
        part / total
    } else {
        DEFAULT_FACTOR
    }
}

fn object_field<'a>(raw: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    match raw.get(key) {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(_) => {
            tracing::warn!("Snapshot field '{}' is not a mapping, using defaults", key);
            None
        }
    }
}

fn resource_value(resources: Option<&Map<String, Value>>) -> Option<f64> {
    resources.map(|map| {
        map.iter()
            .map(|(name, amount)| {
                let amount = non_negative(amount).unwrap_or(0.0);
                if name == "gold" {
                    amount
                } else {
                    amount * RESOURCE_GOLD_EQUIVALENT
                }
            })
            .sum()
    })
}

fn army_total(army: Option<&Map<String, Value>>) -> Option<f64> {
    army.map(|map| map.values().filter_map(non_negative).sum())
}

#[derive(Debug, Default)]
struct LocationSummary {
    total: usize,
    own: usize,
    neutral: usize,
    own_income: f64,
    enemy_income: f64,
}

impl LocationSummary {
    fn from_field(locations: Option<&Map<String, Value>>) -> Self {
        let mut summary = Self::default();
        let Some(locations) = locations else {
            return summary;
        };

        for site in locations.values() {
            summary.total += 1;
            let income = site.get("income").and_then(non_negative).unwrap_or(0.0);
            match site.get("owner").and_then(Value::as_str) {
                Some("own") => {
                    summary.own += 1;
                    summary.own_income += income;
                }
                Some("enemy") => summary.enemy_income += income,
                _ => summary.neutral += 1,
            }
        }
        summary
    }
}
