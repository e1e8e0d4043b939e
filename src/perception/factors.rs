//! Normalised situational factors produced once per turn

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::config::EngineConfig;
use crate::core::types::{unit_clamp, Turn};

/// Observed opponent play style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyPattern {
    Aggressive,
    Defensive,
    Economic,
    Rush,
    Turtle,
    #[default]
    Balanced,
    Predictable,
    AggressiveExpansion,
}

impl EnemyPattern {
    pub const ALL: [EnemyPattern; 8] = [
        EnemyPattern::Aggressive,
        EnemyPattern::Defensive,
        EnemyPattern::Economic,
        EnemyPattern::Rush,
        EnemyPattern::Turtle,
        EnemyPattern::Balanced,
        EnemyPattern::Predictable,
        EnemyPattern::AggressiveExpansion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyPattern::Aggressive => "aggressive",
            EnemyPattern::Defensive => "defensive",
            EnemyPattern::Economic => "economic",
            EnemyPattern::Rush => "rush",
            EnemyPattern::Turtle => "turtle",
            EnemyPattern::Balanced => "balanced",
            EnemyPattern::Predictable => "predictable",
            EnemyPattern::AggressiveExpansion => "aggressive_expansion",
        }
    }
}

impl fmt::Display for EnemyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyPattern::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown enemy pattern: {}", s))
    }
}

/// Coarse game phase, monotonic in turn count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Early,
    Mid,
    Late,
}

impl GamePhase {
    pub fn from_turn(turn: Turn, config: &EngineConfig) -> Self {
        if turn <= config.early_phase_last_turn {
            GamePhase::Early
        } else if turn <= config.mid_phase_last_turn {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Early => "early",
            GamePhase::Mid => "mid",
            GamePhase::Late => "late",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "early" => Ok(GamePhase::Early),
            "mid" => Ok(GamePhase::Mid),
            "late" => Ok(GamePhase::Late),
            other => Err(format!("unknown game phase: {}", other)),
        }
    }
}

/// Situational factors (ratios are 0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SituationFactors {
    #[serde(deserialize_with = "unit_ratio")]
    pub resource_abundance: f64,
    #[serde(deserialize_with = "unit_ratio")]
    pub military_pressure: f64,
    #[serde(deserialize_with = "unit_ratio")]
    pub expansion_opportunity: f64,
    #[serde(deserialize_with = "unit_ratio")]
    pub economic_potential: f64,
    #[serde(deserialize_with = "unit_ratio")]
    pub map_control: f64,
    pub enemy_behavior_pattern: EnemyPattern,
    pub game_phase: GamePhase,
}

impl Default for SituationFactors {
    fn default() -> Self {
        Self {
            resource_abundance: 0.5,
            military_pressure: 0.5,
            expansion_opportunity: 0.5,
            economic_potential: 0.5,
            map_control: 0.5,
            enemy_behavior_pattern: EnemyPattern::Balanced,
            game_phase: GamePhase::Early,
        }
    }
}

impl SituationFactors {
    /// Build factors, clamping every ratio into [0, 1]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        resource_abundance: f64,
        military_pressure: f64,
        expansion_opportunity: f64,
        economic_potential: f64,
        map_control: f64,
        enemy_behavior_pattern: EnemyPattern,
        game_phase: GamePhase,
    ) -> Self {
        Self {
            resource_abundance: unit_clamp(resource_abundance),
            military_pressure: unit_clamp(military_pressure),
            expansion_opportunity: unit_clamp(expansion_opportunity),
            economic_potential: unit_clamp(economic_potential),
            map_control: unit_clamp(map_control),
            enemy_behavior_pattern,
            game_phase,
        }
    }

    pub fn with_phase(mut self, phase: GamePhase) -> Self {
        self.game_phase = phase;
        self
    }

    pub fn with_pattern(mut self, pattern: EnemyPattern) -> Self {
        self.enemy_behavior_pattern = pattern;
        self
    }

    pub fn with_resources(mut self, abundance: f64) -> Self {
        self.resource_abundance = unit_clamp(abundance);
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.military_pressure = unit_clamp(pressure);
        self
    }

    pub fn with_economy(mut self, potential: f64) -> Self {
        self.economic_potential = unit_clamp(potential);
        self
    }

    pub fn with_map_control(mut self, control: f64) -> Self {
        self.map_control = unit_clamp(control);
        self
    }

    pub fn with_expansion(mut self, opportunity: f64) -> Self {
        self.expansion_opportunity = unit_clamp(opportunity);
        self
    }
}

/// Stored factors pass through the same clamp as freshly analyzed ones
fn unit_ratio<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(unit_clamp)
}
