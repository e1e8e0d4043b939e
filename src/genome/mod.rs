//! Strategy genome: bounded parameters steering strategy selection
//!
//! Every value lives in [0, 1] at all times. The genome serialises as a
//! plain name -> value map; unknown names are dropped and missing names
//! fall back to their defaults on load.

pub mod store;

pub use store::GenomeStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;
use crate::core::types::unit_clamp;

/// Named genome parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenomeParam {
    ExplorationWeight,
    ResourceWeight,
    MilitaryWeight,
    EconomicWeight,
    RiskTolerance,
    AggressionLevel,
    ExpansionPriority,
    DefensiveStance,
}

impl GenomeParam {
    pub const COUNT: usize = 8;

    pub const ALL: [GenomeParam; Self::COUNT] = [
        GenomeParam::ExplorationWeight,
        GenomeParam::ResourceWeight,
        GenomeParam::MilitaryWeight,
        GenomeParam::EconomicWeight,
        GenomeParam::RiskTolerance,
        GenomeParam::AggressionLevel,
        GenomeParam::ExpansionPriority,
        GenomeParam::DefensiveStance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeParam::ExplorationWeight => "exploration_weight",
            GenomeParam::ResourceWeight => "resource_weight",
            GenomeParam::MilitaryWeight => "military_weight",
            GenomeParam::EconomicWeight => "economic_weight",
            GenomeParam::RiskTolerance => "risk_tolerance",
            GenomeParam::AggressionLevel => "aggression_level",
            GenomeParam::ExpansionPriority => "expansion_priority",
            GenomeParam::DefensiveStance => "defensive_stance",
        }
    }

    /// Starting value for a fresh genome
    pub fn default_value(&self) -> f64 {
        match self {
            GenomeParam::ExplorationWeight => 0.5,
            GenomeParam::ResourceWeight => 0.3,
            GenomeParam::MilitaryWeight => 0.7,
            GenomeParam::EconomicWeight => 0.4,
            GenomeParam::RiskTolerance => 0.6,
            GenomeParam::AggressionLevel => 0.5,
            GenomeParam::ExpansionPriority => 0.4,
            GenomeParam::DefensiveStance => 0.3,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for GenomeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenomeParam {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenomeParam::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| EngineError::InvalidParameter(s.to_string()))
    }
}

/// A full set of genome values, each within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct Genome {
    values: [f64; GenomeParam::COUNT],
}

impl Default for Genome {
    fn default() -> Self {
        let mut values = [0.0; GenomeParam::COUNT];
        for param in GenomeParam::ALL {
            values[param.index()] = param.default_value();
        }
        Self { values }
    }
}

impl Genome {
    pub fn get(&self, param: GenomeParam) -> f64 {
        self.values[param.index()]
    }

    /// Set a value, clamping into [0, 1]
    pub fn set(&mut self, param: GenomeParam, value: f64) {
        self.values[param.index()] = unit_clamp(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (GenomeParam, f64)> + '_ {
        GenomeParam::ALL.iter().map(move |p| (*p, self.get(*p)))
    }
}

impl From<BTreeMap<String, f64>> for Genome {
    fn from(map: BTreeMap<String, f64>) -> Self {
        let mut genome = Genome::default();
        for (name, value) in map {
            if let Ok(param) = name.parse::<GenomeParam>() {
                genome.set(param, value);
            }
        }
        genome
    }
}

impl From<Genome> for BTreeMap<String, f64> {
    fn from(genome: Genome) -> Self {
        genome
            .iter()
            .map(|(param, value)| (param.as_str().to_string(), value))
            .collect()
    }
}
