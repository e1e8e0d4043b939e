//! Action intents handed to the external executor

pub mod translator;

pub use translator::ActionTranslator;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of executable action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Explore,
    Scout,
    Fortify,
    Expand,
    Capture,
    VictoryPush,
    SecureResources,
    ConserveResources,
    BoostEconomy,
    Recruit,
    Attack,
    Raid,
    DefensiveCounter,
    Retreat,
    Ambush,
    ResourceOverwhelm,
    StealthDevelopment,
    RandomManeuver,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Explore => "explore",
            ActionKind::Scout => "scout",
            ActionKind::Fortify => "fortify",
            ActionKind::Expand => "expand",
            ActionKind::Capture => "capture",
            ActionKind::VictoryPush => "victory_push",
            ActionKind::SecureResources => "secure_resources",
            ActionKind::ConserveResources => "conserve_resources",
            ActionKind::BoostEconomy => "boost_economy",
            ActionKind::Recruit => "recruit",
            ActionKind::Attack => "attack",
            ActionKind::Raid => "raid",
            ActionKind::DefensiveCounter => "defensive_counter",
            ActionKind::Retreat => "retreat",
            ActionKind::Ambush => "ambush",
            ActionKind::ResourceOverwhelm => "resource_overwhelm",
            ActionKind::StealthDevelopment => "stealth_development",
            ActionKind::RandomManeuver => "random_maneuver",
        }
    }

    /// True for kinds that commit troops against the enemy
    pub fn is_offensive(&self) -> bool {
        matches!(
            self,
            ActionKind::Attack | ActionKind::Raid | ActionKind::VictoryPush | ActionKind::Ambush
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete instruction for the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIntent {
    #[serde(rename = "action")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub reasoning: String,
}

impl ActionIntent {
    pub fn new(kind: ActionKind, reasoning: impl Into<String>) -> Self {
        Self {
            kind,
            target: None,
            parameters: BTreeMap::new(),
            reasoning: reasoning.into(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}
