//! Strategy decision record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::strategy::tactics::HYBRID_PREFIX;

/// High-level focus of a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    AdaptiveExploration,
    DefensiveConsolidation,
    SituationalDominance,
    VictoryConditionPursuit,
    OpportunisticResourceGrab,
    StrategicPositioning,
    OpponentElimination,
}

impl Focus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::AdaptiveExploration => "adaptive_exploration",
            Focus::DefensiveConsolidation => "defensive_consolidation",
            Focus::SituationalDominance => "situational_dominance",
            Focus::VictoryConditionPursuit => "victory_condition_pursuit",
            Focus::OpportunisticResourceGrab => "opportunistic_resource_grab",
            Focus::StrategicPositioning => "strategic_positioning",
            Focus::OpponentElimination => "opponent_elimination",
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn's chosen policy
///
/// `counter_tactics` and `novel_elements` are empty when absent and are
/// left out of the serialised form in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    pub primary_focus: Focus,
    pub secondary_focus: Focus,
    pub tactics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub counter_tactics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub novel_elements: Vec<String>,
    /// 0.0 to 1.0
    pub innovation_level: f64,
    /// Genome parameter name -> value this strategy leans toward
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, f64>,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new(Focus::AdaptiveExploration, Focus::OpportunisticResourceGrab)
    }
}

impl Strategy {
    pub fn new(primary_focus: Focus, secondary_focus: Focus) -> Self {
        Self {
            primary_focus,
            secondary_focus,
            tactics: Vec::new(),
            counter_tactics: Vec::new(),
            novel_elements: Vec::new(),
            innovation_level: 0.0,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_tactics<I, S>(mut self, tactics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tactics.extend(tactics.into_iter().map(Into::into));
        self
    }

    pub fn is_innovative(&self) -> bool {
        !self.novel_elements.is_empty()
    }

    /// The element that best characterises this strategy: its first plain
    /// novel element, else its first tactic, else its primary focus.
    /// Hybrid tags are skipped so hybrids never nest.
    pub fn signature_element(&self) -> &str {
        self.novel_elements
            .iter()
            .find(|t| !t.starts_with(HYBRID_PREFIX))
            .or_else(|| self.tactics.first())
            .map(String::as_str)
            .unwrap_or_else(|| self.primary_focus.as_str())
    }

    /// Every element in order of how strongly it characterises the
    /// strategy: plain novel elements, tactics, counters, then both foci.
    pub fn elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.novel_elements
            .iter()
            .filter(|t| !t.starts_with(HYBRID_PREFIX))
            .chain(&self.tactics)
            .chain(&self.counter_tactics)
            .map(String::as_str)
            .chain([self.primary_focus.as_str(), self.secondary_focus.as_str()])
    }

    /// True if the tag appears anywhere in this strategy
    pub fn uses(&self, tag: &str) -> bool {
        self.tactics
            .iter()
            .chain(&self.counter_tactics)
            .chain(&self.novel_elements)
            .any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sections_not_serialised() {
        let strategy = Strategy::default().with_tactics(["rapid_expansion"]);
        let json = serde_json::to_value(&strategy).unwrap();
        assert!(json.get("counter_tactics").is_none());
        assert!(json.get("novel_elements").is_none());
        assert_eq!(json["primary_focus"], "adaptive_exploration");
    }

    #[test]
    fn test_missing_sections_deserialise_empty() {
        let json = r#"{"primary_focus": "situational_dominance", "secondary_focus": "strategic_positioning"}"#;
        let strategy: Strategy = serde_json::from_str(json).unwrap();
        assert_eq!(strategy.primary_focus, Focus::SituationalDominance);
        assert!(strategy.tactics.is_empty());
        assert!(!strategy.is_innovative());
        assert_eq!(strategy.innovation_level, 0.0);
    }

    #[test]
    fn test_signature_element_preference() {
        let mut strategy = Strategy::default();
        assert_eq!(strategy.signature_element(), "adaptive_exploration");
        strategy.tactics.push("rapid_expansion".into());
        assert_eq!(strategy.signature_element(), "rapid_expansion");
        strategy.novel_elements.push("hybrid:a+b".into());
        assert_eq!(strategy.signature_element(), "rapid_expansion");
        strategy.novel_elements.push("resource_flooding".into());
        assert_eq!(strategy.signature_element(), "resource_flooding");
    }

    #[test]
    fn test_elements_skip_hybrids_and_end_with_foci() {
        let mut strategy = Strategy::default().with_tactics(["rapid_expansion"]);
        strategy.novel_elements.push("hybrid:a+b".into());
        strategy.counter_tactics.push("map_control".into());
        let elements: Vec<&str> = strategy.elements().collect();
        assert_eq!(
            elements,
            vec![
                "rapid_expansion",
                "map_control",
                "adaptive_exploration",
                "opportunistic_resource_grab"
            ]
        );
    }
}
