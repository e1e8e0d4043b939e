//! Turn outcome metrics and effectiveness scoring

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw outcome of one executed turn, as reported by the game
///
/// Each metric accepts a number or a boolean on input (`true` reads as 1).
/// Negative, non-finite or non-numeric values read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnOutcome {
    #[serde(deserialize_with = "lenient_metric")]
    pub resource_gain: f64,
    #[serde(deserialize_with = "lenient_metric")]
    pub military_victories: f64,
    #[serde(deserialize_with = "lenient_metric")]
    pub territory_gained: f64,
    #[serde(deserialize_with = "lenient_metric")]
    pub economic_improvement: f64,
    #[serde(deserialize_with = "lenient_metric")]
    pub position_improvement: f64,
}

/// Weight of each indicator in tenths, in field order
const INDICATOR_WEIGHTS: [u32; 5] = [2, 3, 2, 2, 1];

impl TurnOutcome {
    pub fn new(
        resource_gain: f64,
        military_victories: f64,
        territory_gained: f64,
        economic_improvement: f64,
        position_improvement: f64,
    ) -> Self {
        Self {
            resource_gain: sanitize(resource_gain),
            military_victories: sanitize(military_victories),
            territory_gained: sanitize(territory_gained),
            economic_improvement: sanitize(economic_improvement),
            position_improvement: sanitize(position_improvement),
        }
    }

    fn indicators(&self) -> [f64; 5] {
        [
            self.resource_gain,
            self.military_victories,
            self.territory_gained,
            self.economic_improvement,
            self.position_improvement,
        ]
    }
}

/// Effectiveness in [0, 1]: the sum of the fixed weights of every positive
/// indicator, capped at 1.0.
///
/// Summed in whole tenths so that e.g. three 0.2 weights land on exactly 0.6.
pub fn score(outcome: &TurnOutcome) -> f64 {
    let tenths: u32 = outcome
        .indicators()
        .iter()
        .zip(INDICATOR_WEIGHTS)
        .filter(|(value, _)| **value > 0.0)
        .map(|(_, weight)| weight)
        .sum();
    f64::from(tenths.min(10)) / 10.0
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn lenient_metric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(true) => 1.0,
        Value::Number(n) => n.as_f64().map(sanitize).unwrap_or(0.0),
        _ => 0.0,
    })
}
