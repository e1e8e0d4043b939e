//! Tactic tag catalogue
//!
//! Tactics travel as plain string tags so new ones can be introduced by the
//! evolver before the translator learns about them.

// Early game
pub const AGGRESSIVE_RESOURCE_MONOPOLIZATION: &str = "aggressive_resource_monopolization";
pub const EFFICIENT_RESOURCE_CONSERVATION: &str = "efficient_resource_conservation";
pub const BALANCED_RESOURCE_ACQUISITION: &str = "balanced_resource_acquisition";
pub const EARLY_MILITARY_PREPARATION: &str = "early_military_preparation";
pub const RAPID_EXPANSION: &str = "rapid_expansion";

// Mid game
pub const ECONOMIC_ACCELERATION: &str = "economic_acceleration";
pub const DELAYED_MILITARY_BUILDUP: &str = "delayed_military_buildup";
pub const IMMEDIATE_MILITARY_FOCUS: &str = "immediate_military_focus";
pub const TERRITORIAL_DEFENSE: &str = "territorial_defense";
pub const COUNTER_AGGRESSIVE_POSITIONING: &str = "counter_aggressive_positioning";
pub const ECONOMIC_DISRUPTION: &str = "economic_disruption";
pub const PRESSURE_APPLICATION: &str = "pressure_application";

// Late game
pub const TERRITORIAL_CONSOLIDATION: &str = "territorial_consolidation";
pub const DECISIVE_STRIKE: &str = "decisive_strike";
pub const GRADUAL_DOMINANCE: &str = "gradual_dominance";

// Genome temperament
pub const RELENTLESS_RAIDING: &str = "relentless_raiding";
pub const FORTIFIED_OUTPOSTS: &str = "fortified_outposts";
pub const DEEP_SCOUTING: &str = "deep_scouting";

// Counter-tactics
pub const EARLY_DEFENSE: &str = "early_defense";
pub const ECONOMIC_BUILDUP: &str = "economic_buildup";
pub const COUNTER_ATTACK: &str = "counter_attack";
pub const ECONOMIC_ADVANTAGE: &str = "economic_advantage";
pub const MAP_CONTROL: &str = "map_control";
pub const SLOW_PRESSURE: &str = "slow_pressure";
pub const EARLY_HARASSMENT: &str = "early_harassment";
pub const RESOURCE_DENIAL: &str = "resource_denial";
pub const MILITARY_PRESSURE: &str = "military_pressure";
pub const SELECTIVE_BLOCKING: &str = "selective_blocking";
pub const QUALITY_OVER_QUANTITY: &str = "quality_over_quantity";
pub const STRATEGIC_RETREATS: &str = "strategic_retreats";
pub const DEFENSIVE_DEPTH: &str = "defensive_depth";
pub const ATTRITION_TRADING: &str = "attrition_trading";
pub const EXPLOIT_TIMING_WINDOWS: &str = "exploit_timing_windows";
pub const AMBUSH_KNOWN_ROUTES: &str = "ambush_known_routes";

// Novel elements
pub const RESOURCE_FLOODING: &str = "resource_flooding";
pub const PATTERN_BREAKING_CHAOS: &str = "pattern_breaking_chaos";
pub const HIDDEN_ECONOMIC_EMPIRE: &str = "hidden_economic_empire";
pub const FLANKING_GAMBIT: &str = "flanking_gambit";
pub const DECOY_EXPEDITION: &str = "decoy_expedition";
pub const TEMPO_SACRIFICE: &str = "tempo_sacrifice";

/// Fallback novelties, tried in order when no situational rule fires
pub const EXPERIMENTAL_POOL: [&str; 3] = [FLANKING_GAMBIT, DECOY_EXPEDITION, TEMPO_SACRIFICE];

/// Prefix of a hybrid tag: `hybrid:<a>+<b>`
pub const HYBRID_PREFIX: &str = "hybrid:";
pub const HYBRID_SEPARATOR: char = '+';

pub fn hybrid(first: &str, second: &str) -> String {
    format!("{}{}{}{}", HYBRID_PREFIX, first, HYBRID_SEPARATOR, second)
}

/// Split a hybrid tag into its halves
pub fn split_hybrid(tag: &str) -> Option<(&str, &str)> {
    tag.strip_prefix(HYBRID_PREFIX)?.split_once(HYBRID_SEPARATOR)
}
