//! Perception: turning raw game snapshots into situational factors

pub mod analyzer;
pub mod factors;

pub use analyzer::SituationAnalyzer;
pub use factors::{EnemyPattern, GamePhase, SituationFactors};
