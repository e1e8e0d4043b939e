//! Strategy selection: phase policies, counters, innovation

pub mod counters;
pub mod evolver;
pub mod innovation;
pub mod phase_policies;
pub mod tactics;
pub mod types;

pub use evolver::StrategyEvolver;
pub use innovation::{innovation_trigger, should_innovate, InnovationTrigger};
pub use types::{Focus, Strategy};
