//! Stratagem - Adaptive Turn-Based Strategy Engine
//!
//! Reads a game snapshot, picks and adapts a strategy, emits action intents
//! and learns from each turn's outcome.

pub mod actions;
pub mod core;
pub mod engine;
pub mod genome;
pub mod learning;
pub mod ledger;
pub mod perception;
pub mod sandbox;
pub mod strategy;

pub use crate::core::{EngineConfig, EngineError, Result};
pub use crate::engine::{AdaptiveEngine, EngineState, SharedEngine, TurnPlan};
