//! Learnable-state bundle and JSON persistence

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::core::error::{EngineError, Result};
use crate::genome::Genome;
use crate::learning::{PatternMemory, StrategyArchive};
use crate::ledger::HistoryLedger;

pub const STATE_FORMAT_VERSION: u32 = 1;

/// Everything the engine learns across turns
///
/// Unknown keys are ignored and missing keys fall back to fresh defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineState {
    pub version: u32,
    pub genome: Genome,
    pub archive: StrategyArchive,
    pub ledger: HistoryLedger,
    pub patterns: PatternMemory,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            version: STATE_FORMAT_VERSION,
            genome: Genome::default(),
            archive: StrategyArchive::default(),
            ledger: HistoryLedger::default(),
            patterns: PatternMemory::default(),
        }
    }
}

impl EngineState {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let state: EngineState = serde_json::from_str(json)?;
        if state.version > STATE_FORMAT_VERSION {
            warn!(
                found = state.version,
                supported = STATE_FORMAT_VERSION,
                "state written by a newer version, unknown fields ignored"
            );
        }
        Ok(state)
    }
}

pub fn save_state(state: &EngineState, path: &Path) -> Result<()> {
    fs::write(path, state.to_json()?)?;
    info!(
        path = %path.display(),
        turns = state.ledger.len(),
        "saved engine state"
    );
    Ok(())
}

pub fn load_state(path: &Path) -> Result<EngineState> {
    let content = fs::read_to_string(path)?;
    let state = EngineState::from_json(&content)?;
    info!(
        path = %path.display(),
        turns = state.ledger.len(),
        "loaded engine state"
    );
    Ok(state)
}

/// Load state, falling back to a fresh one on any failure
///
/// A missing file is a normal first run and yields no error. Anything
/// else is logged and handed back alongside the fresh state.
pub fn load_state_or_default(path: &Path) -> (EngineState, Option<EngineError>) {
    match load_state(path) {
        Ok(state) => (state, None),
        Err(EngineError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no saved state, starting fresh");
            (EngineState::default(), None)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not load state, starting fresh");
            (EngineState::default(), Some(err))
        }
    }
}
