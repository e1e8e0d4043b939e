//! Learning: scoring outcomes and adapting the genome, archive and
//! pattern memory

pub mod archive;
pub mod learner;
pub mod outcome;
pub mod patterns;

pub use archive::{ArchivedStrategy, StrategyArchive};
pub use learner::{LearningReport, OutcomeLearner};
pub use outcome::{score, TurnOutcome};
pub use patterns::{situation_signature, FocusRecord, PatternMemory};
