//! Engine orchestration
//!
//! Owns the clock, the RNG, the ledger and every tracker, and drives the
//! tick loop. Collaborators only talk to [`PsychologyEngine`].

pub mod engine;

pub use engine::{EngineConfig, EngineError, PsychologyEngine, TickReport};
