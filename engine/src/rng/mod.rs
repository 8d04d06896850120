//! Deterministic random number generation
//!
//! All probabilistic behavior in the engine (crisis rolls, severity draws,
//! intervention outcomes, decision outcome simulation) goes through
//! [`RngManager`]. Nothing calls an ambient RNG directly.

pub mod xorshift;

pub use xorshift::RngManager;
