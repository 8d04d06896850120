//! Domain types for the psychology simulation.

pub mod crisis;
pub mod event;
pub mod luxury;
pub mod memory;
pub mod personality;
pub mod relationship;
