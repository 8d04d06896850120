//! Pairwise character relationships
//!
//! Directed edges derived from events that carry secondary participants.
//! A→B and B→A are stored independently; a single shared event applies the
//! same delta to both directions, but each edge keeps its own history.

use serde::{Deserialize, Serialize};

/// Direction a relationship is heading, from the latest applied delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Improving,
    Declining,
    Stable,
}

/// Directed relationship edge: how `character_id` relates to
/// `target_character_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub character_id: String,
    pub target_character_id: String,
    /// -100 to 100
    pub trust_level: f64,
    /// -100 to 100
    pub respect_level: f64,
    /// -100 to 100
    pub affection_level: f64,
    /// 0 to 100
    pub rivalry_intensity: f64,
    /// Event ids shared between the pair.
    pub shared_experiences: Vec<String>,
    /// Event ids of conflicts.
    pub conflicts: Vec<String>,
    /// Event ids of conflict resolutions.
    pub resolutions: Vec<String>,
    pub trajectory: Trajectory,
    pub last_interaction_tick: usize,
    pub interaction_count: u32,
}

impl Relationship {
    /// Fresh neutral edge.
    pub fn new(character_id: String, target_character_id: String, tick: usize) -> Self {
        Self {
            character_id,
            target_character_id,
            trust_level: 0.0,
            respect_level: 0.0,
            affection_level: 0.0,
            rivalry_intensity: 0.0,
            shared_experiences: Vec::new(),
            conflicts: Vec::new(),
            resolutions: Vec::new(),
            trajectory: Trajectory::Stable,
            last_interaction_tick: tick,
            interaction_count: 0,
        }
    }
}

/// Delta applied to a relationship edge by one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelationshipDelta {
    pub trust: f64,
    pub respect: f64,
    pub affection: f64,
    pub rivalry: f64,
}

impl RelationshipDelta {
    pub const fn new(trust: f64, respect: f64, affection: f64, rivalry: f64) -> Self {
        Self {
            trust,
            respect,
            affection,
            rivalry,
        }
    }
}
