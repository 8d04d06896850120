//! Character memories
//!
//! One memory per (event, participating character), synthesized at publish
//! time by the ledger. Memories are mutated only by the `recall` operation
//! and removed only by the low-importance retention sweep.

use crate::models::event::{EventCategory, ImpactDirection};
use serde::{Deserialize, Serialize};

/// What kind of experience a memory records, derived from the event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Battle,
    Social,
    Therapy,
    Financial,
    Conflict,
    Achievement,
}

impl MemoryType {
    /// Classify from the event category and type name.
    ///
    /// Conflict and achievement cut across categories, so the type-name
    /// keywords win over the category default.
    pub fn classify(category: EventCategory, type_name: &str) -> Self {
        if type_name.contains("conflict") || type_name.contains("argument") {
            return MemoryType::Conflict;
        }
        if type_name.contains("victory")
            || type_name.contains("breakthrough")
            || type_name.contains("milestone")
        {
            return MemoryType::Achievement;
        }
        match category {
            EventCategory::Battle => MemoryType::Battle,
            EventCategory::Social => MemoryType::Social,
            EventCategory::Therapy => MemoryType::Therapy,
            EventCategory::Financial => MemoryType::Financial,
        }
    }
}

/// A derived memory record for one character about one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub character_id: String,
    pub event_id: String,
    pub memory_type: MemoryType,
    pub content: String,
    /// 1-10
    pub emotional_intensity: u8,
    pub emotional_valence: ImpactDirection,
    /// 1-10; affects retention and recall ranking.
    pub importance: u8,
    pub created_tick: usize,
    pub last_recalled_tick: usize,
    pub recall_count: u32,
    /// Other participants of the originating event.
    pub associated_characters: Vec<String>,
    pub tags: Vec<String>,
    /// Lower rate = longer-lived memory. Consumed by downstream ranking;
    /// not enforced internally.
    pub decay_rate: f64,
}

/// Filter for memory queries.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilter {
    pub memory_type: Option<MemoryType>,
    /// Minimum importance, inclusive.
    pub min_importance: Option<u8>,
    pub limit: Option<usize>,
}
