//! Memory synthesis and storage
//!
//! Each published event produces one memory per participating character.
//! Importance, intensity, valence and decay all derive from the event, so a
//! replay of the same ledger reproduces the same memories.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::event::{GameEvent, ImpactDirection};
use crate::models::memory::{Memory, MemoryFilter, MemoryType};

const POSITIVE_KEYWORDS: [&str; 6] = [
    "victory",
    "success",
    "breakthrough",
    "resolved",
    "alliance",
    "achievement",
];

const NEGATIVE_KEYWORDS: [&str; 6] = [
    "defeat",
    "failure",
    "conflict",
    "argument",
    "crisis",
    "loss",
];

fn keyword_valence(type_name: &str) -> ImpactDirection {
    if POSITIVE_KEYWORDS.iter().any(|k| type_name.contains(k)) {
        ImpactDirection::Positive
    } else if NEGATIVE_KEYWORDS.iter().any(|k| type_name.contains(k)) {
        ImpactDirection::Negative
    } else {
        ImpactDirection::Neutral
    }
}

fn decay_rate(type_name: &str) -> f64 {
    if type_name.contains("victory") || type_name.contains("defeat") {
        0.1
    } else if type_name.contains("breakthrough") || type_name.contains("resolved") {
        0.2
    } else if type_name.contains("conflict") || type_name.contains("argument") {
        0.3
    } else {
        0.5
    }
}

fn importance_for(event: &GameEvent, is_primary: bool) -> u8 {
    let type_name = event.event_type.as_str();
    let mut importance = 5u8;
    if is_primary {
        importance += 2;
    }
    importance += event.severity.importance_bonus();
    if type_name.contains("victory") || type_name.contains("defeat") {
        importance += 2;
    } else if type_name.contains("breakthrough") || type_name.contains("resolved") {
        importance += 1;
    }
    importance.min(10)
}

fn intensity_for(event: &GameEvent, is_primary: bool) -> u8 {
    let base = event.severity.intensity();
    if is_primary {
        base
    } else {
        base.saturating_sub(2).max(1)
    }
}

fn content_for(event: &GameEvent, is_primary: bool) -> String {
    let mut description = event.description.clone();
    if let Some(first) = description.get(..1) {
        let lowered = first.to_lowercase();
        description.replace_range(..1, &lowered);
    }
    if is_primary {
        format!("I {description}")
    } else {
        format!("We {description}")
    }
}

/// All memories for all characters, with per-character and id indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    memories: Vec<Memory>,
    #[serde(skip)]
    by_character: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
    next_memory_number: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.next_memory_number += 1;
        format!("memory_{:06}", self.next_memory_number)
    }

    /// Create one memory per participant of a freshly published event.
    ///
    /// A per-character entry in the event's emotional impact list overrides
    /// the keyword-derived valence for that character.
    pub fn synthesize(&mut self, event: &GameEvent) -> Vec<String> {
        let type_name = event.event_type.as_str();
        let default_valence = keyword_valence(type_name);
        let rate = decay_rate(type_name);

        let participants: Vec<String> = event
            .participants()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut created = Vec::with_capacity(participants.len());
        for character_id in &participants {
            let is_primary = *character_id == event.primary_character_id;
            let valence = event
                .emotional_impact
                .iter()
                .find(|i| &i.character_id == character_id)
                .map(|i| i.impact)
                .unwrap_or(default_valence);

            let associated: Vec<String> = participants
                .iter()
                .filter(|c| *c != character_id)
                .cloned()
                .collect();

            let mut tags = event.tags.clone();
            tags.push(type_name.to_string());

            let id = self.next_id();
            let memory = Memory {
                id: id.clone(),
                character_id: character_id.clone(),
                event_id: event.id.clone(),
                memory_type: MemoryType::classify(event.category, type_name),
                content: content_for(event, is_primary),
                emotional_intensity: intensity_for(event, is_primary),
                emotional_valence: valence,
                importance: importance_for(event, is_primary),
                created_tick: event.timestamp_tick,
                last_recalled_tick: event.timestamp_tick,
                recall_count: 0,
                associated_characters: associated,
                tags,
                decay_rate: rate,
            };

            let index = self.memories.len();
            self.memories.push(memory);
            self.by_character
                .entry(character_id.clone())
                .or_default()
                .push(index);
            self.by_id.insert(id.clone(), index);
            created.push(id);
        }
        created
    }

    pub fn get(&self, memory_id: &str) -> Option<&Memory> {
        self.by_id.get(memory_id).map(|&i| &self.memories[i])
    }

    /// Mark a memory as recalled, reinforcing it.
    pub fn recall(&mut self, memory_id: &str, tick: usize) -> Option<&Memory> {
        let index = *self.by_id.get(memory_id)?;
        let memory = &mut self.memories[index];
        memory.recall_count += 1;
        memory.last_recalled_tick = tick;
        Some(&self.memories[index])
    }

    /// Memories of one character, most important first (ties: newest first).
    pub fn query(&self, character_id: &str, filter: &MemoryFilter) -> Vec<&Memory> {
        let mut found: Vec<&Memory> = self
            .by_character
            .get(character_id)
            .map(|indices| indices.iter().map(|&i| &self.memories[i]).collect())
            .unwrap_or_default();

        if let Some(memory_type) = filter.memory_type {
            found.retain(|m| m.memory_type == memory_type);
        }
        if let Some(min) = filter.min_importance {
            found.retain(|m| m.importance >= min);
        }

        found.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then(b.created_tick.cmp(&a.created_tick))
                .then(b.id.cmp(&a.id))
        });
        if let Some(limit) = filter.limit {
            found.truncate(limit);
        }
        found
    }

    /// Drop low-importance memories older than the retention window.
    ///
    /// Returns the number of memories removed.
    pub fn sweep(&mut self, cutoff_tick: usize, min_importance: u8) -> usize {
        let before = self.memories.len();
        self.memories
            .retain(|m| m.created_tick >= cutoff_tick || m.importance >= min_importance);
        self.rebuild_indices();
        before - self.memories.len()
    }

    pub fn rebuild_indices(&mut self) {
        self.by_character.clear();
        self.by_id.clear();
        for (index, memory) in self.memories.iter().enumerate() {
            self.by_character
                .entry(memory.character_id.clone())
                .or_default()
                .push(index);
            self.by_id.insert(memory.id.clone(), index);
        }
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{
        EventCategory, EventDraft, EventSeverity, EventSource, EventType,
    };

    fn event(event_type: EventType, severity: EventSeverity, secondaries: &[&str]) -> GameEvent {
        let draft = EventDraft::new(
            event_type,
            EventSource::BattleArena,
            "achilles",
            severity,
            "Won a decisive battle",
        )
        .with_secondary(secondaries.iter().map(|s| s.to_string()).collect());

        GameEvent {
            id: "event_000042".to_string(),
            event_type: draft.event_type,
            timestamp_tick: 10,
            source: draft.source,
            primary_character_id: draft.primary_character_id,
            secondary_character_ids: draft.secondary_character_ids,
            severity: draft.severity,
            category: draft.event_type.category(),
            description: draft.description,
            details: draft.details,
            extra: draft.extra,
            tags: draft.tags,
            resolved: false,
            emotional_impact: draft.emotional_impact,
            importance: 7,
        }
    }

    #[test]
    fn test_one_memory_per_participant() {
        let mut store = MemoryStore::new();
        let created = store.synthesize(&event(
            EventType::BattleVictory,
            EventSeverity::High,
            &["hector"],
        ));
        assert_eq!(created.len(), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.query("achilles", &MemoryFilter::default()).len(), 1);
        assert_eq!(store.query("hector", &MemoryFilter::default()).len(), 1);
    }

    #[test]
    fn test_primary_memory_stronger_than_secondary() {
        let mut store = MemoryStore::new();
        store.synthesize(&event(
            EventType::BattleVictory,
            EventSeverity::High,
            &["hector"],
        ));
        let primary = &store.query("achilles", &MemoryFilter::default())[0];
        let secondary = &store.query("hector", &MemoryFilter::default())[0];
        // 5 + primary 2 + high 2 + victory 2 = 11, capped at 10
        assert_eq!(primary.importance, 10);
        assert_eq!(secondary.importance, 9);
        assert_eq!(primary.emotional_intensity, 7);
        assert_eq!(secondary.emotional_intensity, 5);
        assert!(primary.content.starts_with("I won"));
        assert!(secondary.content.starts_with("We won"));
    }

    #[test]
    fn test_valence_and_decay_from_type_name() {
        let mut store = MemoryStore::new();
        store.synthesize(&event(EventType::BattleVictory, EventSeverity::Low, &[]));
        let memory = &store.query("achilles", &MemoryFilter::default())[0];
        assert_eq!(memory.emotional_valence, ImpactDirection::Positive);
        assert_eq!(memory.decay_rate, 0.1);
        assert_eq!(memory.memory_type, MemoryType::Achievement);
    }

    #[test]
    fn test_recall_reinforces() {
        let mut store = MemoryStore::new();
        let ids = store.synthesize(&event(EventType::MealSharing, EventSeverity::Low, &[]));
        let recalled = store.recall(&ids[0], 99).unwrap();
        assert_eq!(recalled.recall_count, 1);
        assert_eq!(recalled.last_recalled_tick, 99);
        assert!(store.recall("memory_999999", 99).is_none());
    }

    #[test]
    fn test_sweep_keeps_important_memories() {
        let mut store = MemoryStore::new();
        // Secondary participant gets importance 5, primary gets 7.
        store.synthesize(&event(
            EventType::MealSharing,
            EventSeverity::Low,
            &["patroclus"],
        ));
        let removed = store.sweep(100, 7);
        assert_eq!(removed, 1);
        assert_eq!(store.query("achilles", &MemoryFilter::default()).len(), 1);
        assert!(store.query("patroclus", &MemoryFilter::default()).is_empty());
    }

    #[test]
    fn test_query_filters_and_ordering() {
        let mut store = MemoryStore::new();
        store.synthesize(&event(EventType::MealSharing, EventSeverity::Low, &[]));
        store.synthesize(&event(EventType::BattleVictory, EventSeverity::High, &[]));
        let filter = MemoryFilter {
            min_importance: Some(8),
            ..Default::default()
        };
        let found = store.query("achilles", &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].memory_type, MemoryType::Achievement);

        let all = store.query("achilles", &MemoryFilter::default());
        assert!(all[0].importance >= all[1].importance);
    }

    #[test]
    fn test_classify_respects_category() {
        assert_eq!(
            MemoryType::classify(EventCategory::Financial, "luxury_purchase"),
            MemoryType::Financial
        );
        assert_eq!(
            MemoryType::classify(EventCategory::Social, "kitchen_argument"),
            MemoryType::Conflict
        );
    }
}
