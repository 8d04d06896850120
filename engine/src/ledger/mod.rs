//! Append-only event ledger
//!
//! Single source of truth for everything that happened in the simulation.
//! Publishing an event assigns it a deterministic counter id and a tick
//! timestamp, stores it, updates the four query indices, synthesizes
//! memories for every participant, applies relationship deltas, and queues
//! the event for matching subscribers.
//!
//! Events are immutable once published; the only later mutations are the
//! `resolved` flag and removal by the retention sweep.

pub mod memory;
pub mod relationship;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::{
    EventCategory, EventDraft, EventFilter, EventType, GameEvent,
};
use memory::MemoryStore;
use relationship::RelationshipGraph;

/// Events below this importance are dropped once older than the window.
pub const RETENTION_MIN_IMPORTANCE: u8 = 7;
/// Trailing window, in days, that low-importance events survive.
pub const RETENTION_WINDOW_DAYS: usize = 14;

/// What a subscriber wants to hear about. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionFilter {
    pub categories: Option<Vec<EventCategory>>,
    pub event_types: Option<Vec<EventType>>,
    pub character_id: Option<String>,
}

impl SubscriptionFilter {
    fn matches(&self, event: &GameEvent) -> bool {
        if let Some(categories) = &self.categories {
            if !categories.contains(&event.category) {
                return false;
            }
        }
        if let Some(types) = &self.event_types {
            if !types.contains(&event.event_type) {
                return false;
            }
        }
        if let Some(character_id) = &self.character_id {
            if !event.involves(character_id) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
struct Subscription {
    filter: SubscriptionFilter,
    pending: Vec<GameEvent>,
}

/// The ledger plus the derived state it maintains (memories, relationships).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLedger {
    events: Vec<GameEvent>,
    ticks_per_day: usize,
    next_event_number: u64,
    memories: MemoryStore,
    relationships: RelationshipGraph,
    #[serde(skip)]
    by_character: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    by_type: HashMap<EventType, Vec<usize>>,
    #[serde(skip)]
    by_day: HashMap<usize, Vec<usize>>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
    #[serde(skip)]
    subscriptions: HashMap<Uuid, Subscription>,
}

impl EventLedger {
    pub fn new(ticks_per_day: usize) -> Self {
        Self {
            ticks_per_day: ticks_per_day.max(1),
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> String {
        self.next_event_number += 1;
        format!("event_{:06}", self.next_event_number)
    }

    fn importance_for(draft: &EventDraft) -> u8 {
        let type_name = draft.event_type.as_str();
        let mut importance = 5u8 + draft.severity.importance_bonus();
        if type_name.contains("victory") || type_name.contains("defeat") {
            importance += 2;
        } else if type_name.contains("breakthrough") || type_name.contains("resolved") {
            importance += 1;
        }
        importance.min(10)
    }

    /// Append a draft to the ledger and run all derivations.
    pub fn publish(&mut self, draft: EventDraft, tick: usize) -> &GameEvent {
        let id = self.next_id();
        let importance = Self::importance_for(&draft);
        let event = GameEvent {
            id,
            event_type: draft.event_type,
            timestamp_tick: tick,
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
            importance,
        };

        let index = self.events.len();
        self.index_event(&event, index);
        self.memories.synthesize(&event);
        self.relationships.apply_event(&event);
        for subscription in self.subscriptions.values_mut() {
            if subscription.filter.matches(&event) {
                subscription.pending.push(event.clone());
            }
        }
        self.events.push(event);
        &self.events[index]
    }

    fn index_event(&mut self, event: &GameEvent, index: usize) {
        for participant in event.participants() {
            self.by_character
                .entry(participant.to_string())
                .or_default()
                .push(index);
        }
        self.by_type.entry(event.event_type).or_default().push(index);
        self.by_day
            .entry(event.timestamp_tick / self.ticks_per_day)
            .or_default()
            .push(index);
        self.by_id.insert(event.id.clone(), index);
    }

    pub fn get(&self, event_id: &str) -> Option<&GameEvent> {
        self.by_id.get(event_id).map(|&i| &self.events[i])
    }

    /// Flip the resolved flag. Returns false for unknown ids.
    pub fn mark_resolved(&mut self, event_id: &str) -> bool {
        match self.by_id.get(event_id) {
            Some(&i) => {
                self.events[i].resolved = true;
                true
            }
            None => false,
        }
    }

    /// Events involving one character, newest first.
    pub fn query_character(
        &self,
        character_id: &str,
        filter: &EventFilter,
        current_tick: usize,
    ) -> Vec<&GameEvent> {
        let candidates: Vec<&GameEvent> = self
            .by_character
            .get(character_id)
            .map(|indices| indices.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default();
        self.apply_filter(candidates, filter, current_tick)
    }

    /// Events of one type, newest first.
    pub fn query_type(
        &self,
        event_type: EventType,
        filter: &EventFilter,
        current_tick: usize,
    ) -> Vec<&GameEvent> {
        let candidates: Vec<&GameEvent> = self
            .by_type
            .get(&event_type)
            .map(|indices| indices.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default();
        self.apply_filter(candidates, filter, current_tick)
    }

    /// All events published on one in-game day, newest first.
    pub fn events_on_day(&self, day: usize) -> Vec<&GameEvent> {
        let mut found: Vec<&GameEvent> = self
            .by_day
            .get(&day)
            .map(|indices| indices.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default();
        Self::sort_newest_first(&mut found);
        found
    }

    fn apply_filter<'a>(
        &self,
        mut found: Vec<&'a GameEvent>,
        filter: &EventFilter,
        current_tick: usize,
    ) -> Vec<&'a GameEvent> {
        if let Some(days) = filter.within_days {
            let cutoff = current_tick.saturating_sub(days * self.ticks_per_day);
            found.retain(|e| e.timestamp_tick >= cutoff);
        }
        if let Some(categories) = &filter.categories {
            found.retain(|e| categories.contains(&e.category));
        }
        if let Some(types) = &filter.event_types {
            found.retain(|e| types.contains(&e.event_type));
        }
        if let Some(severities) = &filter.severities {
            found.retain(|e| severities.contains(&e.severity));
        }
        if let Some(tags) = &filter.tags {
            found.retain(|e| tags.iter().any(|t| e.tags.contains(t)));
        }
        if let Some(resolved) = filter.resolved {
            found.retain(|e| e.resolved == resolved);
        }
        Self::sort_newest_first(&mut found);
        if let Some(limit) = filter.limit {
            found.truncate(limit);
        }
        found
    }

    fn sort_newest_first(events: &mut [&GameEvent]) {
        events.sort_by(|a, b| {
            b.timestamp_tick
                .cmp(&a.timestamp_tick)
                .then(b.id.cmp(&a.id))
        });
    }

    /// Register a subscriber. Matching events queue up until drained.
    pub fn subscribe(&mut self, filter: SubscriptionFilter) -> Uuid {
        let handle = Uuid::new_v4();
        self.subscriptions.insert(
            handle,
            Subscription {
                filter,
                pending: Vec::new(),
            },
        );
        handle
    }

    /// Take every event queued for a subscriber since the last drain.
    pub fn drain(&mut self, handle: Uuid) -> Vec<GameEvent> {
        match self.subscriptions.get_mut(&handle) {
            Some(subscription) => std::mem::take(&mut subscription.pending),
            None => Vec::new(),
        }
    }

    pub fn unsubscribe(&mut self, handle: Uuid) -> bool {
        self.subscriptions.remove(&handle).is_some()
    }

    /// Drop old low-importance events and memories.
    ///
    /// Returns (events removed, memories removed). All indices are rebuilt so
    /// they never point at removed entries.
    pub fn sweep(&mut self, current_tick: usize) -> (usize, usize) {
        let cutoff = current_tick.saturating_sub(RETENTION_WINDOW_DAYS * self.ticks_per_day);
        let before = self.events.len();
        self.events.retain(|e| {
            e.timestamp_tick >= cutoff || e.importance >= RETENTION_MIN_IMPORTANCE
        });
        self.rebuild_indices();
        let events_removed = before - self.events.len();
        let memories_removed = self.memories.sweep(cutoff, RETENTION_MIN_IMPORTANCE);
        (events_removed, memories_removed)
    }

    /// Rebuild all four indices from the event vector.
    ///
    /// Needed after deserialization (indices are not serialized) and after a
    /// sweep compacts the vector.
    pub fn rebuild_indices(&mut self) {
        self.by_character.clear();
        self.by_type.clear();
        self.by_day.clear();
        self.by_id.clear();
        let events = std::mem::take(&mut self.events);
        for (index, event) in events.iter().enumerate() {
            self.index_event(event, index);
        }
        self.events = events;
        self.memories.rebuild_indices();
    }

    pub fn memories(&self) -> &MemoryStore {
        &self.memories
    }

    pub fn memories_mut(&mut self) -> &mut MemoryStore {
        &mut self.memories
    }

    pub fn relationships(&self) -> &RelationshipGraph {
        &self.relationships
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
