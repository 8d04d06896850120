//! Relationship graph maintenance
//!
//! Every published event nudges the relationship between its primary
//! character and each secondary participant. The delta table maps event
//! types to (trust, respect, affection, rivalry) adjustments; both edge
//! directions receive the same delta but keep independent histories.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::event::{EventType, GameEvent};
use crate::models::relationship::{Relationship, RelationshipDelta, Trajectory};

/// Per-event-type relationship adjustment.
pub fn delta_for(event_type: EventType) -> RelationshipDelta {
    match event_type {
        EventType::BattleVictory => RelationshipDelta::new(3.0, 2.0, 0.0, 0.0),
        EventType::BattleDefeat => RelationshipDelta::new(-1.0, -1.0, 0.0, 0.0),
        EventType::KitchenArgument => RelationshipDelta::new(-5.0, -3.0, -2.0, 2.0),
        EventType::SparringSession => RelationshipDelta::new(1.0, 4.0, 0.0, 0.0),
        EventType::MealSharing => RelationshipDelta::new(1.0, 0.0, 1.0, 0.0),
        EventType::LateNightConversation => RelationshipDelta::new(3.0, 0.0, 2.0, 0.0),
        EventType::AllianceFormed => RelationshipDelta::new(5.0, 3.0, 2.0, 0.0),
        EventType::ConflictResolved => RelationshipDelta::new(4.0, 2.0, 0.0, -3.0),
        EventType::GroupActivity => RelationshipDelta::new(1.0, 0.0, 2.0, 0.0),
        EventType::TherapyBreakthrough => RelationshipDelta::new(2.0, 1.0, 0.0, 0.0),
        EventType::CoachFinancialAdvice => RelationshipDelta::new(2.0, 1.0, 0.0, 0.0),
        EventType::TrustGained => RelationshipDelta::new(5.0, 2.0, 0.0, 0.0),
        EventType::TrustLost => RelationshipDelta::new(-8.0, -3.0, 0.0, 0.0),
        EventType::FinancialBreakthrough => RelationshipDelta::new(4.0, 3.0, 2.0, 0.0),
        EventType::FinancialCrisis => RelationshipDelta::new(-3.0, -2.0, 0.0, 1.0),
        EventType::FinancialStressIncrease => RelationshipDelta::new(-2.0, 0.0, -1.0, 0.0),
        EventType::FinancialStressDecrease => RelationshipDelta::new(1.0, 0.0, 1.0, 0.0),
        EventType::FinancialSpiralStarted => RelationshipDelta::new(-5.0, -3.0, -3.0, 0.0),
        EventType::FinancialSpiralDeepening => RelationshipDelta::new(-3.0, -2.0, -2.0, 2.0),
        EventType::FinancialSpiralBroken => RelationshipDelta::new(6.0, 4.0, 3.0, 0.0),
        EventType::FinancialInterventionApplied => RelationshipDelta::new(3.0, 2.0, 1.0, 0.0),
        _ => RelationshipDelta::new(0.0, 0.0, 0.0, 0.0),
    }
}

fn clamp_level(value: f64) -> f64 {
    value.clamp(-100.0, 100.0)
}

/// Directed relationship edges, keyed by owner then target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipGraph {
    edges: HashMap<String, HashMap<String, Relationship>>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, character_id: &str, target_id: &str) -> Option<&Relationship> {
        self.edges.get(character_id)?.get(target_id)
    }

    /// All edges owned by one character, sorted by target id.
    pub fn relationships_of(&self, character_id: &str) -> Vec<&Relationship> {
        let mut found: Vec<&Relationship> = self
            .edges
            .get(character_id)
            .map(|targets| targets.values().collect())
            .unwrap_or_default();
        found.sort_by(|a, b| a.target_character_id.cmp(&b.target_character_id));
        found
    }

    /// Apply a published event to every (primary, secondary) pair.
    ///
    /// Events with no secondary participants leave the graph untouched.
    pub fn apply_event(&mut self, event: &GameEvent) {
        let delta = delta_for(event.event_type);
        if delta.trust == 0.0
            && delta.respect == 0.0
            && delta.affection == 0.0
            && delta.rivalry == 0.0
        {
            return;
        }
        for secondary in &event.secondary_character_ids {
            self.apply_delta(&event.primary_character_id, secondary, &delta, event);
            self.apply_delta(secondary, &event.primary_character_id, &delta, event);
        }
    }

    fn apply_delta(
        &mut self,
        owner: &str,
        target: &str,
        delta: &RelationshipDelta,
        event: &GameEvent,
    ) {
        let edge = self
            .edges
            .entry(owner.to_string())
            .or_default()
            .entry(target.to_string())
            .or_insert_with(|| {
                Relationship::new(owner.to_string(), target.to_string(), event.timestamp_tick)
            });

        edge.trust_level = clamp_level(edge.trust_level + delta.trust);
        edge.respect_level = clamp_level(edge.respect_level + delta.respect);
        edge.affection_level = clamp_level(edge.affection_level + delta.affection);
        edge.rivalry_intensity = (edge.rivalry_intensity + delta.rivalry).clamp(0.0, 100.0);

        let direction = delta.trust + delta.respect;
        edge.trajectory = if direction > 0.0 {
            Trajectory::Improving
        } else if direction < 0.0 {
            Trajectory::Declining
        } else {
            Trajectory::Stable
        };

        let type_name = event.event_type.as_str();
        edge.shared_experiences.push(event.id.clone());
        if type_name.contains("conflict") || type_name.contains("argument") {
            edge.conflicts.push(event.id.clone());
        }
        if type_name.contains("resolved") || type_name.contains("resolution") {
            edge.resolutions.push(event.id.clone());
        }

        edge.last_interaction_tick = event.timestamp_tick;
        edge.interaction_count += 1;
    }
}
