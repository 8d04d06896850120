//! Domain events
//!
//! The event ledger is the sole source of truth: memories, relationships and
//! every downstream signal are derived from the events appended here. Events
//! are immutable once published (the only later mutation is flipping the
//! `resolved` flag through the ledger).
//!
//! # Details vs. extra
//!
//! Fields every consumer relies on (amounts, crisis ids, stress deltas) live
//! in the typed [`EventDetails`] union. Genuinely variable data (crisis
//! trigger factors, intervention method text) goes into the `extra` map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Event type catalogue.
///
/// Covers the financial-psychology events this engine publishes itself plus
/// the social/battle event types it consumes from collaborators (those drive
/// memory valence and relationship deltas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // Battle / social events consumed from collaborators
    BattleVictory,
    BattleDefeat,
    KitchenArgument,
    MealSharing,
    LateNightConversation,
    SparringSession,
    AllianceFormed,
    ConflictResolved,
    GroupActivity,
    TherapyBreakthrough,

    // Financial events
    EarningsReceived,
    FinancialDecisionMade,
    CoachFinancialAdvice,
    FinancialStressIncrease,
    FinancialStressDecrease,
    LuxuryPurchase,
    InvestmentOutcome,
    FinancialCrisis,
    FinancialBreakthrough,
    TrustGained,
    TrustLost,

    // Spiral / intervention events
    FinancialSpiralStarted,
    FinancialSpiralDeepening,
    FinancialSpiralBroken,
    FinancialInterventionApplied,
}

impl EventType {
    /// Snake_case name, used for keyword-based valence matching and tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::BattleVictory => "battle_victory",
            EventType::BattleDefeat => "battle_defeat",
            EventType::KitchenArgument => "kitchen_argument",
            EventType::MealSharing => "meal_sharing",
            EventType::LateNightConversation => "late_night_conversation",
            EventType::SparringSession => "sparring_session",
            EventType::AllianceFormed => "alliance_formed",
            EventType::ConflictResolved => "conflict_resolved",
            EventType::GroupActivity => "group_activity",
            EventType::TherapyBreakthrough => "therapy_breakthrough",
            EventType::EarningsReceived => "earnings_received",
            EventType::FinancialDecisionMade => "financial_decision_made",
            EventType::CoachFinancialAdvice => "coach_financial_advice",
            EventType::FinancialStressIncrease => "financial_stress_increase",
            EventType::FinancialStressDecrease => "financial_stress_decrease",
            EventType::LuxuryPurchase => "luxury_purchase",
            EventType::InvestmentOutcome => "investment_outcome",
            EventType::FinancialCrisis => "financial_crisis",
            EventType::FinancialBreakthrough => "financial_breakthrough",
            EventType::TrustGained => "trust_gained",
            EventType::TrustLost => "trust_lost",
            EventType::FinancialSpiralStarted => "financial_spiral_started",
            EventType::FinancialSpiralDeepening => "financial_spiral_deepening",
            EventType::FinancialSpiralBroken => "financial_spiral_broken",
            EventType::FinancialInterventionApplied => "financial_intervention_applied",
        }
    }

    /// Default category for this event type.
    pub fn category(&self) -> EventCategory {
        match self {
            EventType::BattleVictory | EventType::BattleDefeat | EventType::SparringSession => {
                EventCategory::Battle
            }
            EventType::KitchenArgument
            | EventType::MealSharing
            | EventType::LateNightConversation
            | EventType::AllianceFormed
            | EventType::ConflictResolved
            | EventType::GroupActivity => EventCategory::Social,
            EventType::TherapyBreakthrough => EventCategory::Therapy,
            _ => EventCategory::Financial,
        }
    }
}

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EventSeverity {
    /// Base emotional intensity contribution (1-10 scale).
    pub fn intensity(&self) -> u8 {
        match self {
            EventSeverity::Low => 3,
            EventSeverity::Medium => 5,
            EventSeverity::High => 7,
            EventSeverity::Critical => 10,
        }
    }

    /// Memory importance bonus.
    pub fn importance_bonus(&self) -> u8 {
        match self {
            EventSeverity::Low => 0,
            EventSeverity::Medium => 1,
            EventSeverity::High => 2,
            EventSeverity::Critical => 3,
        }
    }
}

/// Broad event category, used for filtering and memory typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Battle,
    Social,
    Therapy,
    Financial,
}

/// Where an event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    BattleArena,
    KitchenTable,
    TherapyRoom,
    FinancialAdvisory,
    Marketplace,
    External,
}

/// Per-character emotional impact annotation attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalImpact {
    pub character_id: String,
    pub impact: ImpactDirection,
    /// 1-10
    pub intensity: u8,
}

/// Direction of an emotional impact or decision outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDirection {
    Positive,
    Negative,
    Neutral,
}

/// Typed event payload.
///
/// One variant per event family with the fields every consumer relies on;
/// anything genuinely variable goes into [`GameEvent::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetails {
    /// A financial decision was recorded or resolved.
    Decision {
        category: String,
        amount: i64,
        outcome: ImpactDirection,
    },
    /// A financial crisis fired or was resolved.
    Crisis {
        crisis_id: String,
        crisis_type: String,
        amount: i64,
        trauma_level: f64,
        stress_increase: f64,
        trust_impact: f64,
    },
    /// A luxury purchase was made, hit its decay milestone, or completed.
    Luxury {
        purchase_id: String,
        amount: i64,
        category: String,
        happiness_effect: f64,
    },
    /// A coach intervention was attempted.
    Intervention {
        intervention_type: String,
        success: bool,
        stress_reduction: f64,
        spiral_reduction: f64,
    },
    /// A character's financial stress moved.
    StressChange { old_stress: f64, new_stress: f64 },
    /// A character's trust in coach advice moved.
    TrustChange { old_trust: f64, new_trust: f64 },
    /// Spiral state transition (started / deepening / broken).
    Spiral {
        spiral_intensity: f64,
        consecutive_poor_decisions: usize,
    },
    /// No structured payload.
    General,
}

/// A domain event in the ledger.
///
/// Immutable once published; the id and timestamp are assigned by the ledger
/// at publish time (ids are deterministic counters so a replay with the same
/// inputs produces identical ids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: String,
    pub event_type: EventType,
    /// Tick at which the event was published.
    pub timestamp_tick: usize,
    pub source: EventSource,
    pub primary_character_id: String,
    pub secondary_character_ids: Vec<String>,
    pub severity: EventSeverity,
    pub category: EventCategory,
    pub description: String,
    pub details: EventDetails,
    /// Open attributes for genuinely variable data.
    pub extra: HashMap<String, serde_json::Value>,
    pub tags: Vec<String>,
    pub resolved: bool,
    pub emotional_impact: Vec<EmotionalImpact>,
    /// 1-10; drives the retention sweep. Computed at publish time.
    pub importance: u8,
}

impl GameEvent {
    /// All characters that participated in this event, primary first.
    pub fn participants(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(1 + self.secondary_character_ids.len());
        out.push(self.primary_character_id.as_str());
        out.extend(self.secondary_character_ids.iter().map(String::as_str));
        out
    }

    /// Whether `character_id` is the primary or a secondary participant.
    pub fn involves(&self, character_id: &str) -> bool {
        self.primary_character_id == character_id
            || self.secondary_character_ids.iter().any(|c| c == character_id)
    }
}

/// A draft event handed to `publish`; the ledger assigns id + timestamp.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub event_type: EventType,
    pub source: EventSource,
    pub primary_character_id: String,
    pub secondary_character_ids: Vec<String>,
    pub severity: EventSeverity,
    pub description: String,
    pub details: EventDetails,
    pub extra: HashMap<String, serde_json::Value>,
    pub tags: Vec<String>,
    pub emotional_impact: Vec<EmotionalImpact>,
}

impl EventDraft {
    /// Minimal draft with neutral defaults.
    pub fn new(
        event_type: EventType,
        source: EventSource,
        primary_character_id: impl Into<String>,
        severity: EventSeverity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            source,
            primary_character_id: primary_character_id.into(),
            secondary_character_ids: Vec::new(),
            severity,
            description: description.into(),
            details: EventDetails::General,
            extra: HashMap::new(),
            tags: Vec::new(),
            emotional_impact: Vec::new(),
        }
    }

    pub fn with_secondary(mut self, ids: Vec<String>) -> Self {
        self.secondary_character_ids = ids;
        self
    }

    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = details;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn with_emotional_impact(mut self, impact: Vec<EmotionalImpact>) -> Self {
        self.emotional_impact = impact;
        self
    }
}

/// Query filter for the ledger.
///
/// All criteria are conjunctive; unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Only events within the trailing N days.
    pub within_days: Option<usize>,
    pub categories: Option<Vec<EventCategory>>,
    pub event_types: Option<Vec<EventType>>,
    pub severities: Option<Vec<EventSeverity>>,
    pub tags: Option<Vec<String>>,
    pub resolved: Option<bool>,
    /// Keep only the newest N results.
    pub limit: Option<usize>,
}
