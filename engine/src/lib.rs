//! Character Psychology Simulator - Rust Engine
//!
//! Financial-psychology engine for game characters with deterministic
//! execution: an append-only event ledger derives memories and
//! relationships, and psychological models (stress, decision quality, loss
//! spirals), a crisis generator, a coach intervention engine and a luxury
//! adaptation tracker read from it.
//!
//! # Architecture
//!
//! - **core**: Time management (ticks and in-game days)
//! - **models**: Domain types (events, personalities, crises, memories)
//! - **ledger**: Event ledger with memory synthesis and relationship graph
//! - **psychology**: Stress, decision-quality, spiral and trust models
//! - **crisis**: Probabilistic crisis generator
//! - **intervention**: Coach monitoring and interventions
//! - **luxury**: Purchase tracking and hedonic adaptation
//! - **orchestrator**: The engine facade and tick loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (whole dollars)
//! 2. All randomness is deterministic (seeded RNG)
//! 3. The ledger is the single source of truth; derived state is replayable

// Module declarations
pub mod core;
pub mod crisis;
pub mod intervention;
pub mod ledger;
pub mod luxury;
pub mod models;
pub mod orchestrator;
pub mod psychology;
pub mod rng;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use crisis::{BehaviorScores, CrisisGenerator, CRISIS_PROBABILITY_CAP};
pub use intervention::{
    apply_intervention, monitor_and_prevent, CoachBonuses, InterventionMethod,
    InterventionResult, PreventionOutcome, PreventionStage,
};
pub use ledger::{EventLedger, SubscriptionFilter};
pub use luxury::{AddictionRisk, DecayMilestone, DecayReport, LuxuryTracker, RiskLevel};
pub use models::{
    crisis::{CrisisSeverity, CrisisType, FinancialCrisis},
    event::{
        EmotionalImpact, EventCategory, EventDetails, EventDraft, EventFilter, EventSeverity,
        EventSource, EventType, GameEvent, ImpactDirection,
    },
    luxury::{LuxuryCategory, LuxuryPurchase},
    memory::{Memory, MemoryFilter, MemoryType},
    personality::{
        CharacterSnapshot, CoachProfile, DecisionCategory, FinancialDecision,
        FinancialPersonality, SpendingStyle,
    },
    relationship::{Relationship, Trajectory},
};
pub use orchestrator::{EngineConfig, EngineError, PsychologyEngine, TickReport};
pub use psychology::{
    assess_decision_quality, assess_financial_trust, assess_stress, detect_spiral,
    DecisionQuality, FinancialTrust, SpiralState, StressAssessment, StressInputs,
};
pub use rng::RngManager;
