//! The psychology engine
//!
//! Single-owner facade over the ledger, the crisis generator, the luxury
//! tracker and the per-character psychological state. All randomness flows
//! through the injected seeded RNG and all time through the tick clock, so
//! two engines built from the same config and fed the same inputs stay
//! byte-identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::time::TimeManager;
use crate::crisis::{BehaviorScores, CrisisGenerator};
use crate::intervention::{
    apply_intervention, monitor_and_prevent, InterventionMethod, InterventionResult,
    PreventionOutcome,
};
use crate::ledger::{EventLedger, SubscriptionFilter};
use crate::luxury::{AddictionRisk, DecayMilestone, DecayReport, LuxuryTracker};
use crate::models::crisis::{CrisisSeverity, FinancialCrisis};
use crate::models::event::{
    EventDetails, EventDraft, EventFilter, EventSeverity, EventSource, EventType, GameEvent,
    ImpactDirection,
};
use crate::models::luxury::{LuxuryCategory, LuxuryPurchase};
use crate::models::memory::{Memory, MemoryFilter};
use crate::models::personality::{
    CharacterSnapshot, CoachProfile, DecisionCategory, FinancialDecision,
};
use crate::models::relationship::Relationship;
use crate::psychology::{
    advice_trust_delta, assess_decision_quality, assess_financial_trust, assess_stress,
    detect_spiral, simulate_outcome, DecisionQuality, FinancialTrust, SpiralState,
    StressAssessment, StressInputs,
};
use crate::rng::RngManager;

/// Window feeding stress losses, behavior scores and spiral detection.
const TRAILING_WINDOW_DAYS: usize = 30;
/// Minimum stress move worth publishing.
const STRESS_PUBLISH_THRESHOLD: f64 = 5.0;
/// Minimum coach-trust move worth publishing.
const TRUST_PUBLISH_THRESHOLD: f64 = 3.0;
/// Intensity growth that counts as a deepening spiral.
const SPIRAL_DEEPENING_STEP: f64 = 10.0;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),
    #[error("Unknown crisis: {0}")]
    UnknownCrisis(String),
    #[error("Unknown purchase: {0}")]
    UnknownPurchase(String),
    #[error("Unknown memory: {0}")]
    UnknownMemory(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Engine construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub seed: u64,
    pub ticks_per_day: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks_per_day: 24,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if self.ticks_per_day == 0 {
            return Err(EngineError::InvalidConfig(
                "ticks_per_day must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-character mutable psychological state.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CharacterState {
    snapshot: CharacterSnapshot,
    coach: CoachProfile,
    stress_level: f64,
    /// Accumulated intervention relief subtracted from spiral intensity,
    /// cleared once the streak breaks.
    spiral_relief: f64,
    /// Spiral read-out after the last transition check.
    last_spiral_active: bool,
    last_spiral_intensity: f64,
}

/// What one `tick()` call did.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: usize,
    pub day: usize,
    pub end_of_day: bool,
    /// Ids of crises that fired this tick.
    pub crises_fired: Vec<String>,
    pub luxury_reports: Vec<DecayReport>,
    pub events_swept: usize,
    pub memories_swept: usize,
}

/// Facade owning all engine state.
#[derive(Debug)]
pub struct PsychologyEngine {
    config: EngineConfig,
    clock: TimeManager,
    rng: RngManager,
    ledger: EventLedger,
    crises: CrisisGenerator,
    luxuries: LuxuryTracker,
    // BTreeMap: roster iteration order must not depend on hashing.
    roster: BTreeMap<String, CharacterState>,
}

impl PsychologyEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            clock: TimeManager::new(config.ticks_per_day),
            rng: RngManager::new(config.seed),
            ledger: EventLedger::new(config.ticks_per_day),
            crises: CrisisGenerator::new(),
            luxuries: LuxuryTracker::new(),
            roster: BTreeMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn current_day(&self) -> usize {
        self.clock.current_day()
    }

    // ---- roster -----------------------------------------------------------

    /// Add a character to the roster with an initial stress assessment.
    pub fn register_character(
        &mut self,
        snapshot: CharacterSnapshot,
        coach: CoachProfile,
    ) -> Result<(), EngineError> {
        if snapshot.id.is_empty() {
            return Err(EngineError::InvalidInput(
                "character id must not be empty".to_string(),
            ));
        }
        if self.roster.contains_key(&snapshot.id) {
            return Err(EngineError::InvalidInput(format!(
                "character already registered: {}",
                snapshot.id
            )));
        }
        let stress = assess_stress(&snapshot, &self.stress_inputs_for(&snapshot));
        self.roster.insert(
            snapshot.id.clone(),
            CharacterState {
                snapshot,
                coach,
                stress_level: stress.stress_level,
                spiral_relief: 0.0,
                last_spiral_active: false,
                last_spiral_intensity: 0.0,
            },
        );
        Ok(())
    }

    /// Replace a registered character's roster snapshot.
    pub fn update_snapshot(&mut self, snapshot: CharacterSnapshot) -> Result<(), EngineError> {
        let state = self
            .roster
            .get_mut(&snapshot.id)
            .ok_or_else(|| EngineError::UnknownCharacter(snapshot.id.clone()))?;
        state.snapshot = snapshot;
        Ok(())
    }

    pub fn set_coach(&mut self, character_id: &str, coach: CoachProfile) -> Result<(), EngineError> {
        self.state_mut(character_id)?.coach = coach;
        Ok(())
    }

    pub fn character(&self, character_id: &str) -> Result<&CharacterSnapshot, EngineError> {
        Ok(&self.state(character_id)?.snapshot)
    }

    pub fn stress_level(&self, character_id: &str) -> Result<f64, EngineError> {
        Ok(self.state(character_id)?.stress_level)
    }

    fn state(&self, character_id: &str) -> Result<&CharacterState, EngineError> {
        self.roster
            .get(character_id)
            .ok_or_else(|| EngineError::UnknownCharacter(character_id.to_string()))
    }

    fn state_mut(&mut self, character_id: &str) -> Result<&mut CharacterState, EngineError> {
        self.roster
            .get_mut(character_id)
            .ok_or_else(|| EngineError::UnknownCharacter(character_id.to_string()))
    }

    // ---- derived inputs ---------------------------------------------------

    fn window_decisions<'a>(&self, snapshot: &'a CharacterSnapshot) -> Vec<&'a FinancialDecision> {
        snapshot
            .recent_decisions
            .iter()
            .filter(|d| self.clock.within_days(d.timestamp_tick, TRAILING_WINDOW_DAYS))
            .collect()
    }

    fn stress_inputs_for(&self, snapshot: &CharacterSnapshot) -> StressInputs {
        let peers: Vec<f64> = self
            .roster
            .values()
            .filter(|s| s.snapshot.id != snapshot.id)
            .map(|s| s.snapshot.wallet as f64)
            .chain(std::iter::once(snapshot.wallet as f64))
            .collect();
        let peer_average_wallet = peers.iter().sum::<f64>() / peers.len() as f64;

        let decisions = self.window_decisions(snapshot);
        let decision_losses: i64 = decisions
            .iter()
            .map(|d| d.financial_impact.min(0).unsigned_abs() as i64)
            .sum();
        let crisis_losses: i64 = self
            .crises
            .crises_for(&snapshot.id)
            .iter()
            .filter(|c| self.clock.within_days(c.triggered_tick, TRAILING_WINDOW_DAYS))
            .map(|c| c.amount)
            .sum();
        // Investment decisions are the irregular-income signal.
        let income_volatility_events = decisions
            .iter()
            .filter(|d| d.category == DecisionCategory::Investment)
            .count();

        StressInputs {
            peer_average_wallet,
            losses_30_days: decision_losses + crisis_losses,
            income_volatility_events,
        }
    }

    fn behavior_scores_for(&self, snapshot: &CharacterSnapshot) -> BehaviorScores {
        let luxury_spending =
            self.luxuries
                .spending_in_window(&snapshot.id, &self.clock, TRAILING_WINDOW_DAYS);
        let negative_decisions = self
            .window_decisions(snapshot)
            .iter()
            .filter(|d| d.outcome == ImpactDirection::Negative)
            .count();
        BehaviorScores::derive(snapshot, luxury_spending, negative_decisions)
    }

    // ---- psychology read-outs ---------------------------------------------

    /// Re-assess stress, store it, and publish the move when it is large
    /// enough to matter.
    pub fn update_stress(&mut self, character_id: &str) -> Result<StressAssessment, EngineError> {
        let state = self.state(character_id)?;
        let assessment = assess_stress(&state.snapshot, &self.stress_inputs_for(&state.snapshot));
        let old = state.stress_level;
        let new = assessment.stress_level;
        self.state_mut(character_id)?.stress_level = new;

        if (new - old).abs() >= STRESS_PUBLISH_THRESHOLD {
            let event_type = if new > old {
                EventType::FinancialStressIncrease
            } else {
                EventType::FinancialStressDecrease
            };
            let severity = if new >= 80.0 {
                EventSeverity::Critical
            } else if new >= 60.0 {
                EventSeverity::High
            } else {
                EventSeverity::Medium
            };
            let draft = EventDraft::new(
                event_type,
                EventSource::FinancialAdvisory,
                character_id,
                severity,
                format!("financial stress moved from {old:.0} to {new:.0}"),
            )
            .with_details(EventDetails::StressChange {
                old_stress: old,
                new_stress: new,
            });
            self.publish(draft);
        }
        Ok(assessment)
    }

    /// Current spiral read-out, intervention relief applied.
    pub fn spiral_state(&self, character_id: &str) -> Result<SpiralState, EngineError> {
        let state = self.state(character_id)?;
        let mut spiral = detect_spiral(
            character_id,
            &state.snapshot.recent_decisions,
            state.stress_level,
            self.clock.current_tick(),
            self.clock.ticks_per_day(),
        );
        if state.spiral_relief > 0.0 {
            spiral.intensity = (spiral.intensity - state.spiral_relief).max(0.0);
            spiral.needs_intervention =
                spiral.intensity > 60.0 || spiral.consecutive_poor_decisions >= 3;
        }
        Ok(spiral)
    }

    pub fn decision_quality(&self, character_id: &str) -> Result<DecisionQuality, EngineError> {
        let state = self.state(character_id)?;
        let spiral = self.spiral_state(character_id)?;
        Ok(assess_decision_quality(
            &state.snapshot.personality,
            state.stress_level,
            &spiral,
            state.coach.trust,
        ))
    }

    pub fn financial_trust(&self, character_id: &str) -> Result<FinancialTrust, EngineError> {
        let state = self.state(character_id)?;
        Ok(assess_financial_trust(
            &state.snapshot.personality,
            &state.snapshot.recent_decisions,
            state.coach.trust,
            state.stress_level,
        ))
    }

    /// Roll the outcome a decision of the character's current quality would
    /// produce, without recording anything.
    pub fn simulate_decision(&mut self, character_id: &str) -> Result<ImpactDirection, EngineError> {
        let quality = self.decision_quality(character_id)?;
        Ok(simulate_outcome(&quality, &mut self.rng))
    }

    // ---- decisions --------------------------------------------------------

    /// Record a resolved financial decision and run all follow-ups: coach
    /// trust, stress re-assessment and spiral transition events.
    pub fn record_decision(&mut self, decision: FinancialDecision) -> Result<(), EngineError> {
        if decision.amount < 0 {
            return Err(EngineError::InvalidInput(
                "decision amount must be non-negative".to_string(),
            ));
        }
        let character_id = decision.character_id.clone();
        self.state(&character_id)?;

        let trust_delta = advice_trust_delta(&decision);
        let draft = EventDraft::new(
            EventType::FinancialDecisionMade,
            EventSource::FinancialAdvisory,
            character_id.as_str(),
            match decision.outcome {
                ImpactDirection::Negative => EventSeverity::High,
                _ => EventSeverity::Medium,
            },
            decision.description.clone(),
        )
        .with_details(EventDetails::Decision {
            category: decision.category.as_str().to_string(),
            amount: decision.amount,
            outcome: decision.outcome,
        });
        self.publish(draft);

        {
            let state = self.state_mut(&character_id)?;
            state.snapshot.recent_decisions.push(decision);
        }
        self.adjust_coach_trust(&character_id, trust_delta)?;
        self.update_stress(&character_id)?;
        self.check_spiral_transition(&character_id)?;
        Ok(())
    }

    fn adjust_coach_trust(&mut self, character_id: &str, delta: f64) -> Result<(), EngineError> {
        if delta == 0.0 {
            return Ok(());
        }
        let state = self.state_mut(character_id)?;
        let old = state.coach.trust;
        let new = (old + delta).clamp(0.0, 100.0);
        state.coach.trust = new;

        if (new - old).abs() >= TRUST_PUBLISH_THRESHOLD {
            let event_type = if new > old {
                EventType::TrustGained
            } else {
                EventType::TrustLost
            };
            let draft = EventDraft::new(
                event_type,
                EventSource::FinancialAdvisory,
                character_id,
                EventSeverity::Medium,
                format!("trust in coach advice moved from {old:.0} to {new:.0}"),
            )
            .with_details(EventDetails::TrustChange {
                old_trust: old,
                new_trust: new,
            });
            self.publish(draft);
        }
        Ok(())
    }

    /// Publish spiral started/deepening/broken events on state changes.
    fn check_spiral_transition(&mut self, character_id: &str) -> Result<(), EngineError> {
        let spiral = self.spiral_state(character_id)?;
        let (was_active, last_intensity) = {
            let state = self.state(character_id)?;
            (state.last_spiral_active, state.last_spiral_intensity)
        };

        let transition = if spiral.in_spiral && !was_active {
            Some((EventType::FinancialSpiralStarted, EventSeverity::High))
        } else if spiral.in_spiral
            && spiral.intensity >= last_intensity + SPIRAL_DEEPENING_STEP
        {
            Some((EventType::FinancialSpiralDeepening, EventSeverity::Critical))
        } else if !spiral.in_spiral && was_active {
            Some((EventType::FinancialSpiralBroken, EventSeverity::Medium))
        } else {
            None
        };

        if let Some((event_type, severity)) = transition {
            let draft = EventDraft::new(
                event_type,
                EventSource::FinancialAdvisory,
                character_id,
                severity,
                match event_type {
                    EventType::FinancialSpiralBroken => {
                        "the losing streak is broken".to_string()
                    }
                    _ => format!(
                        "{} consecutive poor decisions, ${} lost",
                        spiral.consecutive_poor_decisions, spiral.total_losses
                    ),
                },
            )
            .with_details(EventDetails::Spiral {
                spiral_intensity: spiral.intensity,
                consecutive_poor_decisions: spiral.consecutive_poor_decisions,
            });
            self.publish(draft);
        }

        let state = self.state_mut(character_id)?;
        if !spiral.in_spiral && spiral.consecutive_poor_decisions == 0 {
            state.spiral_relief = 0.0;
        }
        state.last_spiral_active = spiral.in_spiral;
        state.last_spiral_intensity = spiral.intensity;
        Ok(())
    }

    // ---- interventions ----------------------------------------------------

    /// Let the coach check on a character and step in when warranted.
    pub fn monitor_character(
        &mut self,
        character_id: &str,
    ) -> Result<Option<PreventionOutcome>, EngineError> {
        let spiral = self.spiral_state(character_id)?;
        let coach = self.state(character_id)?.coach;
        let outcome = match monitor_and_prevent(&spiral, &coach, &mut self.rng) {
            Some(outcome) => outcome,
            None => return Ok(None),
        };

        if outcome.success {
            self.state_mut(character_id)?.spiral_relief += outcome.spiral_reduction;
        }
        let draft = EventDraft::new(
            EventType::FinancialInterventionApplied,
            EventSource::FinancialAdvisory,
            character_id,
            if outcome.success {
                EventSeverity::Medium
            } else {
                EventSeverity::High
            },
            format!("coach stepped in at the {} stage", outcome.stage.as_str()),
        )
        .with_details(EventDetails::Intervention {
            intervention_type: outcome.stage.as_str().to_string(),
            success: outcome.success,
            stress_reduction: 0.0,
            spiral_reduction: outcome.spiral_reduction,
        });
        self.publish(draft);
        self.check_spiral_transition(character_id)?;
        Ok(Some(outcome))
    }

    /// Apply a concrete intervention method. Every attempt is published,
    /// failures included.
    pub fn intervene(
        &mut self,
        character_id: &str,
        method: InterventionMethod,
    ) -> Result<InterventionResult, EngineError> {
        let stress = self.state(character_id)?.stress_level;
        let result = apply_intervention(method, stress, &mut self.rng);

        if result.success {
            let state = self.state_mut(character_id)?;
            state.stress_level = (state.stress_level - result.stress_reduction).max(0.0);
            state.spiral_relief += result.spiral_reduction;
        }
        let draft = EventDraft::new(
            EventType::FinancialInterventionApplied,
            EventSource::FinancialAdvisory,
            character_id,
            if result.success {
                EventSeverity::Medium
            } else {
                EventSeverity::High
            },
            format!("{} intervention", method.as_str()),
        )
        .with_details(EventDetails::Intervention {
            intervention_type: method.as_str().to_string(),
            success: result.success,
            stress_reduction: result.stress_reduction,
            spiral_reduction: result.spiral_reduction,
        });
        self.publish(draft);
        self.check_spiral_transition(character_id)?;
        Ok(result)
    }

    // ---- crises -----------------------------------------------------------

    pub fn crisis(&self, crisis_id: &str) -> Result<&FinancialCrisis, EngineError> {
        self.crises
            .get(crisis_id)
            .ok_or_else(|| EngineError::UnknownCrisis(crisis_id.to_string()))
    }

    pub fn active_crises(&self, character_id: &str) -> Result<Vec<&FinancialCrisis>, EngineError> {
        self.state(character_id)?;
        Ok(self.crises.active_for(character_id))
    }

    /// Resolve a crisis, easing half of its stress hit.
    pub fn resolve_crisis(
        &mut self,
        crisis_id: &str,
        method: impl Into<String>,
    ) -> Result<FinancialCrisis, EngineError> {
        let tick = self.clock.current_tick();
        let crisis = self
            .crises
            .resolve(crisis_id, method, tick)
            .ok_or_else(|| EngineError::UnknownCrisis(crisis_id.to_string()))?
            .clone();

        let draft = EventDraft::new(
            EventType::FinancialBreakthrough,
            EventSource::FinancialAdvisory,
            crisis.character_id.as_str(),
            EventSeverity::Medium,
            format!("worked through {}", crisis.description),
        )
        .with_details(EventDetails::Crisis {
            crisis_id: crisis.id.clone(),
            crisis_type: crisis.crisis_type.as_str().to_string(),
            amount: crisis.amount,
            trauma_level: crisis.psychological_impact.trauma_level,
            stress_increase: -crisis.psychological_impact.stress_increase * 0.5,
            trust_impact: 0.0,
        });
        self.publish(draft);

        let character_id = crisis.character_id.clone();
        if let Ok(state) = self.state_mut(&character_id) {
            state.stress_level = (state.stress_level
                - crisis.psychological_impact.stress_increase * 0.5)
                .max(0.0);
        }
        Ok(crisis)
    }

    fn evaluate_crisis_for(&mut self, character_id: &str) -> Result<Option<String>, EngineError> {
        let (snapshot, behavior) = {
            let state = self.state(character_id)?;
            let behavior = self.behavior_scores_for(&state.snapshot);
            (state.snapshot.clone(), behavior)
        };
        let tick = self.clock.current_tick();
        let crisis = match self
            .crises
            .evaluate(&snapshot, &behavior, &mut self.rng, tick)
        {
            Some(crisis) => crisis,
            None => return Ok(None),
        };
        debug!(
            character = character_id,
            crisis = %crisis.id,
            kind = crisis.crisis_type.as_str(),
            amount = crisis.amount,
            "crisis fired"
        );

        let severity = match crisis.severity {
            CrisisSeverity::Minor => EventSeverity::Low,
            CrisisSeverity::Moderate => EventSeverity::Medium,
            CrisisSeverity::Major => EventSeverity::High,
            CrisisSeverity::Catastrophic => EventSeverity::Critical,
        };
        let draft = EventDraft::new(
            EventType::FinancialCrisis,
            EventSource::External,
            character_id,
            severity,
            crisis.description.clone(),
        )
        .with_details(EventDetails::Crisis {
            crisis_id: crisis.id.clone(),
            crisis_type: crisis.crisis_type.as_str().to_string(),
            amount: crisis.amount,
            trauma_level: crisis.psychological_impact.trauma_level,
            stress_increase: crisis.psychological_impact.stress_increase,
            trust_impact: crisis.psychological_impact.trust_impact,
        })
        .with_extra(
            "trigger_factors",
            serde_json::to_value(&crisis.trigger_factors).unwrap_or_default(),
        );
        self.publish(draft);

        {
            let state = self.state_mut(character_id)?;
            state.stress_level = (state.stress_level
                + crisis.psychological_impact.stress_increase)
                .min(100.0);
        }
        self.adjust_coach_trust(character_id, crisis.psychological_impact.trust_impact)?;
        Ok(Some(crisis.id))
    }

    // ---- luxury -----------------------------------------------------------

    /// Record a luxury purchase and publish it.
    pub fn purchase_luxury(
        &mut self,
        character_id: &str,
        category: LuxuryCategory,
        amount: i64,
        description: impl Into<String>,
    ) -> Result<LuxuryPurchase, EngineError> {
        if amount <= 0 {
            return Err(EngineError::InvalidInput(
                "purchase amount must be positive".to_string(),
            ));
        }
        let snapshot = self.state(character_id)?.snapshot.clone();
        let tick = self.clock.current_tick();
        let description = description.into();
        let purchase = self
            .luxuries
            .process_purchase(&snapshot, category, amount, description.clone(), tick)
            .clone();

        let draft = EventDraft::new(
            EventType::LuxuryPurchase,
            EventSource::Marketplace,
            character_id,
            EventSeverity::Low,
            description,
        )
        .with_details(EventDetails::Luxury {
            purchase_id: purchase.id.clone(),
            amount,
            category: category.as_str().to_string(),
            happiness_effect: purchase.initial_happiness_boost,
        });
        self.publish(draft);
        Ok(purchase)
    }

    pub fn purchase(&self, purchase_id: &str) -> Result<&LuxuryPurchase, EngineError> {
        self.luxuries
            .get(purchase_id)
            .ok_or_else(|| EngineError::UnknownPurchase(purchase_id.to_string()))
    }

    pub fn luxury_happiness(&self, character_id: &str) -> Result<f64, EngineError> {
        self.state(character_id)?;
        Ok(self.luxuries.current_happiness(character_id))
    }

    pub fn addiction_risk(&self, character_id: &str) -> Result<AddictionRisk, EngineError> {
        self.state(character_id)?;
        Ok(self.luxuries.addiction_risk(character_id, &self.clock))
    }

    // ---- ledger access ----------------------------------------------------

    /// Publish a collaborator event (battles, kitchen scenes, therapy).
    pub fn record_event(&mut self, draft: EventDraft) -> Result<GameEvent, EngineError> {
        if !self.roster.contains_key(&draft.primary_character_id) {
            return Err(EngineError::UnknownCharacter(
                draft.primary_character_id.clone(),
            ));
        }
        for secondary in &draft.secondary_character_ids {
            if !self.roster.contains_key(secondary) {
                return Err(EngineError::UnknownCharacter(secondary.clone()));
            }
        }
        Ok(self.publish(draft))
    }

    fn publish(&mut self, draft: EventDraft) -> GameEvent {
        self.ledger.publish(draft, self.clock.current_tick()).clone()
    }

    pub fn events_for(
        &self,
        character_id: &str,
        filter: &EventFilter,
    ) -> Result<Vec<&GameEvent>, EngineError> {
        self.state(character_id)?;
        Ok(self
            .ledger
            .query_character(character_id, filter, self.clock.current_tick()))
    }

    pub fn memories_of(
        &self,
        character_id: &str,
        filter: &MemoryFilter,
    ) -> Result<Vec<&Memory>, EngineError> {
        self.state(character_id)?;
        Ok(self.ledger.memories().query(character_id, filter))
    }

    /// Recall a memory, reinforcing it.
    pub fn recall_memory(&mut self, memory_id: &str) -> Result<Memory, EngineError> {
        let tick = self.clock.current_tick();
        self.ledger
            .memories_mut()
            .recall(memory_id, tick)
            .cloned()
            .ok_or_else(|| EngineError::UnknownMemory(memory_id.to_string()))
    }

    pub fn relationships_of(
        &self,
        character_id: &str,
    ) -> Result<Vec<&Relationship>, EngineError> {
        self.state(character_id)?;
        Ok(self.ledger.relationships().relationships_of(character_id))
    }

    pub fn relationship(
        &self,
        character_id: &str,
        target_id: &str,
    ) -> Result<Option<&Relationship>, EngineError> {
        self.state(character_id)?;
        Ok(self.ledger.relationships().get(character_id, target_id))
    }

    pub fn subscribe(&mut self, filter: SubscriptionFilter) -> Uuid {
        self.ledger.subscribe(filter)
    }

    pub fn drain_subscription(&mut self, handle: Uuid) -> Vec<GameEvent> {
        self.ledger.drain(handle)
    }

    pub fn unsubscribe(&mut self, handle: Uuid) -> bool {
        self.ledger.unsubscribe(handle)
    }

    // ---- tick loop --------------------------------------------------------

    /// Advance one tick: luxury decay every tick; crisis evaluation, stress
    /// refresh and retention sweep at end of day.
    ///
    /// Per-character failures are logged and skipped so one bad roster entry
    /// cannot stall the whole roster.
    pub fn tick(&mut self) -> TickReport {
        self.clock.advance_tick();
        let mut report = TickReport {
            tick: self.clock.current_tick(),
            day: self.clock.current_day(),
            end_of_day: self.clock.is_end_of_day(),
            ..TickReport::default()
        };

        report.luxury_reports = self.luxuries.decay_pass(&self.clock);
        for decay in report.luxury_reports.clone() {
            self.publish_decay(decay);
        }

        if report.end_of_day {
            let roster: Vec<String> = self.roster.keys().cloned().collect();
            for character_id in roster {
                match self.end_of_day_pass(&character_id) {
                    Ok(Some(crisis_id)) => report.crises_fired.push(crisis_id),
                    Ok(None) => {}
                    Err(error) => {
                        warn!(character = %character_id, %error, "end-of-day pass failed");
                    }
                }
            }
            let (events, memories) = self.ledger.sweep(self.clock.current_tick());
            report.events_swept = events;
            report.memories_swept = memories;
        }
        report
    }

    fn end_of_day_pass(&mut self, character_id: &str) -> Result<Option<String>, EngineError> {
        let fired = self.evaluate_crisis_for(character_id)?;
        self.update_stress(character_id)?;
        self.check_spiral_transition(character_id)?;
        Ok(fired)
    }

    fn publish_decay(&mut self, decay: DecayReport) {
        let (description, tag) = match decay.milestone {
            DecayMilestone::HalfFaded => (
                format!(
                    "the thrill of the ${} {} purchase is fading",
                    decay.amount,
                    decay.category.as_str()
                ),
                "half_faded",
            ),
            DecayMilestone::Faded => (
                format!(
                    "the ${} {} purchase no longer brings any joy",
                    decay.amount,
                    decay.category.as_str()
                ),
                "faded",
            ),
        };
        let draft = EventDraft::new(
            EventType::LuxuryPurchase,
            EventSource::Marketplace,
            decay.character_id.as_str(),
            EventSeverity::Low,
            description,
        )
        .with_details(EventDetails::Luxury {
            purchase_id: decay.purchase_id.clone(),
            amount: decay.amount,
            category: decay.category.as_str().to_string(),
            happiness_effect: decay.remaining_effect,
        })
        .with_tags(vec![tag.to_string()]);
        self.publish(draft);
    }
}
