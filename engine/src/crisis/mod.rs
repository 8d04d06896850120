//! Crisis generator
//!
//! Evaluated once per in-game day per character. Templates are tried in
//! table order; the first probability roll that hits materializes a crisis
//! and ends the evaluation, so at most one crisis fires per character per
//! day. Active crises damp further probability, and the total chance per
//! template is hard-capped.

pub mod templates;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::crisis::{
    CrisisTemplate, FinancialCrisis, OngoingEffects, PsychologicalImpact,
};
use crate::models::personality::CharacterSnapshot;
use crate::rng::RngManager;
use templates::TEMPLATES;

/// Hard ceiling on any single template's per-day probability.
pub const CRISIS_PROBABILITY_CAP: f64 = 0.2;
/// Probability damping per already-active crisis.
const ACTIVE_CRISIS_DAMPING: f64 = 0.3;
const MIN_DAMPING_FLOOR: f64 = 0.1;

/// 30-day behavior scores, each 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BehaviorScores {
    pub luxury_spending: f64,
    pub poor_decisions: f64,
    pub low_savings: f64,
    pub risk_taking: f64,
}

impl BehaviorScores {
    /// Derive scores from a roster snapshot and 30-day ledger aggregates.
    pub fn derive(
        snapshot: &CharacterSnapshot,
        luxury_spending_30d: i64,
        negative_decisions_30d: usize,
    ) -> Self {
        let low_savings = if snapshot.monthly_earnings <= 0 {
            // No income: only score against drained reserves.
            if snapshot.wallet <= 0 {
                1.0
            } else {
                0.0
            }
        } else {
            (1.0 - snapshot.wallet as f64 / (3.0 * snapshot.monthly_earnings as f64))
                .clamp(0.0, 1.0)
        };
        Self {
            luxury_spending: (luxury_spending_30d.max(0) as f64 / 10_000.0).min(1.0),
            poor_decisions: (negative_decisions_30d as f64 / 5.0).min(1.0),
            low_savings,
            risk_taking: snapshot.personality.risk_tolerance / 100.0,
        }
    }
}

/// Per-day crisis probability for one template.
pub fn crisis_probability(
    template: &CrisisTemplate,
    snapshot: &CharacterSnapshot,
    behavior: &BehaviorScores,
    active_crises: usize,
) -> f64 {
    let mut probability = template.base_probability;
    for (trait_name, modifier) in template.personality_modifiers {
        probability += modifier * snapshot.personality.trait_value(trait_name) / 100.0;
    }
    let triggers = &template.behavior_triggers;
    probability += triggers.luxury_spending * behavior.luxury_spending
        + triggers.poor_decisions * behavior.poor_decisions
        + triggers.low_savings * behavior.low_savings
        + triggers.risk_taking * behavior.risk_taking;

    let damping = (1.0 - active_crises as f64 * ACTIVE_CRISIS_DAMPING).max(MIN_DAMPING_FLOOR);
    (probability * damping).clamp(0.0, CRISIS_PROBABILITY_CAP)
}

fn trigger_factors(template: &CrisisTemplate, behavior: &BehaviorScores) -> Vec<String> {
    let mut factors = vec![template.description.to_string()];
    if behavior.luxury_spending > 0.5 {
        factors.push("heavy luxury spending".to_string());
    }
    if behavior.poor_decisions > 0.5 {
        factors.push("a run of poor decisions".to_string());
    }
    if behavior.low_savings > 0.5 {
        factors.push("thin savings".to_string());
    }
    if behavior.risk_taking > 0.7 {
        factors.push("high appetite for risk".to_string());
    }
    factors
}

/// Owns every crisis, active and resolved, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrisisGenerator {
    crises: HashMap<String, FinancialCrisis>,
    next_crisis_number: u64,
}

impl CrisisGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.next_crisis_number += 1;
        format!("crisis_{:06}", self.next_crisis_number)
    }

    pub fn get(&self, crisis_id: &str) -> Option<&FinancialCrisis> {
        self.crises.get(crisis_id)
    }

    /// Unresolved crises of one character, oldest first.
    pub fn active_for(&self, character_id: &str) -> Vec<&FinancialCrisis> {
        let mut active: Vec<&FinancialCrisis> = self
            .crises
            .values()
            .filter(|c| c.character_id == character_id && !c.is_resolved)
            .collect();
        active.sort_by(|a, b| a.triggered_tick.cmp(&b.triggered_tick).then(a.id.cmp(&b.id)));
        active
    }

    /// All crises of one character, resolved included, oldest first.
    pub fn crises_for(&self, character_id: &str) -> Vec<&FinancialCrisis> {
        let mut all: Vec<&FinancialCrisis> = self
            .crises
            .values()
            .filter(|c| c.character_id == character_id)
            .collect();
        all.sort_by(|a, b| a.triggered_tick.cmp(&b.triggered_tick).then(a.id.cmp(&b.id)));
        all
    }

    pub fn active_count(&self, character_id: &str) -> usize {
        self.crises
            .values()
            .filter(|c| c.character_id == character_id && !c.is_resolved)
            .count()
    }

    /// Run the per-day evaluation for one character.
    ///
    /// Consumes RNG draws in template-table order, so the same seed and
    /// inputs always produce the same crisis (or none).
    pub fn evaluate(
        &mut self,
        snapshot: &CharacterSnapshot,
        behavior: &BehaviorScores,
        rng: &mut RngManager,
        tick: usize,
    ) -> Option<FinancialCrisis> {
        let active = self.active_count(&snapshot.id);
        for template in &TEMPLATES {
            let probability = crisis_probability(template, snapshot, behavior, active);
            if rng.chance(probability) {
                let crisis = self.materialize(template, snapshot, behavior, rng, tick);
                return Some(crisis);
            }
        }
        None
    }

    fn materialize(
        &mut self,
        template: &CrisisTemplate,
        snapshot: &CharacterSnapshot,
        behavior: &BehaviorScores,
        rng: &mut RngManager,
        tick: usize,
    ) -> FinancialCrisis {
        let severity = template.severity_distribution.draw(rng.next_f64());

        let (min_amount, max_amount) = template.amount_range;
        let amount_roll = rng.next_f64();
        let amount = ((min_amount as f64 + (max_amount - min_amount) as f64 * amount_roll)
            * severity.amount_multiplier())
        .round() as i64;

        let factors = template.trauma_factors;
        let trauma_level = ((factors.unexpectedness * 30.0
            + (1.0 - factors.controllability) * 20.0
            + factors.social_impact * 25.0)
            * severity.impact_multiplier())
        .min(100.0);

        let (min_days, max_days) = template.resolution_time_range;
        let resolution_roll = rng.next_f64();
        let time_to_resolve = ((min_days as f64
            + (max_days - min_days) as f64 * resolution_roll * severity.impact_multiplier())
        .round() as u32)
            .clamp(min_days, max_days * 2);

        let crisis = FinancialCrisis {
            id: self.next_id(),
            crisis_type: template.crisis_type,
            character_id: snapshot.id.clone(),
            triggered_tick: tick,
            severity,
            amount,
            description: format!("A {} {}: ${}", severity.descriptor(), template.name, amount),
            trigger_factors: trigger_factors(template, behavior),
            time_to_resolve,
            psychological_impact: PsychologicalImpact {
                stress_increase: 0.8 * trauma_level,
                trust_impact: -0.3 * trauma_level,
                trauma_level,
            },
            ongoing_effects: OngoingEffects {
                monthly_stress_penalty: 0.1 * trauma_level,
                decision_quality_penalty: 0.15 * trauma_level,
                duration_days: time_to_resolve + trauma_level.round() as u32,
            },
            is_resolved: false,
            resolution_method: None,
            resolution_tick: None,
        };
        self.crises.insert(crisis.id.clone(), crisis.clone());
        crisis
    }

    /// Mark a crisis resolved. Returns the resolved crisis, or None for
    /// unknown ids; resolving twice is a no-op that returns the crisis.
    pub fn resolve(
        &mut self,
        crisis_id: &str,
        method: impl Into<String>,
        tick: usize,
    ) -> Option<&FinancialCrisis> {
        let crisis = self.crises.get_mut(crisis_id)?;
        if !crisis.is_resolved {
            crisis.is_resolved = true;
            crisis.resolution_method = Some(method.into());
            crisis.resolution_tick = Some(tick);
        }
        Some(crisis)
    }
}
