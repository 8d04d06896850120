//! Decision-quality model
//!
//! Translates personality, stress and spiral state into how well a character
//! decides right now. Desperation mode flips on at stress 80 exactly and
//! slashes how much coach advice gets through.

use serde::{Deserialize, Serialize};

use crate::models::event::ImpactDirection;
use crate::models::personality::FinancialPersonality;
use crate::psychology::spiral::SpiralState;
use crate::rng::RngManager;

/// Stress at which panic overrides advice.
pub const DESPERATION_STRESS_THRESHOLD: f64 = 80.0;

/// Decision-quality read-out, all components 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionQuality {
    pub impulsiveness: f64,
    pub risk_assessment: f64,
    pub long_term_thinking: f64,
    /// How much of the coach's advice actually lands.
    pub coach_influence: f64,
    pub overall_quality: f64,
    /// Spiral intensity echoed for consumers that only read this struct.
    pub spiral_risk: f64,
    pub desperation_mode: bool,
}

/// Compute decision quality for one character.
pub fn assess_decision_quality(
    personality: &FinancialPersonality,
    stress_level: f64,
    spiral: &SpiralState,
    coach_trust: f64,
) -> DecisionQuality {
    let spiral_intensity = if spiral.in_spiral { spiral.intensity } else { 0.0 };

    let mut base_judgment = personality.financial_wisdom;
    if spiral.in_spiral {
        base_judgment *= 1.0 - spiral_intensity / 100.0 * 0.5;
    }

    let stress_retention = (100.0 - stress_level * 1.5).max(0.0);

    let impulsiveness = (personality.spending_style.base_impulsiveness()
        + stress_level * 0.8
        + spiral_intensity * 0.5)
        .min(100.0);

    let risk_assessment = ((personality.risk_tolerance + base_judgment) / 2.0
        - stress_level * 0.6
        - spiral_intensity * 0.4)
        .max(5.0);

    let long_term_thinking = (base_judgment
        - stress_level * 0.7
        - impulsiveness * 0.3
        - spiral_intensity * 0.5)
        .max(3.0);

    let desperation_mode = stress_level >= DESPERATION_STRESS_THRESHOLD;
    let panic_penalty = if desperation_mode {
        50.0
    } else if stress_level > 70.0 {
        30.0
    } else {
        0.0
    };
    let distrust_penalty = spiral_intensity * 0.2;
    let coach_influence = (coach_trust - panic_penalty - distrust_penalty).max(0.0);

    let spiral_penalty = if spiral.in_spiral {
        1.0 - spiral_intensity / 200.0
    } else {
        1.0
    };
    let overall_quality = ((risk_assessment
        + long_term_thinking
        + (100.0 - impulsiveness)
        + coach_influence)
        / 4.0
        * stress_retention
        / 100.0
        * spiral_penalty)
        .max(3.0);

    DecisionQuality {
        impulsiveness,
        risk_assessment,
        long_term_thinking,
        coach_influence,
        overall_quality,
        spiral_risk: spiral_intensity,
        desperation_mode,
    }
}

/// Roll the outcome of a decision made at this quality level.
///
/// Better quality widens the positive band; the remaining probability mass
/// splits one third neutral, two thirds negative.
pub fn simulate_outcome(quality: &DecisionQuality, rng: &mut RngManager) -> ImpactDirection {
    let roll = rng.next_f64() * 100.0;
    if roll < quality.overall_quality {
        ImpactDirection::Positive
    } else if roll < quality.overall_quality + (100.0 - quality.overall_quality) / 3.0 {
        ImpactDirection::Neutral
    } else {
        ImpactDirection::Negative
    }
}
