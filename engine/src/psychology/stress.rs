//! Financial stress model
//!
//! Six additive factors, re-weighted by spending style, clamped to 0-100.
//! Recommendations fire per factor once it crosses its threshold.

use serde::{Deserialize, Serialize};

use crate::models::personality::{CharacterSnapshot, SpendingStyle};

/// Individual factor contributions before style weighting (each 0-90).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StressFactors {
    /// Runway: how many months the wallet covers.
    pub low_money: f64,
    /// Negative wallet.
    pub debt: f64,
    /// Trailing 30-day losses.
    pub recent_losses: f64,
    /// Missing or volatile income.
    pub income_uncertainty: f64,
    /// Falling behind the peer average.
    pub social_pressure: f64,
    /// Distance from the personal savings goal.
    pub goal_pressure: f64,
}

/// Ledger/roster-derived inputs the stress model needs beyond the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StressInputs {
    /// Mean wallet across the roster (peer comparison).
    pub peer_average_wallet: f64,
    /// Sum of losses over the trailing 30 days (non-negative dollars).
    pub losses_30_days: i64,
    /// Count of income swings in the trailing window.
    pub income_volatility_events: usize,
}

/// Result of a stress assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressAssessment {
    /// 0-100
    pub stress_level: f64,
    pub factors: StressFactors,
    pub recommendations: Vec<String>,
}

fn runway_factor(wallet: i64, monthly_earnings: i64) -> f64 {
    let baseline = monthly_earnings.max(1000) as f64;
    let months = wallet as f64 / baseline;
    if months < 1.0 {
        80.0
    } else if months < 3.0 {
        50.0
    } else if months < 6.0 {
        20.0
    } else {
        0.0
    }
}

fn debt_factor(wallet: i64) -> f64 {
    if wallet >= 0 {
        0.0
    } else {
        (wallet.unsigned_abs() as f64 / 1000.0 * 10.0).min(90.0)
    }
}

fn loss_factor(losses_30_days: i64) -> f64 {
    (losses_30_days.max(0) as f64 / 1000.0 * 5.0).min(60.0)
}

fn uncertainty_factor(monthly_earnings: i64, volatility_events: usize) -> f64 {
    let no_income = if monthly_earnings == 0 { 50.0 } else { 0.0 };
    (no_income + 3.0 * volatility_events as f64).min(40.0)
}

fn social_factor(wallet: i64, peer_average: f64) -> f64 {
    if peer_average <= 0.0 {
        return 0.0;
    }
    ((peer_average - wallet as f64) / peer_average * 100.0).clamp(0.0, 30.0)
}

fn goal_factor(snapshot: &CharacterSnapshot) -> f64 {
    let personality = &snapshot.personality;
    let ambition = 1.0
        + personality.luxury_desire / 10.0
        + ((100.0 - personality.risk_tolerance) / 20.0) / 20.0;
    let personal_goal = 10_000.0 * ambition;
    let progress = snapshot.wallet as f64 / personal_goal * 100.0;
    if progress < 25.0 {
        25.0
    } else if progress < 50.0 {
        15.0
    } else if progress < 75.0 {
        5.0
    } else {
        0.0
    }
}

/// (weight on each factor) for one spending style.
fn style_weights(style: SpendingStyle) -> StressFactors {
    let uniform = StressFactors {
        low_money: 1.0,
        debt: 1.0,
        recent_losses: 1.0,
        income_uncertainty: 1.0,
        social_pressure: 1.0,
        goal_pressure: 1.0,
    };
    match style {
        SpendingStyle::Conservative => StressFactors {
            income_uncertainty: 1.5,
            recent_losses: 1.3,
            ..uniform
        },
        SpendingStyle::Impulsive => StressFactors {
            low_money: 1.4,
            social_pressure: 1.3,
            ..uniform
        },
        SpendingStyle::Strategic => StressFactors {
            goal_pressure: 1.3,
            income_uncertainty: 0.8,
            ..uniform
        },
        SpendingStyle::Moderate => uniform,
    }
}

fn recommendations_for(factors: &StressFactors) -> Vec<String> {
    let mut recommendations = Vec::new();
    if factors.low_money > 40.0 {
        recommendations.push("Build an emergency fund covering at least one month".to_string());
    }
    if factors.debt > 30.0 {
        recommendations.push("Prioritize paying down the debt".to_string());
    }
    if factors.recent_losses > 30.0 {
        recommendations.push("Pause discretionary spending until the losses stop".to_string());
    }
    if factors.income_uncertainty > 35.0 {
        recommendations.push("Stabilize income before taking on new commitments".to_string());
    }
    if factors.social_pressure > 20.0 {
        recommendations.push("Stop comparing wallets with housemates".to_string());
    }
    if factors.goal_pressure > 20.0 {
        recommendations.push("Break the savings goal into smaller milestones".to_string());
    }
    recommendations
}

/// Compute the stress read-out for one character.
pub fn assess_stress(snapshot: &CharacterSnapshot, inputs: &StressInputs) -> StressAssessment {
    let factors = StressFactors {
        low_money: runway_factor(snapshot.wallet, snapshot.monthly_earnings),
        debt: debt_factor(snapshot.wallet),
        recent_losses: loss_factor(inputs.losses_30_days),
        income_uncertainty: uncertainty_factor(
            snapshot.monthly_earnings,
            inputs.income_volatility_events,
        ),
        social_pressure: social_factor(snapshot.wallet, inputs.peer_average_wallet),
        goal_pressure: goal_factor(snapshot),
    };

    let weights = style_weights(snapshot.personality.spending_style);
    let total = factors.low_money * weights.low_money
        + factors.debt * weights.debt
        + factors.recent_losses * weights.recent_losses
        + factors.income_uncertainty * weights.income_uncertainty
        + factors.social_pressure * weights.social_pressure
        + factors.goal_pressure * weights.goal_pressure;

    StressAssessment {
        stress_level: total.clamp(0.0, 100.0),
        recommendations: recommendations_for(&factors),
        factors,
    }
}
