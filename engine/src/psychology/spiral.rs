//! Loss-spiral detection
//!
//! Scans the trailing 30 days of decisions newest-first and counts the
//! unbroken run of poor outcomes. A positive outcome ends the run; neutral
//! outcomes neither count nor break it.

use serde::{Deserialize, Serialize};

use crate::models::event::ImpactDirection;
use crate::models::personality::FinancialDecision;

/// A decision counts as poor below this realized impact.
const POOR_DECISION_IMPACT_FLOOR: i64 = -1000;
/// Trailing window scanned for the streak.
const SPIRAL_WINDOW_DAYS: usize = 30;

/// Current spiral read-out for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralState {
    pub character_id: String,
    pub in_spiral: bool,
    /// 0-100
    pub intensity: f64,
    pub consecutive_poor_decisions: usize,
    /// Accumulated dollars lost across the streak.
    pub total_losses: i64,
    /// Description of the decision that started the streak.
    pub trigger: Option<String>,
    pub needs_intervention: bool,
    pub recommendations: Vec<String>,
}

impl SpiralState {
    pub fn calm(character_id: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            in_spiral: false,
            intensity: 0.0,
            consecutive_poor_decisions: 0,
            total_losses: 0,
            trigger: None,
            needs_intervention: false,
            recommendations: Vec::new(),
        }
    }
}

fn is_poor(decision: &FinancialDecision) -> bool {
    decision.outcome == ImpactDirection::Negative
        || decision.financial_impact < POOR_DECISION_IMPACT_FLOOR
}

fn recommendations_for(streak: usize, stress_level: f64) -> Vec<String> {
    let mut recommendations = vec![
        "Take a cooling-off period before the next decision".to_string(),
        "Review the recent losses with the coach".to_string(),
        "Set a hard spending limit until the streak breaks".to_string(),
    ];
    if stress_level > 70.0 {
        recommendations.push("Address the underlying stress before deciding anything".to_string());
    }
    if streak >= 4 {
        recommendations.push("Hand budget control to a trusted housemate for a week".to_string());
    }
    recommendations
}

/// Detect whether a character is in a financial spiral.
///
/// `decisions` is the character's full recent history; only the trailing
/// window is considered.
pub fn detect_spiral(
    character_id: &str,
    decisions: &[FinancialDecision],
    stress_level: f64,
    current_tick: usize,
    ticks_per_day: usize,
) -> SpiralState {
    let cutoff = current_tick.saturating_sub(SPIRAL_WINDOW_DAYS * ticks_per_day.max(1));
    let mut window: Vec<&FinancialDecision> = decisions
        .iter()
        .filter(|d| d.timestamp_tick >= cutoff && d.timestamp_tick <= current_tick)
        .collect();
    window.sort_by(|a, b| b.timestamp_tick.cmp(&a.timestamp_tick));

    let mut streak = 0usize;
    let mut total_losses = 0i64;
    let mut trigger = None;
    for decision in &window {
        if is_poor(decision) {
            streak += 1;
            total_losses += decision.financial_impact.min(0).unsigned_abs() as i64;
            trigger = Some(decision.description.clone());
        } else if decision.outcome == ImpactDirection::Positive {
            break;
        }
        // Neutral outcomes continue the scan without counting.
    }

    let loss_intensity = (total_losses as f64 / 1000.0 * 5.0).min(40.0);
    let streak_intensity = (streak as f64 * 10.0).min(30.0);
    let stress_intensity = if stress_level > 70.0 {
        30.0
    } else if stress_level > 50.0 {
        15.0
    } else {
        0.0
    };
    let intensity = (loss_intensity + streak_intensity + stress_intensity).min(100.0);

    let in_spiral = streak >= 3 || (streak >= 2 && stress_level > 60.0);
    let needs_intervention = intensity > 60.0 || streak >= 3;

    SpiralState {
        character_id: character_id.to_string(),
        in_spiral,
        intensity,
        consecutive_poor_decisions: streak,
        total_losses,
        trigger,
        needs_intervention,
        recommendations: if in_spiral {
            recommendations_for(streak, stress_level)
        } else {
            Vec::new()
        },
    }
}
