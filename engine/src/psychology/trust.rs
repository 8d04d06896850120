//! Trust in coach financial advice
//!
//! A weighted blend of the standing coach relationship, how past advice
//! worked out, recent decision outcomes, personality fit and current stress.
//! Individual decisions also nudge trust directly through
//! [`advice_trust_delta`].

use serde::{Deserialize, Serialize};

use crate::models::event::ImpactDirection;
use crate::models::personality::{FinancialDecision, FinancialPersonality, SpendingStyle};

const WEIGHT_BASE: f64 = 0.3;
const WEIGHT_ADVICE_SUCCESS: f64 = 0.3;
const WEIGHT_OUTCOMES: f64 = 0.2;
const WEIGHT_PERSONALITY: f64 = 0.1;
const WEIGHT_STRESS: f64 = 0.1;

/// Trust read-out with its components (all 0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialTrust {
    pub trust_level: f64,
    pub advice_success_rate: f64,
    pub recent_outcome_score: f64,
    pub personality_match: f64,
    pub stress_influence: f64,
}

fn advice_success_rate(decisions: &[FinancialDecision]) -> f64 {
    let followed: Vec<&FinancialDecision> =
        decisions.iter().filter(|d| d.followed_advice).collect();
    if followed.is_empty() {
        return 50.0;
    }
    let positive = followed
        .iter()
        .filter(|d| d.outcome == ImpactDirection::Positive)
        .count();
    positive as f64 / followed.len() as f64 * 100.0
}

/// Score of the last five decisions, 0 (all losses) to 100 (all wins).
fn recent_outcome_score(decisions: &[FinancialDecision]) -> f64 {
    let mut recent: Vec<&FinancialDecision> = decisions.iter().collect();
    recent.sort_by(|a, b| b.timestamp_tick.cmp(&a.timestamp_tick));
    recent.truncate(5);
    if recent.is_empty() {
        return 50.0;
    }
    let positive = recent
        .iter()
        .filter(|d| d.outcome == ImpactDirection::Positive)
        .count() as f64;
    let negative = recent
        .iter()
        .filter(|d| d.outcome == ImpactDirection::Negative)
        .count() as f64;
    (positive - negative) / recent.len() as f64 * 50.0 + 50.0
}

fn personality_match(personality: &FinancialPersonality) -> f64 {
    let mut score: f64 = 50.0;
    match personality.spending_style {
        SpendingStyle::Conservative => score += 20.0,
        SpendingStyle::Strategic => score += 15.0,
        SpendingStyle::Impulsive => score -= 15.0,
        SpendingStyle::Moderate => {}
    }
    if personality.financial_wisdom > 70.0 {
        score += 10.0;
    } else if personality.financial_wisdom < 40.0 {
        score += 5.0; // knows they need the help
    }
    score.clamp(0.0, 100.0)
}

/// Compute overall trust in the coach's financial advice.
pub fn assess_financial_trust(
    personality: &FinancialPersonality,
    decisions: &[FinancialDecision],
    base_coach_trust: f64,
    stress_level: f64,
) -> FinancialTrust {
    let advice = advice_success_rate(decisions);
    let outcomes = recent_outcome_score(decisions);
    let matching = personality_match(personality);
    let stress_influence = (100.0 - stress_level * 0.8).max(0.0);

    let trust_level = (base_coach_trust * WEIGHT_BASE
        + advice * WEIGHT_ADVICE_SUCCESS
        + outcomes * WEIGHT_OUTCOMES
        + matching * WEIGHT_PERSONALITY
        + stress_influence * WEIGHT_STRESS)
        .clamp(0.0, 100.0);

    FinancialTrust {
        trust_level,
        advice_success_rate: advice,
        recent_outcome_score: outcomes,
        personality_match: matching,
        stress_influence,
    }
}

/// Direct trust adjustment from one resolved decision.
///
/// Following advice that works builds trust fast; ignoring advice that
/// would have helped erodes it.
pub fn advice_trust_delta(decision: &FinancialDecision) -> f64 {
    match (decision.followed_advice, decision.outcome) {
        (true, ImpactDirection::Positive) => 8.0,
        (true, ImpactDirection::Negative) => -5.0,
        (true, ImpactDirection::Neutral) => 1.0,
        (false, ImpactDirection::Positive) => -3.0,
        (false, ImpactDirection::Negative) => 2.0,
        (false, ImpactDirection::Neutral) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::personality::DecisionCategory;

    fn decision(tick: usize, followed: bool, outcome: ImpactDirection) -> FinancialDecision {
        FinancialDecision {
            character_id: "test".to_string(),
            category: DecisionCategory::Investment,
            amount: 1000,
            outcome,
            followed_advice: followed,
            coach_advice: followed.then(|| "diversify".to_string()),
            financial_impact: match outcome {
                ImpactDirection::Positive => 500,
                ImpactDirection::Negative => -500,
                ImpactDirection::Neutral => 0,
            },
            description: "test decision".to_string(),
            timestamp_tick: tick,
        }
    }

    #[test]
    fn test_no_history_is_neutral() {
        let trust =
            assess_financial_trust(&FinancialPersonality::default_moderate(), &[], 50.0, 0.0);
        assert_eq!(trust.advice_success_rate, 50.0);
        assert_eq!(trust.recent_outcome_score, 50.0);
        // 50*.3 + 50*.3 + 50*.2 + 50*.1 + 100*.1 = 55
        assert!((trust.trust_level - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_successful_advice_builds_trust() {
        let good: Vec<FinancialDecision> = (0..4)
            .map(|i| decision(i, true, ImpactDirection::Positive))
            .collect();
        let bad: Vec<FinancialDecision> = (0..4)
            .map(|i| decision(i, true, ImpactDirection::Negative))
            .collect();
        let p = FinancialPersonality::default_moderate();
        let high = assess_financial_trust(&p, &good, 50.0, 0.0);
        let low = assess_financial_trust(&p, &bad, 50.0, 0.0);
        assert_eq!(high.advice_success_rate, 100.0);
        assert_eq!(low.advice_success_rate, 0.0);
        assert!(high.trust_level > low.trust_level);
    }

    #[test]
    fn test_outcome_score_uses_last_five() {
        let mut decisions: Vec<FinancialDecision> = (0..5)
            .map(|i| decision(i, false, ImpactDirection::Negative))
            .collect();
        decisions.extend((5..10).map(|i| decision(i, false, ImpactDirection::Positive)));
        let trust = assess_financial_trust(
            &FinancialPersonality::default_moderate(),
            &decisions,
            50.0,
            0.0,
        );
        assert_eq!(trust.recent_outcome_score, 100.0);
    }

    #[test]
    fn test_stress_erodes_trust() {
        let p = FinancialPersonality::default_moderate();
        let calm = assess_financial_trust(&p, &[], 50.0, 0.0);
        let stressed = assess_financial_trust(&p, &[], 50.0, 90.0);
        assert!(stressed.trust_level < calm.trust_level);
        assert_eq!(stressed.stress_influence, 28.0);
    }

    #[test]
    fn test_personality_match_by_style() {
        let mut p = FinancialPersonality::default_moderate();
        p.spending_style = SpendingStyle::Conservative;
        let conservative = personality_match(&p);
        p.spending_style = SpendingStyle::Impulsive;
        let impulsive = personality_match(&p);
        assert_eq!(conservative, 70.0);
        assert_eq!(impulsive, 35.0);
    }

    #[test]
    fn test_advice_deltas() {
        assert_eq!(
            advice_trust_delta(&decision(0, true, ImpactDirection::Positive)),
            8.0
        );
        assert_eq!(
            advice_trust_delta(&decision(0, true, ImpactDirection::Negative)),
            -5.0
        );
        assert_eq!(
            advice_trust_delta(&decision(0, false, ImpactDirection::Positive)),
            -3.0
        );
        assert_eq!(
            advice_trust_delta(&decision(0, false, ImpactDirection::Neutral)),
            0.0
        );
    }
}
