//! Financial personality, decision history and roster inputs
//!
//! These are read-only inputs to the psychological models. The engine does not
//! own character persistence; collaborators push roster snapshots in and the
//! models treat them as plain data.
//!
//! CRITICAL: all money values are i64 whole dollars.

use crate::models::event::ImpactDirection;
use serde::{Deserialize, Serialize};

/// How a character approaches spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingStyle {
    Conservative,
    Moderate,
    Impulsive,
    Strategic,
}

impl SpendingStyle {
    /// Baseline impulsiveness for the decision-quality model (0-100).
    pub fn base_impulsiveness(&self) -> f64 {
        match self {
            SpendingStyle::Impulsive => 85.0,
            SpendingStyle::Moderate => 50.0,
            SpendingStyle::Conservative => 20.0,
            SpendingStyle::Strategic => 15.0,
        }
    }
}

/// Static-ish financial personality traits for one character.
///
/// All trait scores are 0-100. Read-only input to every model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPersonality {
    pub spending_style: SpendingStyle,
    /// Motivation keywords: "status", "power", "experience", "security", ...
    pub money_motivations: Vec<String>,
    pub financial_wisdom: f64,
    pub risk_tolerance: f64,
    pub luxury_desire: f64,
    pub generosity: f64,
    /// Known past traumas (narrative keys, opaque to the models).
    pub financial_traumas: Vec<String>,
}

impl FinancialPersonality {
    /// Neutral personality used when a roster entry carries none.
    pub fn default_moderate() -> Self {
        Self {
            spending_style: SpendingStyle::Moderate,
            money_motivations: vec!["security".to_string()],
            financial_wisdom: 50.0,
            risk_tolerance: 50.0,
            luxury_desire: 50.0,
            generosity: 50.0,
            financial_traumas: Vec::new(),
        }
    }

    /// Trait value by name, for the crisis templates' personality modifiers.
    /// Unknown traits read as the neutral 50.
    pub fn trait_value(&self, name: &str) -> f64 {
        match name {
            "financial_wisdom" => self.financial_wisdom,
            "risk_tolerance" => self.risk_tolerance,
            "luxury_desire" => self.luxury_desire,
            "generosity" => self.generosity,
            _ => 50.0,
        }
    }

    pub fn has_motivation(&self, motivation: &str) -> bool {
        self.money_motivations.iter().any(|m| m == motivation)
    }
}

/// Category of a financial decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionCategory {
    Investment,
    LuxuryPurchase,
    RealEstate,
    Party,
    Wildcard,
}

impl DecisionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionCategory::Investment => "investment",
            DecisionCategory::LuxuryPurchase => "luxury_purchase",
            DecisionCategory::RealEstate => "real_estate",
            DecisionCategory::Party => "party",
            DecisionCategory::Wildcard => "wildcard",
        }
    }
}

/// One historical financial decision. Append-only input to the
/// decision-quality and spiral models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialDecision {
    pub character_id: String,
    pub category: DecisionCategory,
    /// Amount committed by the decision (dollars, non-negative).
    pub amount: i64,
    pub outcome: ImpactDirection,
    pub followed_advice: bool,
    pub coach_advice: Option<String>,
    /// Realized impact on the wallet (signed dollars).
    pub financial_impact: i64,
    pub description: String,
    pub timestamp_tick: usize,
}

/// Roster snapshot for one character, pulled on demand from collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub id: String,
    /// Liquid funds (dollars; may be negative = debt).
    pub wallet: i64,
    pub monthly_earnings: i64,
    pub total_assets: i64,
    pub personality: FinancialPersonality,
    pub recent_decisions: Vec<FinancialDecision>,
}

/// Coach attributes consumed by the intervention engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachProfile {
    pub level: u32,
    /// Character's trust in this coach, 0-100.
    pub trust: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_impulsiveness_ordering() {
        assert!(
            SpendingStyle::Impulsive.base_impulsiveness()
                > SpendingStyle::Moderate.base_impulsiveness()
        );
        assert!(
            SpendingStyle::Conservative.base_impulsiveness()
                > SpendingStyle::Strategic.base_impulsiveness()
        );
    }

    #[test]
    fn test_trait_value_lookup() {
        let mut p = FinancialPersonality::default_moderate();
        p.financial_wisdom = 72.0;
        assert_eq!(p.trait_value("financial_wisdom"), 72.0);
        assert_eq!(p.trait_value("charisma"), 50.0); // unknown trait is neutral
    }

    #[test]
    fn test_has_motivation() {
        let p = FinancialPersonality::default_moderate();
        assert!(p.has_motivation("security"));
        assert!(!p.has_motivation("status"));
    }
}
