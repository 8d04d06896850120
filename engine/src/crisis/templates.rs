//! Crisis template table
//!
//! Fixed evaluation order. Trait modifiers are expressed at trait = 100 and
//! scaled down linearly; behavior triggers multiply the 0-1 behavior scores.

use crate::models::crisis::{
    BehaviorTriggers, CrisisTemplate, CrisisType, SeverityDistribution, TraumaFactors,
};

pub const TEMPLATES: [CrisisTemplate; 6] = [
    CrisisTemplate {
        crisis_type: CrisisType::MedicalEmergency,
        name: "medical emergency",
        base_probability: 0.05,
        amount_range: (2_000, 25_000),
        severity_distribution: SeverityDistribution {
            minor: 0.4,
            moderate: 0.35,
            major: 0.2,
            catastrophic: 0.05,
        },
        personality_modifiers: &[("risk_tolerance", -0.3), ("financial_wisdom", -0.2)],
        behavior_triggers: BehaviorTriggers {
            luxury_spending: 0.1,
            poor_decisions: 0.05,
            low_savings: 0.3,
            risk_taking: 0.15,
        },
        description: "an unexpected medical bill",
        resolution_time_range: (1, 30),
        trauma_factors: TraumaFactors {
            unexpectedness: 0.8,
            controllability: 0.2,
            social_impact: 0.3,
        },
    },
    CrisisTemplate {
        crisis_type: CrisisType::JobLoss,
        name: "loss of income",
        base_probability: 0.03,
        amount_range: (5_000, 50_000),
        severity_distribution: SeverityDistribution {
            minor: 0.2,
            moderate: 0.4,
            major: 0.3,
            catastrophic: 0.1,
        },
        personality_modifiers: &[("charisma", -0.2), ("financial_wisdom", -0.1)],
        behavior_triggers: BehaviorTriggers {
            luxury_spending: 0.2,
            poor_decisions: 0.1,
            low_savings: 0.4,
            risk_taking: 0.05,
        },
        description: "a sudden loss of earnings",
        resolution_time_range: (30, 180),
        trauma_factors: TraumaFactors {
            unexpectedness: 0.7,
            controllability: 0.3,
            social_impact: 0.6,
        },
    },
    CrisisTemplate {
        crisis_type: CrisisType::MajorExpense,
        name: "major unplanned expense",
        base_probability: 0.08,
        amount_range: (1_500, 15_000),
        severity_distribution: SeverityDistribution {
            minor: 0.5,
            moderate: 0.3,
            major: 0.15,
            catastrophic: 0.05,
        },
        personality_modifiers: &[("financial_wisdom", -0.25), ("risk_tolerance", 0.1)],
        behavior_triggers: BehaviorTriggers {
            luxury_spending: 0.15,
            poor_decisions: 0.2,
            low_savings: 0.25,
            risk_taking: 0.1,
        },
        description: "a major repair that cannot wait",
        resolution_time_range: (1, 7),
        trauma_factors: TraumaFactors {
            unexpectedness: 0.6,
            controllability: 0.4,
            social_impact: 0.2,
        },
    },
    CrisisTemplate {
        crisis_type: CrisisType::ScamVictim,
        name: "financial scam",
        base_probability: 0.02,
        amount_range: (500, 20_000),
        severity_distribution: SeverityDistribution {
            minor: 0.3,
            moderate: 0.4,
            major: 0.25,
            catastrophic: 0.05,
        },
        personality_modifiers: &[("financial_wisdom", -0.4), ("risk_tolerance", 0.2)],
        behavior_triggers: BehaviorTriggers {
            luxury_spending: 0.1,
            poor_decisions: 0.3,
            low_savings: 0.1,
            risk_taking: 0.25,
        },
        description: "money lost to a convincing scam",
        resolution_time_range: (1, 90),
        trauma_factors: TraumaFactors {
            unexpectedness: 0.9,
            controllability: 0.1,
            social_impact: 0.7,
        },
    },
    CrisisTemplate {
        crisis_type: CrisisType::MarketCrash,
        name: "investment crash",
        base_probability: 0.04,
        amount_range: (1_000, 100_000),
        severity_distribution: SeverityDistribution {
            minor: 0.3,
            moderate: 0.35,
            major: 0.25,
            catastrophic: 0.1,
        },
        personality_modifiers: &[("risk_tolerance", 0.3), ("financial_wisdom", -0.1)],
        behavior_triggers: BehaviorTriggers {
            luxury_spending: 0.05,
            poor_decisions: 0.2,
            low_savings: 0.1,
            risk_taking: 0.4,
        },
        description: "investments wiped out by a market crash",
        resolution_time_range: (30, 365),
        trauma_factors: TraumaFactors {
            unexpectedness: 0.5,
            controllability: 0.3,
            social_impact: 0.4,
        },
    },
    CrisisTemplate {
        crisis_type: CrisisType::HousingCrisis,
        name: "housing emergency",
        base_probability: 0.03,
        amount_range: (3_000, 30_000),
        severity_distribution: SeverityDistribution {
            minor: 0.25,
            moderate: 0.4,
            major: 0.25,
            catastrophic: 0.1,
        },
        personality_modifiers: &[("financial_wisdom", -0.2), ("risk_tolerance", 0.1)],
        behavior_triggers: BehaviorTriggers {
            luxury_spending: 0.2,
            poor_decisions: 0.15,
            low_savings: 0.35,
            risk_taking: 0.1,
        },
        description: "an urgent housing cost",
        resolution_time_range: (7, 60),
        trauma_factors: TraumaFactors {
            unexpectedness: 0.6,
            controllability: 0.4,
            social_impact: 0.5,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_weights_sum_to_one() {
        for template in &TEMPLATES {
            let d = template.severity_distribution;
            let sum = d.minor + d.moderate + d.major + d.catastrophic;
            assert!((sum - 1.0).abs() < 1e-9, "{}", template.name);
        }
    }

    #[test]
    fn test_amount_and_resolution_ranges_ordered() {
        for template in &TEMPLATES {
            assert!(template.amount_range.0 < template.amount_range.1);
            assert!(template.resolution_time_range.0 < template.resolution_time_range.1);
        }
    }
}
