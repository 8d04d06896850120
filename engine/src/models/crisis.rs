//! Financial crisis types
//!
//! A crisis is materialized by the generator from a [`CrisisTemplate`] and
//! stays unresolved until explicitly resolved. Resolution is the only
//! mutation a crisis undergoes after creation.

use serde::{Deserialize, Serialize};

/// Category of financial emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisType {
    MedicalEmergency,
    JobLoss,
    MajorExpense,
    ScamVictim,
    MarketCrash,
    HousingCrisis,
}

impl CrisisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisType::MedicalEmergency => "medical_emergency",
            CrisisType::JobLoss => "job_loss",
            CrisisType::MajorExpense => "major_expense",
            CrisisType::ScamVictim => "scam_victim",
            CrisisType::MarketCrash => "market_crash",
            CrisisType::HousingCrisis => "housing_crisis",
        }
    }
}

/// How bad a crisis instance turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisSeverity {
    Minor,
    Moderate,
    Major,
    Catastrophic,
}

impl CrisisSeverity {
    /// Multiplier applied to the rolled base amount.
    pub fn amount_multiplier(&self) -> f64 {
        match self {
            CrisisSeverity::Minor => 0.3,
            CrisisSeverity::Moderate => 0.6,
            CrisisSeverity::Major => 1.0,
            CrisisSeverity::Catastrophic => 1.5,
        }
    }

    /// Multiplier applied to trauma and resolution time.
    pub fn impact_multiplier(&self) -> f64 {
        match self {
            CrisisSeverity::Minor => 0.5,
            CrisisSeverity::Moderate => 0.8,
            CrisisSeverity::Major => 1.2,
            CrisisSeverity::Catastrophic => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisSeverity::Minor => "minor",
            CrisisSeverity::Moderate => "moderate",
            CrisisSeverity::Major => "major",
            CrisisSeverity::Catastrophic => "catastrophic",
        }
    }

    /// Narrative adjective for crisis descriptions.
    pub fn descriptor(&self) -> &'static str {
        match self {
            CrisisSeverity::Minor => "minor",
            CrisisSeverity::Moderate => "significant",
            CrisisSeverity::Major => "serious",
            CrisisSeverity::Catastrophic => "devastating",
        }
    }
}

/// Cumulative severity distribution for a template.
///
/// The four weights must sum to 1.0; a uniform roll walks the cumulative sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityDistribution {
    pub minor: f64,
    pub moderate: f64,
    pub major: f64,
    pub catastrophic: f64,
}

impl SeverityDistribution {
    /// Map a uniform roll in [0,1) to a severity via the cumulative sum.
    pub fn draw(&self, roll: f64) -> CrisisSeverity {
        let mut cumulative = 0.0;
        for (severity, weight) in [
            (CrisisSeverity::Minor, self.minor),
            (CrisisSeverity::Moderate, self.moderate),
            (CrisisSeverity::Major, self.major),
            (CrisisSeverity::Catastrophic, self.catastrophic),
        ] {
            cumulative += weight;
            if roll <= cumulative {
                return severity;
            }
        }
        // Rounding slack in the weights lands on the last bucket.
        CrisisSeverity::Catastrophic
    }
}

/// How psychologically damaging a crisis type is, independent of severity.
///
/// All three factors are 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraumaFactors {
    pub unexpectedness: f64,
    pub controllability: f64,
    pub social_impact: f64,
}

/// Weights mapping 30-day behavior scores to extra crisis probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorTriggers {
    pub luxury_spending: f64,
    pub poor_decisions: f64,
    pub low_savings: f64,
    pub risk_taking: f64,
}

/// Parameterized definition of a category of financial emergency.
#[derive(Debug, Clone, PartialEq)]
pub struct CrisisTemplate {
    pub crisis_type: CrisisType,
    pub name: &'static str,
    /// Base chance per evaluation (one in-game day).
    pub base_probability: f64,
    /// Min/max financial impact in dollars.
    pub amount_range: (i64, i64),
    pub severity_distribution: SeverityDistribution,
    /// (trait name, probability modifier at trait = 100).
    pub personality_modifiers: &'static [(&'static str, f64)],
    pub behavior_triggers: BehaviorTriggers,
    pub description: &'static str,
    /// Min/max days to resolve.
    pub resolution_time_range: (u32, u32),
    pub trauma_factors: TraumaFactors,
}

/// Lasting psychological damage from a crisis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsychologicalImpact {
    pub stress_increase: f64,
    /// Negative: crises damage trust in financial advice.
    pub trust_impact: f64,
    /// 0-100
    pub trauma_level: f64,
}

/// Effects that persist while the crisis (and its trauma) lingers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OngoingEffects {
    pub monthly_stress_penalty: f64,
    pub decision_quality_penalty: f64,
    pub duration_days: u32,
}

/// A materialized financial crisis for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialCrisis {
    pub id: String,
    pub crisis_type: CrisisType,
    pub character_id: String,
    pub triggered_tick: usize,
    pub severity: CrisisSeverity,
    /// Financial impact in dollars.
    pub amount: i64,
    pub description: String,
    /// What led to this crisis (narrative strings for the dialogue layer).
    pub trigger_factors: Vec<String>,
    /// Days until resolvable.
    pub time_to_resolve: u32,
    pub psychological_impact: PsychologicalImpact,
    pub ongoing_effects: OngoingEffects,
    pub is_resolved: bool,
    pub resolution_method: Option<String>,
    pub resolution_tick: Option<usize>,
}
