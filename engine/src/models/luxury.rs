//! Luxury purchase types
//!
//! Each purchase carries a happiness boost that decays exponentially with
//! hedonic adaptation. Category parameters control the boost multiplier,
//! how fast adaptation sets in, and the prestige/practical split.

use serde::{Deserialize, Serialize};

/// How quickly a character adapts to (stops enjoying) a purchase category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationSpeed {
    VeryFast,
    Fast,
    Moderate,
    Slow,
    VerySlow,
}

impl AdaptationSpeed {
    /// Base exponent rate before personality adjustments.
    pub fn base_rate(&self) -> f64 {
        match self {
            AdaptationSpeed::VeryFast => 4.0,
            AdaptationSpeed::Fast => 2.5,
            AdaptationSpeed::Moderate => 1.5,
            AdaptationSpeed::Slow => 1.0,
            AdaptationSpeed::VerySlow => 0.6,
        }
    }
}

/// Category of luxury good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuxuryCategory {
    Electronics,
    Clothing,
    Jewelry,
    Vehicle,
    Entertainment,
    Travel,
    Food,
    Other,
}

/// Per-category happiness parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub happiness_multiplier: f64,
    pub adaptation_speed: AdaptationSpeed,
    /// 0-1 share of the purchase that is about status.
    pub prestige_component: f64,
    /// 0-1 share of the purchase that is actually useful.
    pub practical_component: f64,
    /// Days before the boost has fully faded for a typical owner.
    pub typical_lifespan_days: u32,
}

impl LuxuryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LuxuryCategory::Electronics => "electronics",
            LuxuryCategory::Clothing => "clothing",
            LuxuryCategory::Jewelry => "jewelry",
            LuxuryCategory::Vehicle => "vehicle",
            LuxuryCategory::Entertainment => "entertainment",
            LuxuryCategory::Travel => "travel",
            LuxuryCategory::Food => "food",
            LuxuryCategory::Other => "other",
        }
    }

    pub fn profile(&self) -> CategoryProfile {
        match self {
            LuxuryCategory::Electronics => CategoryProfile {
                happiness_multiplier: 1.2,
                adaptation_speed: AdaptationSpeed::Fast,
                prestige_component: 0.3,
                practical_component: 0.7,
                typical_lifespan_days: 90,
            },
            LuxuryCategory::Clothing => CategoryProfile {
                happiness_multiplier: 1.0,
                adaptation_speed: AdaptationSpeed::Moderate,
                prestige_component: 0.8,
                practical_component: 0.2,
                typical_lifespan_days: 60,
            },
            LuxuryCategory::Jewelry => CategoryProfile {
                happiness_multiplier: 0.8,
                adaptation_speed: AdaptationSpeed::Slow,
                prestige_component: 0.9,
                practical_component: 0.1,
                typical_lifespan_days: 180,
            },
            LuxuryCategory::Vehicle => CategoryProfile {
                happiness_multiplier: 1.5,
                adaptation_speed: AdaptationSpeed::Slow,
                prestige_component: 0.6,
                practical_component: 0.4,
                typical_lifespan_days: 365,
            },
            LuxuryCategory::Entertainment => CategoryProfile {
                happiness_multiplier: 1.2,
                adaptation_speed: AdaptationSpeed::VeryFast,
                prestige_component: 0.2,
                practical_component: 0.8,
                typical_lifespan_days: 30,
            },
            LuxuryCategory::Travel => CategoryProfile {
                happiness_multiplier: 1.8,
                adaptation_speed: AdaptationSpeed::Moderate,
                prestige_component: 0.5,
                practical_component: 0.5,
                typical_lifespan_days: 120,
            },
            LuxuryCategory::Food => CategoryProfile {
                happiness_multiplier: 1.1,
                adaptation_speed: AdaptationSpeed::VeryFast,
                prestige_component: 0.4,
                practical_component: 0.6,
                typical_lifespan_days: 7,
            },
            LuxuryCategory::Other => CategoryProfile {
                happiness_multiplier: 1.0,
                adaptation_speed: AdaptationSpeed::Moderate,
                prestige_component: 0.5,
                practical_component: 0.5,
                typical_lifespan_days: 90,
            },
        }
    }
}

/// A recorded luxury purchase with its live happiness state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuxuryPurchase {
    pub id: String,
    pub character_id: String,
    pub category: LuxuryCategory,
    /// Price paid in dollars.
    pub amount: i64,
    pub description: String,
    pub purchased_tick: usize,
    /// Boost at purchase time, before any decay.
    pub initial_happiness_boost: f64,
    /// Boost remaining after the latest decay pass.
    pub current_happiness_effect: f64,
    /// Personality-adjusted exponent rate.
    pub adaptation_rate: f64,
    /// Personality-adjusted lifespan in days.
    pub expected_lifespan_days: u32,
    pub prestige_value: f64,
    pub practical_value: f64,
    /// Set once the effect drops under half of the initial boost.
    pub half_decay_announced: bool,
    pub is_active: bool,
}
