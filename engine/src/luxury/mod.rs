//! Luxury purchases and hedonic adaptation
//!
//! Each purchase gets an initial happiness boost shaped by the price, the
//! category and the buyer's personality, then decays exponentially as the
//! character adapts. The tracker also scores shopping-addiction risk over
//! the trailing month.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::time::TimeManager;
use crate::models::luxury::{LuxuryCategory, LuxuryPurchase};
use crate::models::personality::{CharacterSnapshot, SpendingStyle};

/// Happiness from any single purchase never exceeds this.
const MAX_SINGLE_BOOST: f64 = 50.0;
/// A purchase is spent once its effect drops under one point.
const EFFECT_FLOOR: f64 = 1.0;
/// Trailing window for addiction-risk scoring.
const ADDICTION_WINDOW_DAYS: usize = 30;

fn personality_multiplier(snapshot: &CharacterSnapshot, category: LuxuryCategory) -> f64 {
    let personality = &snapshot.personality;
    let mut multiplier = personality.luxury_desire / 100.0;
    match category {
        LuxuryCategory::Electronics => {
            if personality.spending_style == SpendingStyle::Strategic {
                multiplier *= 1.2;
            }
        }
        LuxuryCategory::Clothing | LuxuryCategory::Jewelry => {
            if personality.has_motivation("status") {
                multiplier *= 1.4;
            }
        }
        LuxuryCategory::Vehicle => {
            if personality.spending_style == SpendingStyle::Impulsive {
                multiplier *= 1.3;
            }
            if personality.has_motivation("power") {
                multiplier *= 1.2;
            }
        }
        LuxuryCategory::Travel => {
            if personality.has_motivation("experience") {
                multiplier *= 1.5;
            }
        }
        LuxuryCategory::Entertainment => {
            if personality.spending_style == SpendingStyle::Impulsive {
                multiplier *= 1.2;
            }
        }
        LuxuryCategory::Food | LuxuryCategory::Other => {}
    }
    multiplier
}

fn initial_boost(snapshot: &CharacterSnapshot, category: LuxuryCategory, amount: i64) -> f64 {
    let price_boost = (amount as f64 / 1000.0 * 10.0).min(MAX_SINGLE_BOOST);
    price_boost * personality_multiplier(snapshot, category) * category.profile().happiness_multiplier
}

fn adaptation_rate(snapshot: &CharacterSnapshot, category: LuxuryCategory) -> f64 {
    let personality = &snapshot.personality;
    let mut rate = category.profile().adaptation_speed.base_rate();
    if personality.spending_style == SpendingStyle::Impulsive {
        rate *= 1.3;
    }
    if personality.luxury_desire > 80.0 {
        rate *= 1.2;
    }
    if personality.financial_wisdom > 70.0 {
        rate *= 0.8;
    }
    rate
}

fn expected_lifespan(snapshot: &CharacterSnapshot, category: LuxuryCategory) -> u32 {
    let personality = &snapshot.personality;
    let mut lifespan = category.profile().typical_lifespan_days as f64;
    if personality.spending_style == SpendingStyle::Conservative {
        lifespan *= 1.5;
    }
    if personality.luxury_desire < 30.0 {
        lifespan *= 0.7;
    }
    if personality.financial_wisdom > 80.0 {
        lifespan *= 1.3;
    }
    lifespan.round().max(1.0) as u32
}

/// What a decay pass noticed about one purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayMilestone {
    /// Effect dropped under half of the initial boost (fires once).
    HalfFaded,
    /// Effect ran out; the purchase is no longer felt.
    Faded,
}

/// One milestone report from a decay pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayReport {
    pub purchase_id: String,
    pub character_id: String,
    pub category: LuxuryCategory,
    pub amount: i64,
    pub milestone: DecayMilestone,
    pub remaining_effect: f64,
}

/// Addiction-risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// 30-day shopping-addiction read-out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddictionRisk {
    /// 0-100
    pub score: f64,
    pub level: RiskLevel,
    pub purchase_count: usize,
    pub total_spent: i64,
}

/// Owns all purchases and their decay state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LuxuryTracker {
    purchases: Vec<LuxuryPurchase>,
    next_purchase_number: u64,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl LuxuryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.next_purchase_number += 1;
        format!("purchase_{:06}", self.next_purchase_number)
    }

    /// Record a purchase and compute its happiness parameters.
    pub fn process_purchase(
        &mut self,
        snapshot: &CharacterSnapshot,
        category: LuxuryCategory,
        amount: i64,
        description: impl Into<String>,
        tick: usize,
    ) -> &LuxuryPurchase {
        let boost = initial_boost(snapshot, category, amount);
        let profile = category.profile();
        let purchase = LuxuryPurchase {
            id: self.next_id(),
            character_id: snapshot.id.clone(),
            category,
            amount,
            description: description.into(),
            purchased_tick: tick,
            initial_happiness_boost: boost,
            current_happiness_effect: boost,
            adaptation_rate: adaptation_rate(snapshot, category),
            expected_lifespan_days: expected_lifespan(snapshot, category),
            prestige_value: amount as f64 / 10_000.0 * profile.prestige_component * 100.0,
            practical_value: profile.practical_component * 50.0,
            half_decay_announced: false,
            // A boost already under the floor fades on the first decay pass.
            is_active: true,
        };
        let index = self.purchases.len();
        self.by_id.insert(purchase.id.clone(), index);
        self.purchases.push(purchase);
        &self.purchases[index]
    }

    pub fn get(&self, purchase_id: &str) -> Option<&LuxuryPurchase> {
        self.by_id.get(purchase_id).map(|&i| &self.purchases[i])
    }

    /// Rebuild the id index from the purchase vector.
    ///
    /// Needed after deserialization (the index is not serialized).
    pub fn rebuild_indices(&mut self) {
        self.by_id.clear();
        for (index, purchase) in self.purchases.iter().enumerate() {
            self.by_id.insert(purchase.id.clone(), index);
        }
    }

    /// Advance decay on every active purchase; returns milestone reports.
    pub fn decay_pass(&mut self, clock: &TimeManager) -> Vec<DecayReport> {
        let mut reports = Vec::new();
        for purchase in &mut self.purchases {
            if !purchase.is_active {
                continue;
            }
            let days = clock.days_since(purchase.purchased_tick);
            let progress = days / purchase.expected_lifespan_days.max(1) as f64;
            let effect = purchase.initial_happiness_boost
                * (-purchase.adaptation_rate * progress.min(1.0)).exp();
            purchase.current_happiness_effect = effect;

            if effect < EFFECT_FLOOR || progress >= 1.0 {
                purchase.is_active = false;
                purchase.current_happiness_effect = 0.0;
                reports.push(DecayReport {
                    purchase_id: purchase.id.clone(),
                    character_id: purchase.character_id.clone(),
                    category: purchase.category,
                    amount: purchase.amount,
                    milestone: DecayMilestone::Faded,
                    remaining_effect: 0.0,
                });
            } else if !purchase.half_decay_announced
                && effect < purchase.initial_happiness_boost / 2.0
            {
                purchase.half_decay_announced = true;
                reports.push(DecayReport {
                    purchase_id: purchase.id.clone(),
                    character_id: purchase.character_id.clone(),
                    category: purchase.category,
                    amount: purchase.amount,
                    milestone: DecayMilestone::HalfFaded,
                    remaining_effect: effect,
                });
            }
        }
        reports
    }

    /// Sum of active happiness effects, capped at 100.
    pub fn current_happiness(&self, character_id: &str) -> f64 {
        self.purchases
            .iter()
            .filter(|p| p.character_id == character_id && p.is_active)
            .map(|p| p.current_happiness_effect)
            .sum::<f64>()
            .min(100.0)
    }

    /// Aggregate prestige from all purchases, capped at 100.
    pub fn prestige(&self, character_id: &str) -> f64 {
        self.purchases
            .iter()
            .filter(|p| p.character_id == character_id)
            .map(|p| p.prestige_value)
            .sum::<f64>()
            .min(100.0)
    }

    pub fn purchases_of(&self, character_id: &str) -> Vec<&LuxuryPurchase> {
        self.purchases
            .iter()
            .filter(|p| p.character_id == character_id)
            .collect()
    }

    /// Dollars spent on luxuries over the trailing window.
    pub fn spending_in_window(&self, character_id: &str, clock: &TimeManager, days: usize) -> i64 {
        self.purchases
            .iter()
            .filter(|p| {
                p.character_id == character_id && clock.within_days(p.purchased_tick, days)
            })
            .map(|p| p.amount)
            .sum()
    }

    /// Score shopping-addiction risk over the trailing month.
    pub fn addiction_risk(&self, character_id: &str, clock: &TimeManager) -> AddictionRisk {
        let recent: Vec<&LuxuryPurchase> = self
            .purchases
            .iter()
            .filter(|p| {
                p.character_id == character_id
                    && clock.within_days(p.purchased_tick, ADDICTION_WINDOW_DAYS)
            })
            .collect();
        let count = recent.len();
        let total: i64 = recent.iter().map(|p| p.amount).sum();

        let mut score = 0.0;
        if count > 10 {
            score += 30.0;
        } else if count > 5 {
            score += 15.0;
        }
        if total > 50_000 {
            score += 25.0;
        } else if total > 20_000 {
            score += 15.0;
        }
        if count > 0 && total / count as i64 > 5_000 {
            score += 20.0;
        }
        // Bursts: many purchases landing on few distinct days.
        let distinct_days: HashSet<usize> = recent
            .iter()
            .map(|p| clock.day_of_tick(p.purchased_tick))
            .collect();
        if count > 1 && (distinct_days.len() as f64) < 0.7 * count as f64 {
            score += 15.0;
        }

        let level = if score < 20.0 {
            RiskLevel::Low
        } else if score < 40.0 {
            RiskLevel::Medium
        } else if score < 60.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        };
        AddictionRisk {
            score,
            level,
            purchase_count: count,
            total_spent: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::personality::FinancialPersonality;

    fn snapshot() -> CharacterSnapshot {
        CharacterSnapshot {
            id: "test".to_string(),
            wallet: 50_000,
            monthly_earnings: 5000,
            total_assets: 50_000,
            personality: FinancialPersonality::default_moderate(),
            recent_decisions: Vec::new(),
        }
    }

    fn clock_at(tick: usize) -> TimeManager {
        let mut clock = TimeManager::new(24);
        for _ in 0..tick {
            clock.advance_tick();
        }
        clock
    }

    #[test]
    fn test_entertainment_boost_for_moderate_buyer() {
        let mut tracker = LuxuryTracker::new();
        let purchase = tracker.process_purchase(
            &snapshot(),
            LuxuryCategory::Entertainment,
            3000,
            "concert tickets",
            0,
        );
        // 30 price boost, halved by desire 50, times the 1.2 category multiplier.
        assert!((purchase.initial_happiness_boost - 18.0).abs() < 1e-9);
        assert!(purchase.is_active);
    }

    #[test]
    fn test_status_motivation_amplifies_jewelry() {
        let mut tracker = LuxuryTracker::new();
        let mut status_seeker = snapshot();
        status_seeker
            .personality
            .money_motivations
            .push("status".to_string());
        let plain = tracker
            .process_purchase(&snapshot(), LuxuryCategory::Jewelry, 5000, "ring", 0)
            .initial_happiness_boost;
        let flashy = tracker
            .process_purchase(&status_seeker, LuxuryCategory::Jewelry, 5000, "ring", 0)
            .initial_happiness_boost;
        assert!((flashy / plain - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_entertainment_fades_well_before_a_month() {
        let mut tracker = LuxuryTracker::new();
        tracker.process_purchase(&snapshot(), LuxuryCategory::Entertainment, 3000, "show", 0);
        let mut faded_day = None;
        for day in 1..=30 {
            let reports = tracker.decay_pass(&clock_at(day * 24));
            if reports.iter().any(|r| r.milestone == DecayMilestone::Faded) {
                faded_day = Some(day);
                break;
            }
        }
        let day = faded_day.expect("effect should fade within the lifespan");
        assert!(day < 30, "faded on day {day}");
        assert_eq!(tracker.current_happiness("test"), 0.0);
    }

    #[test]
    fn test_half_decay_fires_exactly_once() {
        let mut tracker = LuxuryTracker::new();
        tracker.process_purchase(&snapshot(), LuxuryCategory::Vehicle, 20_000, "car", 0);
        let mut half_count = 0;
        for day in 1..=400 {
            for report in tracker.decay_pass(&clock_at(day * 24)) {
                if report.milestone == DecayMilestone::HalfFaded {
                    half_count += 1;
                }
            }
        }
        assert_eq!(half_count, 1);
    }

    #[test]
    fn test_happiness_aggregate_capped() {
        let mut tracker = LuxuryTracker::new();
        let mut hedonist = snapshot();
        hedonist.personality.luxury_desire = 100.0;
        for _ in 0..10 {
            tracker.process_purchase(&hedonist, LuxuryCategory::Travel, 10_000, "trip", 0);
        }
        assert_eq!(tracker.current_happiness("test"), 100.0);
    }

    #[test]
    fn test_conservative_wise_buyer_keeps_purchases_longer() {
        let mut careful = snapshot();
        careful.personality.spending_style = SpendingStyle::Conservative;
        careful.personality.financial_wisdom = 85.0;
        let mut tracker = LuxuryTracker::new();
        let long = tracker
            .process_purchase(&careful, LuxuryCategory::Clothing, 2000, "coat", 0)
            .expected_lifespan_days;
        let short = tracker
            .process_purchase(&snapshot(), LuxuryCategory::Clothing, 2000, "coat", 0)
            .expected_lifespan_days;
        assert!(long > short);
        assert_eq!(short, 60);
        assert_eq!(long, 117); // 60 * 1.5 * 1.3
    }

    #[test]
    fn test_addiction_risk_bands() {
        let clock = clock_at(24 * 5);
        let mut tracker = LuxuryTracker::new();
        let low = tracker.addiction_risk("test", &clock);
        assert_eq!(low.level, RiskLevel::Low);

        // Eleven 6k purchases crammed into two days.
        for i in 0..11 {
            tracker.process_purchase(
                &snapshot(),
                LuxuryCategory::Electronics,
                6000,
                "gadget",
                if i < 6 { 24 } else { 48 },
            );
        }
        let risk = tracker.addiction_risk("test", &clock);
        // 30 (count) + 25 (total 66k) + 20 (avg) + 15 (burst) = 90
        assert_eq!(risk.score, 90.0);
        assert_eq!(risk.level, RiskLevel::Critical);
        assert_eq!(risk.purchase_count, 11);
    }

    #[test]
    fn test_negligible_purchase_fades_on_first_pass() {
        let mut tracker = LuxuryTracker::new();
        let purchase =
            tracker.process_purchase(&snapshot(), LuxuryCategory::Food, 50, "snack", 0);
        assert!(purchase.initial_happiness_boost < 1.0);
        assert!(purchase.is_active);

        let reports = tracker.decay_pass(&clock_at(1));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].milestone, DecayMilestone::Faded);
        assert_eq!(tracker.current_happiness("test"), 0.0);
        // Second pass stays silent: the purchase is spent.
        assert!(tracker.decay_pass(&clock_at(2)).is_empty());
    }

    #[test]
    fn test_index_rebuild_after_deserialization() {
        let mut tracker = LuxuryTracker::new();
        let id = tracker
            .process_purchase(&snapshot(), LuxuryCategory::Electronics, 3000, "laptop", 0)
            .id
            .clone();

        let json = serde_json::to_string(&tracker).unwrap();
        let mut restored: LuxuryTracker = serde_json::from_str(&json).unwrap();
        assert!(restored.get(&id).is_none()); // index was skipped
        restored.rebuild_indices();
        assert_eq!(restored.get(&id).map(|p| p.amount), Some(3000));
    }

    #[test]
    fn test_spending_window_excludes_old_purchases() {
        let mut tracker = LuxuryTracker::new();
        tracker.process_purchase(&snapshot(), LuxuryCategory::Food, 500, "feast", 0);
        tracker.process_purchase(&snapshot(), LuxuryCategory::Food, 700, "feast", 24 * 50);
        let clock = clock_at(24 * 55);
        assert_eq!(tracker.spending_in_window("test", &clock, 30), 700);
    }
}
