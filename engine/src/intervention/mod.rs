//! Coach intervention engine
//!
//! Two layers: the monitor picks a prevention stage from the current spiral
//! read-out and rolls whether the coach catches it in time, and
//! `apply_intervention` executes a concrete intervention method with
//! stress/spiral relief rolled from per-method ranges.

use serde::{Deserialize, Serialize};

use crate::models::personality::CoachProfile;
use crate::psychology::spiral::SpiralState;
use crate::rng::RngManager;

/// Coach capability bonuses unlocked by level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachBonuses {
    pub prevention: f64,
    pub detection: f64,
    pub effectiveness: f64,
}

impl CoachBonuses {
    /// Flat per-tier totals, not cumulative across tiers. Prevention tops
    /// out at 50 so the early-warning threshold floor of 30 stays reachable
    /// at every level.
    pub fn for_level(level: u32) -> Self {
        match level {
            0 => Self {
                prevention: 0.0,
                detection: 0.0,
                effectiveness: 0.0,
            },
            1..=25 => Self {
                prevention: 25.0,
                detection: 15.0,
                effectiveness: 10.0,
            },
            26..=50 => Self {
                prevention: 35.0,
                detection: 20.0,
                effectiveness: 15.0,
            },
            51..=75 => Self {
                prevention: 40.0,
                detection: 25.0,
                effectiveness: 20.0,
            },
            76..=100 => Self {
                prevention: 50.0,
                detection: 30.0,
                effectiveness: 25.0,
            },
            _ => Self {
                prevention: 50.0,
                detection: 35.0,
                effectiveness: 30.0,
            },
        }
    }
}

/// Where in a spiral's life the coach is intervening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreventionStage {
    /// Intensity rising but no spiral yet.
    EarlyWarning,
    /// Active spiral below the runaway point.
    SpiralInterrupt,
    /// Runaway spiral; damage control.
    RecoverySupport,
}

impl PreventionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreventionStage::EarlyWarning => "early_warning",
            PreventionStage::SpiralInterrupt => "spiral_interrupt",
            PreventionStage::RecoverySupport => "recovery_support",
        }
    }

    /// Spiral-intensity reduction at effectiveness 100.
    fn base_reduction(&self) -> f64 {
        match self {
            PreventionStage::EarlyWarning => 30.0,
            PreventionStage::SpiralInterrupt => 45.0,
            PreventionStage::RecoverySupport => 25.0,
        }
    }
}

/// Result of one monitor pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreventionOutcome {
    pub stage: PreventionStage,
    /// 0-100
    pub success_chance: f64,
    pub success: bool,
    /// Spiral-intensity points removed on success, 0 on failure.
    pub spiral_reduction: f64,
}

/// How trust and coach prevention combine into intervention strength.
pub fn effectiveness_score(trust: f64, bonuses: &CoachBonuses) -> f64 {
    trust * (1.0 + bonuses.prevention / 100.0)
}

/// Check whether the coach steps in, and with what result.
///
/// Returns None when nothing warrants an intervention yet. RNG is consumed
/// only when a stage is selected.
pub fn monitor_and_prevent(
    spiral: &SpiralState,
    coach: &CoachProfile,
    rng: &mut RngManager,
) -> Option<PreventionOutcome> {
    let bonuses = CoachBonuses::for_level(coach.level);
    let effectiveness = effectiveness_score(coach.trust, &bonuses);

    let (stage, success_chance) = if !spiral.in_spiral {
        let early_threshold = (60.0 - bonuses.prevention).max(30.0);
        if spiral.intensity <= early_threshold {
            return None;
        }
        (
            PreventionStage::EarlyWarning,
            (effectiveness * 0.8 + 20.0).min(95.0),
        )
    } else if spiral.intensity < 80.0 {
        (
            PreventionStage::SpiralInterrupt,
            (effectiveness * 0.6 + 15.0).min(85.0),
        )
    } else {
        (
            PreventionStage::RecoverySupport,
            (effectiveness * 0.5 + 10.0).min(75.0),
        )
    };

    let success = rng.chance(success_chance / 100.0);
    Some(PreventionOutcome {
        stage,
        success_chance,
        success,
        spiral_reduction: if success {
            stage.base_reduction() * effectiveness / 100.0
        } else {
            0.0
        },
    })
}

/// Concrete intervention methods the coach can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionMethod {
    CoachTherapy,
    TeamSupport,
    CoolingPeriod,
    EmergencyFund,
}

impl InterventionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionMethod::CoachTherapy => "coach_therapy",
            InterventionMethod::TeamSupport => "team_support",
            InterventionMethod::CoolingPeriod => "cooling_period",
            InterventionMethod::EmergencyFund => "emergency_fund",
        }
    }

    /// (stress relief range, spiral relief range).
    fn relief_ranges(&self) -> ((f64, f64), (f64, f64)) {
        match self {
            InterventionMethod::CoachTherapy => ((15.0, 25.0), (20.0, 35.0)),
            InterventionMethod::TeamSupport => ((8.0, 15.0), (10.0, 20.0)),
            InterventionMethod::CoolingPeriod => ((5.0, 10.0), (15.0, 25.0)),
            InterventionMethod::EmergencyFund => ((20.0, 30.0), (25.0, 40.0)),
        }
    }
}

/// Result of applying one intervention method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionResult {
    pub method: InterventionMethod,
    pub success: bool,
    pub stress_reduction: f64,
    pub spiral_reduction: f64,
}

/// Success chance per attempt; failures relieve nothing but are still
/// recorded by the caller.
const INTERVENTION_FAILURE_CHANCE: f64 = 0.3;

/// Apply a concrete intervention to a character at the given stress level.
///
/// High stress blunts the relief: above 80 the character barely hears the
/// coach and both reductions shrink.
pub fn apply_intervention(
    method: InterventionMethod,
    stress_level: f64,
    rng: &mut RngManager,
) -> InterventionResult {
    let ((stress_min, stress_max), (spiral_min, spiral_max)) = method.relief_ranges();
    let mut stress_reduction = rng.range_f64(stress_min, stress_max);
    let mut spiral_reduction = rng.range_f64(spiral_min, spiral_max);
    if stress_level > 80.0 {
        stress_reduction *= 0.7;
        spiral_reduction *= 0.6;
    }
    let success = rng.next_f64() > INTERVENTION_FAILURE_CHANCE;
    InterventionResult {
        method,
        success,
        stress_reduction: if success { stress_reduction } else { 0.0 },
        spiral_reduction: if success { spiral_reduction } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiral(in_spiral: bool, intensity: f64) -> SpiralState {
        SpiralState {
            in_spiral,
            intensity,
            ..SpiralState::calm("test")
        }
    }

    #[test]
    fn test_coach_bonuses_tiers() {
        assert_eq!(CoachBonuses::for_level(0).prevention, 0.0);
        assert_eq!(CoachBonuses::for_level(1).prevention, 25.0);
        assert_eq!(CoachBonuses::for_level(26).prevention, 35.0);
        assert_eq!(CoachBonuses::for_level(51).effectiveness, 20.0);
        assert_eq!(CoachBonuses::for_level(76).detection, 30.0);
        assert_eq!(CoachBonuses::for_level(150).effectiveness, 30.0);
    }

    #[test]
    fn test_calm_character_not_bothered() {
        let coach = CoachProfile {
            level: 10,
            trust: 60.0,
        };
        let mut rng = RngManager::new(1);
        assert!(monitor_and_prevent(&spiral(false, 20.0), &coach, &mut rng).is_none());
    }

    #[test]
    fn test_high_level_coach_intervenes_earlier() {
        let mut rng = RngManager::new(1);
        let weak = CoachProfile {
            level: 1,
            trust: 60.0,
        };
        let strong = CoachProfile {
            level: 80,
            trust: 60.0,
        };
        // Intensity 32: over the level-80 threshold (30), under level-1's (35).
        assert!(monitor_and_prevent(&spiral(false, 32.0), &weak, &mut rng).is_none());
        assert!(monitor_and_prevent(&spiral(false, 32.0), &strong, &mut rng).is_some());
    }

    #[test]
    fn test_stage_selection() {
        let coach = CoachProfile {
            level: 30,
            trust: 70.0,
        };
        let mut rng = RngManager::new(5);
        let early = monitor_and_prevent(&spiral(false, 50.0), &coach, &mut rng).unwrap();
        let interrupt = monitor_and_prevent(&spiral(true, 50.0), &coach, &mut rng).unwrap();
        let recovery = monitor_and_prevent(&spiral(true, 90.0), &coach, &mut rng).unwrap();
        assert_eq!(early.stage, PreventionStage::EarlyWarning);
        assert_eq!(interrupt.stage, PreventionStage::SpiralInterrupt);
        assert_eq!(recovery.stage, PreventionStage::RecoverySupport);
    }

    #[test]
    fn test_success_chance_caps() {
        let coach = CoachProfile {
            level: 120,
            trust: 100.0,
        };
        let mut rng = RngManager::new(5);
        let early = monitor_and_prevent(&spiral(false, 70.0), &coach, &mut rng).unwrap();
        let interrupt = monitor_and_prevent(&spiral(true, 70.0), &coach, &mut rng).unwrap();
        assert_eq!(early.success_chance, 95.0);
        assert_eq!(interrupt.success_chance, 85.0);
    }

    #[test]
    fn test_failed_prevention_reduces_nothing() {
        let coach = CoachProfile {
            level: 1,
            trust: 0.0,
        };
        // Trust 0: interrupt chance is the flat 15%; scan seeds for a failure.
        let mut rng = RngManager::new(2);
        let outcome = monitor_and_prevent(&spiral(true, 50.0), &coach, &mut rng).unwrap();
        if !outcome.success {
            assert_eq!(outcome.spiral_reduction, 0.0);
        }
    }

    #[test]
    fn test_apply_intervention_within_ranges() {
        let mut rng = RngManager::new(9);
        for _ in 0..100 {
            let result = apply_intervention(InterventionMethod::EmergencyFund, 40.0, &mut rng);
            if result.success {
                assert!(result.stress_reduction >= 20.0 && result.stress_reduction <= 30.0);
                assert!(result.spiral_reduction >= 25.0 && result.spiral_reduction <= 40.0);
            } else {
                assert_eq!(result.stress_reduction, 0.0);
            }
        }
    }

    #[test]
    fn test_extreme_stress_blunts_relief() {
        // Same seed, so identical rolls before the stress scaling.
        let calm = apply_intervention(InterventionMethod::CoachTherapy, 40.0, &mut RngManager::new(4));
        let frantic = apply_intervention(InterventionMethod::CoachTherapy, 90.0, &mut RngManager::new(4));
        if calm.success {
            assert!(frantic.stress_reduction < calm.stress_reduction);
        }
    }
}
