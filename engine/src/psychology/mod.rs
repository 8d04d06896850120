//! Psychological models
//!
//! Pure functions from roster snapshots and ledger-derived inputs to
//! psychological read-outs. Nothing in here mutates state or touches the
//! RNG except the explicit outcome simulation, which takes the generator
//! as an argument.

pub mod decision;
pub mod spiral;
pub mod stress;
pub mod trust;

pub use decision::{assess_decision_quality, simulate_outcome, DecisionQuality};
pub use spiral::{detect_spiral, SpiralState};
pub use stress::{assess_stress, StressAssessment, StressFactors, StressInputs};
pub use trust::{advice_trust_delta, assess_financial_trust, FinancialTrust};
