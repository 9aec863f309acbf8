//! # mbo-gate
//!
//! Eligibility gating. Each `(game, date, tier)` resolves to one of three
//! states:
//! - **Active**: the date is a draw day; candidates are final
//! - **Preview**: not a draw day, but the tier has preview rights
//! - **Suppressed**: nothing is emitted

pub mod calendar;
pub mod gate;
pub mod state;

pub use calendar::DrawCalendar;
pub use gate::{EligibilityGate, GateDecision};
pub use state::GateState;
