//! Decision engine - orchestration and per-trade state machine

pub mod decision;
pub mod decision_engine;

pub use decision::{Decision, FeeTier};
pub use decision_engine::DecisionEngine;
