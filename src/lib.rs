//! Feeguard - manipulation-detection and fee-adjustment engine for
//! protected AMM pools.
//!
//! For each incoming trade the engine decides whether the trade's estimated
//! price impact is explainable by independently observed reference-market
//! movement, and answers with a base fee, an elevated fee, or a rejection.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use domain::engine::decision::{Decision, FeeTier};
pub use domain::engine::decision_engine::DecisionEngine;
pub use infrastructure::state::memory::SharedPoolStateReader;
pub use infrastructure::state::reader::{PoolState, PoolStateReader};
pub use infrastructure::state::store::{ConfigStore, InMemoryConfigStore};
pub use report::DecisionRecord;
pub use shared::errors::{EvaluationError, RegistrationError, StateReadError};
pub use shared::types::{
    AdminCredential, AggregationMode, PoolConfig, PoolId, ReferenceSpec, TradeRequest,
};
