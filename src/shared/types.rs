//! Common types used across the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fixed-point square-root price in Q64.96 format, the AMM's native price
/// encoding: `price = (sqrt_price / 2^96)^2`.
pub type SqrtPriceX96 = u128;

/// Q64.96 scale factor.
pub const Q96: u128 = 1 << 96;

/// Basis points in one whole (100%).
pub const BPS_SCALE: u64 = 10_000;

/// Upper bound on the reference list of a protected pool.
pub const MAX_REFERENCES: usize = 5;

/// Identifier of a pool known to the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(String);

impl PoolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for PoolId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// How the aligned reference movements are combined into one explained figure.
///
/// `Maximum` gives a single manipulated reference full credit; `Median`
/// requires moving a majority of references, which raises the attacker's cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    Maximum,
    Median,
}

/// One reference market and its orientation relative to the protected pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSpec {
    pub pool_id: PoolId,
    /// True when the reference pair quotes the protected pool's base asset on
    /// the opposite side, so its price moves mirror the protected price.
    #[serde(default)]
    pub inverted: bool,
}

/// Protection parameters for one protected pool. Immutable once registered;
/// re-registration replaces the whole config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// 1..=MAX_REFERENCES reference markets, order significant.
    pub references: Vec<ReferenceSpec>,
    pub base_fee_ppm: u32,
    pub elevated_fee_ppm: u32,
    pub elevated_threshold_bps: u64,
    pub reject_threshold_bps: u64,
    /// Cap on any single reference's contribution, in bps. 0 = uncapped.
    #[serde(default)]
    pub max_reference_move_bps: u64,
    pub aggregation_mode: AggregationMode,
}

/// A pending trade against a protected pool. Not persisted; the estimator
/// works from the amount's magnitude, the sign follows the host's
/// exact-input convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub id: Uuid,
    pub pool_id: PoolId,
    pub amount: i128,
    /// Which side is being sold: true when the protected pool's base asset
    /// is the input.
    pub sells_base: bool,
}

impl TradeRequest {
    pub fn new(pool_id: PoolId, amount: i128, sells_base: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool_id,
            amount,
            sells_base,
        }
    }
}

/// Credential required to register protected pools. The engine captures the
/// expected credential at construction; there is no ambient owner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredential(String);

impl AdminCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}
