use crate::shared::errors::StateReadError;
use crate::shared::types::{PoolId, SqrtPriceX96};

/// Same-instant snapshot of a pool's observable state. Read fresh on every
/// evaluation; the engine never caches these beyond the explicit tracked
/// reference prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub sqrt_price: SqrtPriceX96,
    pub liquidity: u128,
    pub tick: Option<i32>,
}

/// Read capability over the host's pools, for the protected pool and every
/// reference pool alike.
///
/// Implementations must return state consistent with the instant immediately
/// before the pending trade settles. Reads are synchronous: the engine runs
/// inside the trade's own serialized unit of work and has no suspension
/// points.
pub trait PoolStateReader {
    fn read(&self, pool_id: &PoolId) -> Result<PoolState, StateReadError>;
}
