use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::infrastructure::state::reader::{PoolState, PoolStateReader};
use crate::shared::errors::StateReadError;
use crate::shared::types::{PoolId, SqrtPriceX96};

/// In-memory pool state shared between the scenario driver and the engine.
/// Cloning yields another handle onto the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SharedPoolStateReader {
    pools: Arc<Mutex<HashMap<PoolId, PoolState>>>,
}

impl SharedPoolStateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, pool_id: PoolId, state: PoolState) {
        // A full overwrite is safe even after a poisoning panic.
        self.pools
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pool_id, state);
    }

    fn locked(&self) -> Result<MutexGuard<'_, HashMap<PoolId, PoolState>>, StateReadError> {
        self.pools
            .lock()
            .map_err(|_| StateReadError::Unavailable("pool state lock poisoned".into()))
    }

    /// Move a pool's price, keeping its liquidity. Fails when the pool was
    /// never inserted.
    pub fn set_sqrt_price(
        &self,
        pool_id: &PoolId,
        sqrt_price: SqrtPriceX96,
    ) -> Result<(), StateReadError> {
        let mut pools = self.locked()?;
        match pools.get_mut(pool_id) {
            Some(state) => {
                state.sqrt_price = sqrt_price;
                Ok(())
            }
            None => Err(StateReadError::PoolNotFound(pool_id.clone())),
        }
    }
}

impl PoolStateReader for SharedPoolStateReader {
    fn read(&self, pool_id: &PoolId) -> Result<PoolState, StateReadError> {
        self.locked()?
            .get(pool_id)
            .copied()
            .ok_or_else(|| StateReadError::PoolNotFound(pool_id.clone()))
    }
}
