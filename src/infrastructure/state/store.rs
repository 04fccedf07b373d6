use std::collections::HashMap;

use crate::shared::types::{AggregationMode, PoolConfig, PoolId, SqrtPriceX96};

/// A registered reference market together with its tracked price sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedReference {
    pub pool_id: PoolId,
    pub inverted: bool,
    /// Reference price as of the end of the most recently processed trade,
    /// or the registration-time price before any trade. Zero until the
    /// protected pool is initialized.
    pub last_sqrt_price: SqrtPriceX96,
}

/// Everything the engine keeps for one protected pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredPool {
    pub base_fee_ppm: u32,
    pub elevated_fee_ppm: u32,
    pub elevated_threshold_bps: u64,
    pub reject_threshold_bps: u64,
    pub max_reference_move_bps: u64,
    pub aggregation_mode: AggregationMode,
    pub references: Vec<TrackedReference>,
}

impl RegisteredPool {
    /// Build the stored record from a validated config and the tracked
    /// starting prices, one per reference in config order.
    pub fn from_config(config: &PoolConfig, tracked_prices: Vec<SqrtPriceX96>) -> Self {
        let references = config
            .references
            .iter()
            .zip(tracked_prices)
            .map(|(spec, last_sqrt_price)| TrackedReference {
                pool_id: spec.pool_id.clone(),
                inverted: spec.inverted,
                last_sqrt_price,
            })
            .collect();
        Self {
            base_fee_ppm: config.base_fee_ppm,
            elevated_fee_ppm: config.elevated_fee_ppm,
            elevated_threshold_bps: config.elevated_threshold_bps,
            reject_threshold_bps: config.reject_threshold_bps,
            max_reference_move_bps: config.max_reference_move_bps,
            aggregation_mode: config.aggregation_mode,
            references,
        }
    }
}

/// Keyed storage of registered pools. The in-memory form is the default;
/// hosts with durable storage implement this over their own store.
pub trait ConfigStore {
    fn load(&self, pool_id: &PoolId) -> Option<RegisteredPool>;
    fn save(&mut self, pool_id: PoolId, pool: RegisteredPool);
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    pools: HashMap<PoolId, RegisteredPool>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self, pool_id: &PoolId) -> Option<RegisteredPool> {
        self.pools.get(pool_id).cloned()
    }

    fn save(&mut self, pool_id: PoolId, pool: RegisteredPool) {
        self.pools.insert(pool_id, pool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{ReferenceSpec, Q96};

    fn config() -> PoolConfig {
        PoolConfig {
            references: vec![
                ReferenceSpec {
                    pool_id: PoolId::from("ref-a"),
                    inverted: false,
                },
                ReferenceSpec {
                    pool_id: PoolId::from("ref-b"),
                    inverted: true,
                },
            ],
            base_fee_ppm: 3_000,
            elevated_fee_ppm: 10_000,
            elevated_threshold_bps: 200,
            reject_threshold_bps: 1_000,
            max_reference_move_bps: 0,
            aggregation_mode: AggregationMode::Maximum,
        }
    }

    #[test]
    fn test_from_config_pairs_references_with_tracked_prices() {
        let pool = RegisteredPool::from_config(&config(), vec![Q96, Q96 / 2]);
        assert_eq!(pool.references.len(), 2);
        assert_eq!(pool.references[0].pool_id, PoolId::from("ref-a"));
        assert_eq!(pool.references[0].last_sqrt_price, Q96);
        assert!(pool.references[1].inverted);
        assert_eq!(pool.references[1].last_sqrt_price, Q96 / 2);
    }

    #[test]
    fn test_save_replaces_existing_registration() {
        let mut store = InMemoryConfigStore::new();
        let id = PoolId::from("protected");
        store.save(id.clone(), RegisteredPool::from_config(&config(), vec![Q96, Q96]));
        let mut replacement = config();
        replacement.base_fee_ppm = 500;
        store.save(id.clone(), RegisteredPool::from_config(&replacement, vec![0, 0]));
        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded.base_fee_ppm, 500);
        assert_eq!(loaded.references[0].last_sqrt_price, 0);
    }
}
