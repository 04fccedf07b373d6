use tracing::{debug, info, warn};

use crate::domain::engine::decision::{Decision, FeeTier};
use crate::domain::reference::{explained_movement_bps, ReferenceMove};
use crate::domain::swap::impact_bps;
use crate::infrastructure::state::reader::PoolStateReader;
use crate::infrastructure::state::store::{ConfigStore, RegisteredPool};
use crate::shared::errors::{EvaluationError, RegistrationError, StateReadError};
use crate::shared::types::{AdminCredential, PoolConfig, PoolId, TradeRequest, MAX_REFERENCES};

/// Orchestrates the per-trade decision: explained reference movement versus
/// estimated swap impact, tiered against the pool's thresholds.
///
/// The engine is strictly synchronous. The host must serialize evaluation
/// and settlement per protected pool; two trades against the same pool must
/// never interleave between `evaluate` and `settle`, or both would measure
/// movement from the same stale tracked prices.
pub struct DecisionEngine<R, S> {
    reader: R,
    store: S,
    admin: AdminCredential,
}

impl<R: PoolStateReader, S: ConfigStore> DecisionEngine<R, S> {
    pub fn new(reader: R, store: S, admin: AdminCredential) -> Self {
        Self {
            reader,
            store,
            admin,
        }
    }

    /// Register or replace a protected pool's config.
    ///
    /// Tracking starts from a fresh reference read when the protected pool
    /// is already live; for pools registered ahead of their initialization
    /// the tracked prices stay zero until `on_pool_initialized`.
    pub fn register_pool(
        &mut self,
        credential: &AdminCredential,
        pool_id: PoolId,
        config: PoolConfig,
    ) -> Result<(), RegistrationError> {
        if credential != &self.admin {
            return Err(RegistrationError::Unauthorized);
        }
        if config.references.is_empty() {
            return Err(RegistrationError::EmptyReferenceList);
        }
        if config.references.len() > MAX_REFERENCES {
            return Err(RegistrationError::TooManyReferences(config.references.len()));
        }
        if config.elevated_fee_ppm < config.base_fee_ppm {
            return Err(RegistrationError::FeeOrdering {
                base_ppm: config.base_fee_ppm,
                elevated_ppm: config.elevated_fee_ppm,
            });
        }
        if config.reject_threshold_bps < config.elevated_threshold_bps {
            return Err(RegistrationError::ThresholdOrdering {
                elevated_bps: config.elevated_threshold_bps,
                reject_bps: config.reject_threshold_bps,
            });
        }

        let live = match self.reader.read(&pool_id) {
            Ok(state) => state.sqrt_price != 0,
            Err(StateReadError::PoolNotFound(_)) => false,
            Err(e) => return Err(e.into()),
        };
        let mut tracked = Vec::with_capacity(config.references.len());
        for spec in &config.references {
            let price = if live {
                self.reader.read(&spec.pool_id)?.sqrt_price
            } else {
                0
            };
            tracked.push(price);
        }
        info!(
            pool = %pool_id,
            references = config.references.len(),
            live,
            "registered protected pool"
        );
        self.store
            .save(pool_id, RegisteredPool::from_config(&config, tracked));
        Ok(())
    }

    /// Deferred tracking initialization for pools registered before the
    /// protected pool itself existed.
    pub fn on_pool_initialized(&mut self, pool_id: &PoolId) -> Result<(), EvaluationError> {
        self.refresh_tracking(pool_id)
    }

    /// Pre-trade hook: decide the fee tier, or reject.
    ///
    /// Rejection mutates nothing; for allowed trades the host settles the
    /// swap and then calls `settle` so the next trade measures reference
    /// movement from this one.
    pub fn evaluate(&self, trade: &TradeRequest) -> Result<Decision, EvaluationError> {
        let pool = self
            .store
            .load(&trade.pool_id)
            .ok_or_else(|| EvaluationError::NotRegistered(trade.pool_id.clone()))?;
        let state = self.reader.read(&trade.pool_id)?;

        let mut moves = Vec::with_capacity(pool.references.len());
        for reference in &pool.references {
            let current = self.reader.read(&reference.pool_id)?.sqrt_price;
            moves.push(ReferenceMove {
                tracked: reference.last_sqrt_price,
                current,
                inverted: reference.inverted,
            });
        }

        let explained = explained_movement_bps(
            &moves,
            trade.sells_base,
            pool.max_reference_move_bps,
            pool.aggregation_mode,
        );
        let impact = impact_bps(trade.amount, state.liquidity, state.sqrt_price, trade.sells_base);
        let unexplained = impact.saturating_sub(explained);
        debug!(
            trade = %trade.id,
            pool = %trade.pool_id,
            impact,
            explained,
            unexplained,
            "evaluated trade"
        );

        let decision = if unexplained >= pool.reject_threshold_bps {
            warn!(
                trade = %trade.id,
                pool = %trade.pool_id,
                unexplained,
                "circuit breaker triggered"
            );
            Decision::Reject {
                unexplained_bps: unexplained,
            }
        } else if unexplained >= pool.elevated_threshold_bps {
            Decision::Allow {
                tier: FeeTier::Elevated,
                fee_ppm: pool.elevated_fee_ppm,
                unexplained_bps: unexplained,
            }
        } else {
            Decision::Allow {
                tier: FeeTier::Base,
                fee_ppm: pool.base_fee_ppm,
                unexplained_bps: unexplained,
            }
        };
        if let Decision::Allow { tier, fee_ppm, .. } = decision {
            info!(
                trade = %trade.id,
                pool = %trade.pool_id,
                ?tier,
                fee_ppm,
                unexplained,
                "trade allowed"
            );
        }
        Ok(decision)
    }

    /// Post-trade hook for trades that proceeded: unconditionally overwrite
    /// every tracked reference price with a fresh read, whatever the tier.
    pub fn settle(&mut self, pool_id: &PoolId) -> Result<(), EvaluationError> {
        self.refresh_tracking(pool_id)
    }

    /// The stored state for a protected pool, if registered.
    pub fn registered(&self, pool_id: &PoolId) -> Option<RegisteredPool> {
        self.store.load(pool_id)
    }

    fn refresh_tracking(&mut self, pool_id: &PoolId) -> Result<(), EvaluationError> {
        let mut pool = self
            .store
            .load(pool_id)
            .ok_or_else(|| EvaluationError::NotRegistered(pool_id.clone()))?;
        for reference in &mut pool.references {
            reference.last_sqrt_price = self.reader.read(&reference.pool_id)?.sqrt_price;
        }
        self.store.save(pool_id.clone(), pool);
        Ok(())
    }
}
