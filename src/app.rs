use anyhow::{Context, Result};
use tracing::info;

use crate::config::{Config, StepCfg};
use crate::domain::engine::decision_engine::DecisionEngine;
use crate::domain::swap::projected_sqrt_price;
use crate::infrastructure::state::memory::SharedPoolStateReader;
use crate::infrastructure::state::reader::{PoolState, PoolStateReader};
use crate::infrastructure::state::store::InMemoryConfigStore;
use crate::report::{DecisionRecord, RunSummary};
use crate::shared::types::{AdminCredential, TradeRequest};

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config_path: String,
    /// Emit one JSON line per decision on stdout.
    pub json_lines: bool,
}

/// Replay a scenario file through the engine: seed the in-memory pool
/// states, register the protected pools, then run the scripted steps,
/// settling after every allowed trade.
pub fn run(app_cfg: AppCfg) -> Result<()> {
    let cfg = Config::from_file(&app_cfg.config_path)?;
    info!(config = %app_cfg.config_path, pools = cfg.pools.len(), "loaded scenario");

    let reader = SharedPoolStateReader::new();
    for pool in &cfg.pools {
        reader.insert(
            pool.id.clone(),
            PoolState {
                sqrt_price: pool.sqrt_price_x96,
                liquidity: pool.liquidity,
                tick: pool.tick,
            },
        );
    }

    let admin = AdminCredential::new(cfg.engine.admin_token.clone());
    let mut engine = DecisionEngine::new(reader.clone(), InMemoryConfigStore::new(), admin.clone());
    for pool in &cfg.protected {
        engine
            .register_pool(&admin, pool.id.clone(), pool.to_pool_config())
            .with_context(|| format!("register protected pool {}", pool.id))?;
    }

    let mut summary = RunSummary::default();
    for step in &cfg.steps {
        match step {
            StepCfg::SetPrice {
                pool,
                sqrt_price_x96,
            } => {
                reader
                    .set_sqrt_price(pool, *sqrt_price_x96)
                    .with_context(|| format!("move price of unknown pool {pool}"))?;
                info!(pool = %pool, "applied scripted price move");
            }
            StepCfg::Trade {
                pool,
                amount,
                sells_base,
            } => {
                let trade = TradeRequest::new(pool.clone(), *amount, *sells_base);
                let decision = engine.evaluate(&trade)?;
                let record = DecisionRecord::new(trade.id, pool.clone(), &decision);
                if app_cfg.json_lines {
                    println!("{}", record.to_json()?);
                }
                summary.record(&record);

                if !decision.is_rejected() {
                    // The trade proceeds: advance the protected pool to its
                    // projected post-trade price, then run the post-trade
                    // tracking refresh.
                    let state = reader.read(pool)?;
                    let new_sqrt = projected_sqrt_price(
                        amount.unsigned_abs(),
                        state.liquidity,
                        state.sqrt_price,
                        *sells_base,
                    );
                    reader.set_sqrt_price(pool, new_sqrt)?;
                    engine.settle(pool)?;
                }
            }
        }
    }

    info!(
        trades = summary.trades,
        rejected = summary.rejected,
        "scenario finished"
    );
    println!("{}", summary.to_json_pretty()?);
    Ok(())
}
