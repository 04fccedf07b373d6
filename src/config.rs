use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::{fs, path::Path};

use crate::shared::types::{AggregationMode, PoolConfig, PoolId, ReferenceSpec};

#[derive(Debug, Clone, Deserialize)]
pub struct EngineCfg {
    /// Credential expected by the registration entrypoint.
    pub admin_token: String,
}

/// Initial market state for one pool the scenario knows about.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolStateCfg {
    pub id: PoolId,
    #[serde(deserialize_with = "de_u128")]
    pub sqrt_price_x96: u128,
    #[serde(deserialize_with = "de_u128", default)]
    pub liquidity: u128,
    pub tick: Option<i32>,
}

/// Registration parameters for one protected pool.
#[derive(Debug, Clone, Deserialize)]
pub struct ProtectedPoolCfg {
    pub id: PoolId,
    pub base_fee_ppm: u32,
    pub elevated_fee_ppm: u32,
    pub elevated_threshold_bps: u64,
    pub reject_threshold_bps: u64,
    #[serde(default)]
    pub max_reference_move_bps: u64,
    pub aggregation_mode: AggregationMode,
    pub references: Vec<ReferenceSpec>,
}

impl ProtectedPoolCfg {
    pub fn to_pool_config(&self) -> PoolConfig {
        PoolConfig {
            references: self.references.clone(),
            base_fee_ppm: self.base_fee_ppm,
            elevated_fee_ppm: self.elevated_fee_ppm,
            elevated_threshold_bps: self.elevated_threshold_bps,
            reject_threshold_bps: self.reject_threshold_bps,
            max_reference_move_bps: self.max_reference_move_bps,
            aggregation_mode: self.aggregation_mode,
        }
    }
}

/// One scripted step of a scenario run.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepCfg {
    /// Move an observed pool price (e.g. a reference market moving).
    SetPrice {
        pool: PoolId,
        #[serde(deserialize_with = "de_u128")]
        sqrt_price_x96: u128,
    },
    /// Evaluate (and, if allowed, settle) a trade against a protected pool.
    Trade {
        pool: PoolId,
        #[serde(deserialize_with = "de_i128")]
        amount: i128,
        sells_base: bool,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub engine: EngineCfg,
    pub pools: Vec<PoolStateCfg>,
    pub protected: Vec<ProtectedPoolCfg>,
    #[serde(default)]
    pub steps: Vec<StepCfg>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        let cfg: Self = toml::from_str(&s).context("parse scenario config")?;
        Ok(cfg)
    }
}

// TOML integers are i64; Q96 prices and liquidity routinely exceed that, so
// wide fields also accept decimal strings (with optional `_` separators).
fn de_u128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Int(v) if v >= 0 => Ok(v as u128),
        Raw::Int(v) => Err(serde::de::Error::custom(format!("negative value: {v}"))),
        Raw::Str(s) => s
            .trim()
            .replace('_', "")
            .parse()
            .map_err(serde::de::Error::custom),
    }
}

fn de_i128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v as i128),
        Raw::Str(s) => s
            .trim()
            .replace('_', "")
            .parse()
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[engine]
admin_token = "registry-key"

[[pools]]
id = "protected"
sqrt_price_x96 = "79228162514264337593543950336"
liquidity = "10_000_000"
tick = 0

[[pools]]
id = "ref-a"
sqrt_price_x96 = "79228162514264337593543950336"
liquidity = "1_000_000_000"

[[protected]]
id = "protected"
base_fee_ppm = 3000
elevated_fee_ppm = 10000
elevated_threshold_bps = 200
reject_threshold_bps = 1000
aggregation_mode = "maximum"
references = [{ pool_id = "ref-a", inverted = false }]

[[steps]]
kind = "set_price"
pool = "ref-a"
sqrt_price_x96 = "78436259931832694817607279437"

[[steps]]
kind = "trade"
pool = "protected"
amount = "-500000"
sells_base = true
"#;

    #[test]
    fn test_sample_config_parses() {
        let cfg: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.engine.admin_token, "registry-key");
        assert_eq!(cfg.pools.len(), 2);
        assert_eq!(cfg.pools[0].sqrt_price_x96, 1u128 << 96);
        assert_eq!(cfg.pools[0].liquidity, 10_000_000);
        assert_eq!(cfg.pools[0].tick, Some(0));
        assert_eq!(cfg.pools[1].tick, None);
        assert_eq!(cfg.protected.len(), 1);
        assert_eq!(cfg.protected[0].max_reference_move_bps, 0);
        assert_eq!(cfg.steps.len(), 2);
        match &cfg.steps[1] {
            StepCfg::Trade {
                amount, sells_base, ..
            } => {
                assert_eq!(*amount, -500_000);
                assert!(*sells_base);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_protected_cfg_converts_to_pool_config() {
        let cfg: Config = toml::from_str(SAMPLE).unwrap();
        let pool_config = cfg.protected[0].to_pool_config();
        assert_eq!(pool_config.references.len(), 1);
        assert_eq!(pool_config.aggregation_mode, AggregationMode::Maximum);
        assert_eq!(pool_config.reject_threshold_bps, 1_000);
    }

    #[test]
    fn test_plain_integers_are_accepted_for_narrow_values() {
        let cfg: Config = toml::from_str(
            r#"
[engine]
admin_token = "k"

[[pools]]
id = "p"
sqrt_price_x96 = 1000
liquidity = 500

[[protected]]
id = "p"
base_fee_ppm = 1
elevated_fee_ppm = 2
elevated_threshold_bps = 1
reject_threshold_bps = 2
aggregation_mode = "median"
references = [{ pool_id = "r" }]
"#,
        )
        .unwrap();
        assert_eq!(cfg.pools[0].sqrt_price_x96, 1_000);
        assert_eq!(cfg.pools[0].liquidity, 500);
        assert!(!cfg.protected[0].references[0].inverted);
        assert!(cfg.steps.is_empty());
    }
}
