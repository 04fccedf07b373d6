//! Swap price-impact estimation

pub mod impact;

pub use impact::{impact_bps, projected_sqrt_price, MAX_IMPACT_BPS};
