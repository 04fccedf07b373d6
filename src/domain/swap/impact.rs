use ethnum::U256;

use crate::domain::price::change_bps;
use crate::shared::types::SqrtPriceX96;

/// Hard ceiling on estimated impact: 10_000 bps, the whole price.
pub const MAX_IMPACT_BPS: u64 = 10_000;

/// Estimate the bps price displacement a trade of `amount` would cause,
/// clamped to `[0, MAX_IMPACT_BPS]`.
///
/// Uses the constant-liquidity closed form (no tick walking): conservative
/// for small trades, inaccurate for trades crossing many tick boundaries.
/// A degenerate pool (zero liquidity or zero price) is treated as maximally
/// sensitive rather than as an arithmetic error, biasing toward rejection.
pub fn impact_bps(
    amount: i128,
    liquidity: u128,
    sqrt_price: SqrtPriceX96,
    sells_base: bool,
) -> u64 {
    if liquidity == 0 || sqrt_price == 0 {
        return MAX_IMPACT_BPS;
    }
    let delta = amount.unsigned_abs();
    if sells_base && delta >= liquidity {
        // The projection would collapse the price past zero.
        return MAX_IMPACT_BPS;
    }
    let new_sqrt = projected_sqrt_price(delta, liquidity, sqrt_price, sells_base);
    change_bps(sqrt_price, new_sqrt).min(MAX_IMPACT_BPS)
}

/// Post-trade sqrt price under locally-constant liquidity.
///
/// Selling base: `sqrt_price * L / (L + delta)` with delta in base units.
/// Selling quote: `sqrt_price + (delta << 96) / L` with delta in quote units.
pub fn projected_sqrt_price(
    delta: u128,
    liquidity: u128,
    sqrt_price: SqrtPriceX96,
    sells_base: bool,
) -> SqrtPriceX96 {
    if liquidity == 0 {
        return sqrt_price;
    }
    if sells_base {
        let num = U256::from(sqrt_price) * U256::from(liquidity);
        let den = U256::from(liquidity) + U256::from(delta);
        (num / den).as_u128()
    } else {
        let shift: U256 = (U256::from(delta) << 96) / U256::from(liquidity);
        let new = U256::from(sqrt_price) + shift;
        if new > U256::from(u128::MAX) {
            u128::MAX
        } else {
            new.as_u128()
        }
    }
}
