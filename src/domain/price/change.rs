use ethnum::U256;

use crate::shared::types::{SqrtPriceX96, BPS_SCALE};

/// Basis-point magnitude of the price move between two sqrt-price samples.
///
/// Since `price = sqrt_price^2`, a relative sqrt-price move of x is a price
/// move of roughly 2x to first order, so this returns
/// `2 * |new - old| * 10_000 / old`. Deliberately inexact for large moves
/// but monotonic and cheap. A zero baseline means no sample has been taken
/// yet and is reported as no movement, not an error. No upper clamp is
/// applied here; callers clamp where they need to.
pub fn change_bps(old: SqrtPriceX96, new: SqrtPriceX96) -> u64 {
    if old == 0 {
        return 0;
    }
    let diff = if new > old { new - old } else { old - new };
    let bps = U256::from(diff) * U256::from(2 * BPS_SCALE) / U256::from(old);
    if bps > U256::from(u64::MAX) {
        u64::MAX
    } else {
        bps.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Q96;
    use proptest::prelude::*;

    #[test]
    fn test_no_movement_is_zero() {
        assert_eq!(change_bps(Q96, Q96), 0);
        assert_eq!(change_bps(1, 1), 0);
        assert_eq!(change_bps(u128::MAX, u128::MAX), 0);
    }

    #[test]
    fn test_zero_baseline_is_zero() {
        assert_eq!(change_bps(0, Q96), 0);
        assert_eq!(change_bps(0, 0), 0);
    }

    #[test]
    fn test_one_percent_sqrt_move_is_200_bps() {
        let old = Q96;
        let new = Q96 + Q96 / 100;
        assert_eq!(change_bps(old, new), 200);
        assert_eq!(change_bps(new, old), (20_000 * (Q96 / 100) / new) as u64);
    }

    #[test]
    fn test_direction_does_not_matter_for_the_diff() {
        // Same baseline, same distance, opposite directions.
        let old = Q96;
        let up = change_bps(old, old + old / 250);
        let down = change_bps(old, old - old / 250);
        assert_eq!(up, down);
        assert_eq!(up, 80);
    }

    #[test]
    fn test_huge_move_does_not_overflow() {
        let bps = change_bps(1, u128::MAX);
        assert_eq!(bps, u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_identical_samples_always_zero(p in 1u128..=u128::MAX) {
            prop_assert_eq!(change_bps(p, p), 0);
        }

        // Swapping old/new keeps the magnitude within rounding for small
        // moves (the denominators differ by at most the move itself).
        #[test]
        fn prop_swap_symmetric_for_small_moves(
            old in (Q96 / 2)..Q96,
            delta in 0u128..(Q96 / 2000),
        ) {
            let a = change_bps(old, old + delta);
            let b = change_bps(old + delta, old);
            prop_assert!(a.abs_diff(b) <= 1);
        }

        #[test]
        fn prop_monotonic_in_distance(
            old in (Q96 / 2)..Q96,
            d1 in 0u128..Q96,
            d2 in 0u128..Q96,
        ) {
            let (small, big) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(change_bps(old, old + small) <= change_bps(old, old + big));
        }
    }
}
