use crate::shared::types::SqrtPriceX96;

/// Whether a reference pool's movement is in the same economic direction as
/// the pending trade's expected push on the protected pool.
///
/// A reference moving the opposite way must not offset a genuine attack, so
/// only same-direction movement counts as "explaining" the trade. No
/// baseline or no movement never aligns.
pub fn is_aligned(
    old: SqrtPriceX96,
    new: SqrtPriceX96,
    trade_sells_base: bool,
    reference_inverted: bool,
) -> bool {
    if old == 0 || old == new {
        return false;
    }
    // Selling the protected pool's base asset pushes its price down.
    let mut expected_upward = !trade_sells_base;
    if reference_inverted {
        expected_upward = !expected_upward;
    }
    if expected_upward {
        new > old
    } else {
        new < old
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Q96;

    const UP: u128 = Q96 + Q96 / 100;
    const DOWN: u128 = Q96 - Q96 / 100;

    #[test]
    fn test_no_baseline_never_aligns() {
        assert!(!is_aligned(0, UP, true, false));
        assert!(!is_aligned(0, UP, false, true));
    }

    #[test]
    fn test_no_movement_never_aligns() {
        assert!(!is_aligned(Q96, Q96, true, false));
        assert!(!is_aligned(Q96, Q96, false, false));
    }

    #[test]
    fn test_selling_base_expects_downward_reference() {
        assert!(is_aligned(Q96, DOWN, true, false));
        assert!(!is_aligned(Q96, UP, true, false));
    }

    #[test]
    fn test_buying_base_expects_upward_reference() {
        assert!(is_aligned(Q96, UP, false, false));
        assert!(!is_aligned(Q96, DOWN, false, false));
    }

    #[test]
    fn test_inverted_reference_flips_expectation() {
        assert!(is_aligned(Q96, UP, true, true));
        assert!(!is_aligned(Q96, DOWN, true, true));
        assert!(is_aligned(Q96, DOWN, false, true));
    }
}
