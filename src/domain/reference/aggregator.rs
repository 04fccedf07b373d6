use crate::domain::price::{change_bps, is_aligned};
use crate::shared::types::{AggregationMode, SqrtPriceX96};

/// A reference pool's tracked and freshly read prices, with its orientation.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceMove {
    /// Price as of the end of the last processed trade.
    pub tracked: SqrtPriceX96,
    /// Price read for the current evaluation.
    pub current: SqrtPriceX96,
    pub inverted: bool,
}

/// Combine the aligned, magnitude-capped movements of the reference pools
/// into a single explained-movement figure in bps.
///
/// Only movement in the trade's expected direction counts. `cap_bps` limits
/// any single reference's contribution (0 = uncapped). An empty aligned set
/// explains nothing.
pub fn explained_movement_bps(
    moves: &[ReferenceMove],
    trade_sells_base: bool,
    cap_bps: u64,
    mode: AggregationMode,
) -> u64 {
    let mut aligned = Vec::with_capacity(moves.len());
    for m in moves {
        if !is_aligned(m.tracked, m.current, trade_sells_base, m.inverted) {
            continue;
        }
        let mut bps = change_bps(m.tracked, m.current);
        if cap_bps != 0 && bps > cap_bps {
            bps = cap_bps;
        }
        aligned.push(bps);
    }
    if aligned.is_empty() {
        return 0;
    }
    match mode {
        AggregationMode::Maximum => aligned.iter().copied().max().unwrap_or(0),
        AggregationMode::Median => median(&mut aligned),
    }
}

fn median(values: &mut [u64]) -> u64 {
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        // Widen before summing: uncapped contributions can sit at u64::MAX.
        ((values[mid - 1] as u128 + values[mid] as u128) / 2) as u64
    }
}
