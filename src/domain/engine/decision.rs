use serde::{Deserialize, Serialize};

/// Fee tier chosen for an allowed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeTier {
    Base,
    Elevated,
}

/// Terminal outcome of one pre-trade evaluation. One trade, one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow {
        tier: FeeTier,
        fee_ppm: u32,
        unexplained_bps: u64,
    },
    /// Circuit breaker: the unexplained impact reached the reject threshold.
    /// The trade must not proceed and no tracking state is mutated.
    Reject { unexplained_bps: u64 },
}

impl Decision {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Decision::Reject { .. })
    }

    pub fn unexplained_bps(&self) -> u64 {
        match self {
            Decision::Allow { unexplained_bps, .. } | Decision::Reject { unexplained_bps } => {
                *unexplained_bps
            }
        }
    }

    pub fn fee_ppm(&self) -> Option<u32> {
        match self {
            Decision::Allow { fee_ppm, .. } => Some(*fee_ppm),
            Decision::Reject { .. } => None,
        }
    }
}
