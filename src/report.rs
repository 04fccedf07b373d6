use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::engine::decision::{Decision, FeeTier};
use crate::shared::types::PoolId;

/// Outcome of one trade evaluation, in the shape downstream telemetry
/// consumes: the chosen fee (if any) and the unexplained-impact figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub trade_id: Uuid,
    pub pool: PoolId,
    pub outcome: Outcome,
    pub fee_ppm: Option<u32>,
    pub unexplained_bps: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    AllowedBase,
    AllowedElevated,
    Rejected,
}

impl DecisionRecord {
    pub fn new(trade_id: Uuid, pool: PoolId, decision: &Decision) -> Self {
        let outcome = match decision {
            Decision::Allow {
                tier: FeeTier::Base,
                ..
            } => Outcome::AllowedBase,
            Decision::Allow {
                tier: FeeTier::Elevated,
                ..
            } => Outcome::AllowedElevated,
            Decision::Reject { .. } => Outcome::Rejected,
        };
        Self {
            trade_id,
            pool,
            outcome,
            fee_ppm: decision.fee_ppm(),
            unexplained_bps: decision.unexplained_bps(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Aggregate tally for a scenario run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub trades: usize,
    pub allowed_base: usize,
    pub allowed_elevated: usize,
    pub rejected: usize,
}

impl RunSummary {
    pub fn record(&mut self, record: &DecisionRecord) {
        self.trades += 1;
        match record.outcome {
            Outcome::AllowedBase => self.allowed_base += 1,
            Outcome::AllowedElevated => self.allowed_elevated += 1,
            Outcome::Rejected => self.rejected += 1,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_record() -> DecisionRecord {
        DecisionRecord::new(
            Uuid::new_v4(),
            PoolId::from("protected"),
            &Decision::Reject {
                unexplained_bps: 1_500,
            },
        )
    }

    #[test]
    fn test_record_carries_the_fee_and_unexplained_figure() {
        let decision = Decision::Allow {
            tier: FeeTier::Elevated,
            fee_ppm: 10_000,
            unexplained_bps: 420,
        };
        let record = DecisionRecord::new(Uuid::new_v4(), PoolId::from("protected"), &decision);
        assert_eq!(record.outcome, Outcome::AllowedElevated);
        assert_eq!(record.fee_ppm, Some(10_000));
        assert_eq!(record.unexplained_bps, 420);
    }

    #[test]
    fn test_rejection_has_no_fee() {
        let record = rejected_record();
        assert_eq!(record.outcome, Outcome::Rejected);
        assert_eq!(record.fee_ppm, None);
        assert_eq!(record.unexplained_bps, 1_500);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = rejected_record();
        let json = record.to_json().unwrap();
        let back: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcome, record.outcome);
        assert_eq!(back.unexplained_bps, record.unexplained_bps);
        assert_eq!(back.trade_id, record.trade_id);
    }

    #[test]
    fn test_summary_tallies_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&rejected_record());
        summary.record(&DecisionRecord::new(
            Uuid::new_v4(),
            PoolId::from("protected"),
            &Decision::Allow {
                tier: FeeTier::Base,
                fee_ppm: 3_000,
                unexplained_bps: 5,
            },
        ));
        assert_eq!(summary.trades, 2);
        assert_eq!(summary.allowed_base, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.allowed_elevated, 0);
    }
}
