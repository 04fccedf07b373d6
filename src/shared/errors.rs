//! Error handling for the engine

use thiserror::Error;

use crate::shared::types::PoolId;

/// Registration-time configuration errors. All are rejected synchronously;
/// none are retried.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Reference list is empty")]
    EmptyReferenceList,

    #[error("Reference list has {0} entries, maximum is 5")]
    TooManyReferences(usize),

    #[error("Elevated fee {elevated_ppm}ppm is below base fee {base_ppm}ppm")]
    FeeOrdering { base_ppm: u32, elevated_ppm: u32 },

    #[error("Reject threshold {reject_bps}bps is below elevated threshold {elevated_bps}bps")]
    ThresholdOrdering { elevated_bps: u64, reject_bps: u64 },

    #[error("Caller is not the registration authority")]
    Unauthorized,

    #[error(transparent)]
    StateRead(#[from] StateReadError),
}

/// Evaluation-time errors. A failed state read is fatal to the encompassing
/// trade and propagated to the host, never swallowed.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Pool not registered: {0}")]
    NotRegistered(PoolId),

    #[error(transparent)]
    StateRead(#[from] StateReadError),
}

/// Pool state read failures from the host's state reader.
#[derive(Error, Debug)]
pub enum StateReadError {
    #[error("Pool not found: {0}")]
    PoolNotFound(PoolId),

    #[error("Pool state unavailable: {0}")]
    Unavailable(String),
}
