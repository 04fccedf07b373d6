//! Reference-market aggregation

pub mod aggregator;

pub use aggregator::{explained_movement_bps, ReferenceMove};
