//! Infrastructure layer - host-facing capability seams

pub mod state;
