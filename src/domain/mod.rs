//! Domain layer - core decision logic

pub mod engine;
pub mod price;
pub mod reference;
pub mod swap;
