//! Price movement measurement and direction classification

pub mod alignment;
pub mod change;

pub use alignment::is_aligned;
pub use change::change_bps;
