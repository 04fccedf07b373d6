//! Pool state and configuration storage capabilities

pub mod memory;
pub mod reader;
pub mod store;

pub use memory::SharedPoolStateReader;
pub use reader::{PoolState, PoolStateReader};
pub use store::{ConfigStore, InMemoryConfigStore, RegisteredPool, TrackedReference};
