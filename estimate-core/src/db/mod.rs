pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{MemoryStoreFactory, StoreConfig, StoreFactory, StoreRegistry};
pub use memory::MemoryStore;
pub use repository::{EstimateStore, SeedOutcome, StoreError};
