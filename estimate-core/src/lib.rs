pub mod calculations;
pub mod db;
pub mod defaults;
pub mod models;
pub mod session;

pub use db::repository::{EstimateStore, SeedOutcome, StoreError};
pub use models::*;
pub use session::{EditSession, ValidationError};
