pub mod search;

pub use search::{LinkError, PlanError};
