pub mod ids;
pub mod persist;
pub mod store;

pub use crate::domain::model::{Resume, StoreState};
pub use crate::domain::ports::{MutationOutcome, ResumeStore, StateStorage};
pub use crate::utils::error::Result;
