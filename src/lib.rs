pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use core::store::DocumentStore;
pub use domain::model::{Education, Experience, Proficiency, Resume, Skill};
pub use domain::ports::{MutationOutcome, ResumeStore};
pub use utils::error::{ResumeError, Result};
