pub mod config_store;
pub mod directory;

pub use config_store::ConfigStore;
pub use directory::{CopyStats, DeleteOutcome, DirectoryError, EnsureOutcome};
