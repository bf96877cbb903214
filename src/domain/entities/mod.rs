pub mod project;

pub use project::{ProjectConfig, ProjectList};
