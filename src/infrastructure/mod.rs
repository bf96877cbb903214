/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - SCM operations (clone and pull through the git client)
/// - File system operations (resource list file, directory utilities)
pub mod filesystem;
pub mod scm;

// Re-export commonly used types
pub use filesystem::ConfigStore;
pub use scm::{GitScm, ScmError, ScmOperations};
