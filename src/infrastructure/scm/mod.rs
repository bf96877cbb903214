/// SCM (Source Control Management) operations infrastructure
///
/// The tool only needs clone and pull; both go through the `git` client.
pub mod git_scm;
pub mod scm_interface;

pub use git_scm::GitScm;
pub use scm_interface::{ScmError, ScmOperations};
