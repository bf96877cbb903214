//! # gitwrap - Resource folder fetcher
//!
//! `gitwrap` reads a project list (`l1onResources.json`) and, for each entry, brings a local
//! clone of a git repository up to date and copies one folder out of it into a destination
//! directory.
//!
//! ## Features
//!
//! - **Clone or update**: `git clone`, falling back to `git pull` inside an existing clone
//! - **Folder extraction**: recursive merge-copy of `temp_directory/project_name`
//! - **Destination purge**: optionally wipe the destination before copying
//! - **Temp cleanup**: optionally remove the clone once the copy is done
//!
//! ## Quick Start
//!
//! 1. Create a project list (`l1onResources.json`):
//!
//! ```json
//! {
//!   "projects": [
//!     {
//!       "repo_url": "https://github.com/example/resources.git",
//!       "destination_path": "./resources",
//!       "temp_directory": "./.gitwrap-tmp/resources",
//!       "delete_temp_dir_after_done": true,
//!       "project_name": "assets",
//!       "purge_destination_before_copy": false
//!     }
//!   ]
//! }
//! ```
//!
//! 2. Review it, then run:
//!
//! ```bash
//! gitwrap check
//! gitwrap
//! ```
//!
//! Projects are processed one at a time in list order. The first fatal failure stops the run
//! with exit code 1; work already done for earlier projects stays in place.
//!
//! ## Architecture
//!
//! - [`domain`]: Project records
//! - [`application`]: Config loading, clone-or-pull, and the per-project workflow
//! - [`infrastructure`]: Directory utilities, config file access, the git client
//! - [`presentation`]: CLI interface and console output
//! - [`common`]: Shared error handling and templates
//!
//! ## Error Handling
//!
//! - [`common::error::GitwrapError`]: Main error type with detailed context
//! - [`common::result::GitwrapResult`]: Type alias for `Result<T, GitwrapError>`
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use gitwrap::application::services::config_loader::{ConfigLoader, DecodeMode};
//! use gitwrap::application::use_cases::process_projects::ProcessProjectsUseCase;
//! use gitwrap::infrastructure::scm::GitScm;
//!
//! # async fn example() -> gitwrap::Result<()> {
//! let loaded = ConfigLoader::new(DecodeMode::Lenient)
//!     .load("l1onResources.json")
//!     .await?;
//!
//! let use_case = ProcessProjectsUseCase::new(Box::new(GitScm::new()));
//! let summary = use_case.execute(&loaded.projects).await?;
//!
//! println!("Copied {} files", summary.files_copied());
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::GitwrapError;
pub use crate::common::result::GitwrapResult as Result;
