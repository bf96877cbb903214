use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::infrastructure::scm::{ScmError, ScmOperations};

/// Which strategy brought the target directory up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    Cloned,
    Pulled,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloned => write!(f, "cloned"),
            Self::Pulled => write!(f, "pulled"),
        }
    }
}

/// Both strategies failed
#[derive(Debug, Error)]
#[error(
    "could not fetch {url} into {}: clone failed ({clone_error}); pull failed ({pull_error})",
    .target.display()
)]
pub struct FetchError {
    pub url: String,
    pub target: PathBuf,
    pub clone_error: ScmError,
    #[source]
    pub pull_error: ScmError,
}

/// Makes a target directory reflect the latest state of a source repository.
///
/// A full clone is tried first. Any clone failure, including "destination already contains
/// a repository", falls back to a pull inside the target. There is no further retry and a
/// half-finished clone is left as it is.
pub struct RepositoryFetcher<'a> {
    scm: &'a dyn ScmOperations,
}

impl<'a> RepositoryFetcher<'a> {
    pub fn new(scm: &'a dyn ScmOperations) -> Self {
        Self { scm }
    }

    pub async fn clone_or_update(
        &self,
        url: &str,
        target: &Path,
    ) -> Result<FetchStrategy, FetchError> {
        info!("Cloning {} into {}", url, target.display());

        let clone_error = match self.scm.clone_repository(url, target).await {
            Ok(()) => return Ok(FetchStrategy::Cloned),
            Err(e) => e,
        };

        info!(
            "Clone failed ({}), trying git pull in {} instead",
            clone_error,
            target.display()
        );

        match self.scm.pull_repository(target).await {
            Ok(()) => Ok(FetchStrategy::Pulled),
            Err(pull_error) => {
                warn!("Pull in {} failed: {}", target.display(), pull_error);
                Err(FetchError {
                    url: url.to_string(),
                    target: target.to_path_buf(),
                    clone_error,
                    pull_error,
                })
            }
        }
    }
}
