use super::scm_interface::{ScmError, ScmOperations};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Git implementation of SCM operations, driving the `git` command-line client
pub struct GitScm {
    git_executable: String,
}

impl Default for GitScm {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl GitScm {
    /// Create a new Git SCM instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Git SCM instance with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
        }
    }

    /// Execute a git command, optionally inside `working_dir`.
    ///
    /// The working directory is handed to the child process only; the caller's own
    /// current directory is never touched.
    async fn execute_git_command(
        &self,
        args: &[&OsStr],
        working_dir: Option<&Path>,
    ) -> Result<std::process::Output, ScmError> {
        let mut cmd = Command::new(&self.git_executable);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            "Running {} {} (in {})",
            self.git_executable,
            display_args(args),
            working_dir
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        );

        cmd.output().await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound && working_dir.map_or(true, |d| d.is_dir()) {
                ScmError::executable_not_found(&self.git_executable)
            } else {
                ScmError::from(e)
            }
        })
    }

    /// Execute a git command and turn a non-zero exit into `CommandFailed`
    async fn execute_git_command_checked(
        &self,
        args: &[&OsStr],
        working_dir: Option<&Path>,
    ) -> Result<(), ScmError> {
        let output = self.execute_git_command(args, working_dir).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let command = format!("{} {}", self.git_executable, display_args(args));
            return Err(ScmError::command_failed(
                command,
                output.status.code().unwrap_or(-1),
                stderr,
            ));
        }

        Ok(())
    }
}

fn display_args(args: &[&OsStr]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl ScmOperations for GitScm {
    async fn clone_repository(&self, url: &str, dest_path: &Path) -> Result<(), ScmError> {
        let args = [OsStr::new("clone"), OsStr::new(url), dest_path.as_os_str()];
        self.execute_git_command_checked(&args, None)
            .await
            .map_err(|e| match e {
                ScmError::CommandFailed { stderr, .. } => {
                    ScmError::clone_failed(format!("git clone {} failed: {}", url, stderr))
                }
                other => other,
            })
    }

    async fn pull_repository(&self, repo_path: &Path) -> Result<(), ScmError> {
        if !repo_path.is_dir() {
            warn!("Cannot pull, {} is not a directory", repo_path.display());
            return Err(ScmError::InvalidPath {
                path: repo_path.display().to_string(),
            });
        }

        self.execute_git_command_checked(&[OsStr::new("pull")], Some(repo_path))
            .await
            .map_err(|e| match e {
                ScmError::CommandFailed { stderr, .. } => ScmError::pull_failed(format!(
                    "git pull in {} failed: {}",
                    repo_path.display(),
                    stderr
                )),
                other => other,
            })
    }

    async fn check_availability(&self) -> Result<String, ScmError> {
        let output = Command::new(&self.git_executable)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|_| ScmError::executable_not_found(&self.git_executable))?;

        if !output.status.success() {
            return Err(ScmError::executable_not_found(&self.git_executable));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn executable(&self) -> &str {
        &self.git_executable
    }
}
