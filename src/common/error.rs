use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::config_loader::ConfigLoadError;
use crate::application::use_cases::process_projects::ProcessProjectsError;
use crate::infrastructure::scm::ScmError;

#[derive(Error, Debug)]
pub enum GitwrapError {
    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        file_path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Repository operation failed: {message}")]
    RepositoryError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Command execution failed: {message}")]
    CommandError {
        message: String,
        command: String,
        exit_code: Option<i32>,
    },

    #[error("Project '{project}' failed: {message}")]
    ProjectError {
        project: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GitwrapError {
    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error(message: impl Into<String>, file_path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            file_path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        file_path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            file_path,
            source: Some(Box::new(source)),
        }
    }

    pub fn repository_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RepositoryError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn command_error(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            exit_code,
        }
    }

    pub fn project_error_with_source(
        project: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ProjectError {
            project: project.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InternalError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<ConfigLoadError> for GitwrapError {
    fn from(error: ConfigLoadError) -> Self {
        let file_path = Some(error.file_path().to_path_buf());
        Self::config_error_with_source("Failed to load project list", file_path, error)
    }
}

impl From<ScmError> for GitwrapError {
    fn from(error: ScmError) -> Self {
        match error {
            ScmError::CommandFailed {
                command, exit_code, ..
            } => Self::command_error("Git command exited unsuccessfully", command, Some(exit_code)),
            other => Self::repository_error_with_source("Git operation failed", other),
        }
    }
}

impl From<ProcessProjectsError> for GitwrapError {
    fn from(error: ProcessProjectsError) -> Self {
        match error.project_name().map(str::to_string) {
            Some(project) => Self::project_error_with_source(project, "Run aborted", error),
            None => Self::internal_error_with_source("Run aborted", error),
        }
    }
}
