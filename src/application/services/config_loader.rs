use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use validator::Validate;

use crate::domain::entities::project::{ProjectConfig, ProjectList};
use crate::infrastructure::filesystem::config_store::{ConfigStore, ConfigStoreError};

/// Errors raised while loading the resource list
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file {} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: ConfigStoreError,
    },

    #[error("Config file {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Project #{index} in {} is invalid: {message}", .path.display())]
    Invalid {
        path: PathBuf,
        index: usize,
        message: String,
    },
}

impl ConfigLoadError {
    pub fn file_path(&self) -> &Path {
        match self {
            Self::Unreadable { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => {
                path
            }
        }
    }

    /// True when the file is simply absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Unreadable {
                source: ConfigStoreError::ConfigFileNotFound(_),
                ..
            }
        )
    }
}

/// How the JSON document is decoded into project records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Fields that are missing or of the wrong type fall back to empty / false.
    /// A document that is not JSON at all yields an empty list.
    #[default]
    Lenient,
    /// Typed decoding; type mismatches and empty required paths are errors
    Strict,
}

/// Result of a load: the projects plus anything that was silently defaulted
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub projects: ProjectList,
    pub warnings: Vec<String>,
}

/// Loads the resource list from disk
pub struct ConfigLoader {
    store: ConfigStore,
    mode: DecodeMode,
}

impl ConfigLoader {
    pub fn new(mode: DecodeMode) -> Self {
        Self {
            store: ConfigStore::new(),
            mode,
        }
    }

    /// Read and decode the file at `path`.
    ///
    /// An unreadable file is an error. In lenient mode an unparseable document is not: it
    /// produces an empty project list plus a warning, and the caller decides what an empty
    /// list means.
    pub async fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedConfig, ConfigLoadError> {
        let path = path.as_ref();

        let text = self
            .store
            .read_config(path)
            .await
            .map_err(|source| ConfigLoadError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let (projects, warnings) = match self.mode {
            DecodeMode::Lenient => decode_lenient(&text),
            DecodeMode::Strict => (decode_strict(&text, path)?, Vec::new()),
        };

        for warning in &warnings {
            warn!("{}: {}", path.display(), warning);
        }
        debug!(
            "Loaded {} project(s) from {}",
            projects.len(),
            path.display()
        );

        Ok(LoadedConfig {
            path: path.to_path_buf(),
            projects,
            warnings,
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DecodeMode::default())
    }
}

fn decode_strict(text: &str, path: &Path) -> Result<ProjectList, ConfigLoadError> {
    let list: ProjectList = serde_json::from_str(text).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, project) in list.iter().enumerate() {
        project
            .validate()
            .map_err(|errors| ConfigLoadError::Invalid {
                path: path.to_path_buf(),
                index,
                message: errors.to_string(),
            })?;
    }

    Ok(list)
}

/// Field-by-field best-effort decoding
pub fn decode_lenient(text: &str) -> (ProjectList, Vec<String>) {
    let mut warnings = Vec::new();

    let document: Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => {
            warnings.push(format!("document is not valid JSON ({e}), no projects loaded"));
            return (ProjectList::default(), warnings);
        }
    };

    let Some(root) = document.as_object() else {
        warnings.push("top-level value is not an object, no projects loaded".to_string());
        return (ProjectList::default(), warnings);
    };

    let entries = match lookup(root, "projects") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return (ProjectList::default(), warnings),
        Some(_) => {
            warnings.push("\"projects\" is not an array, no projects loaded".to_string());
            return (ProjectList::default(), warnings);
        }
    };

    let projects = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| decode_project(index, entry, &mut warnings))
        .collect();

    (ProjectList::new(projects), warnings)
}

fn decode_project(index: usize, entry: &Value, warnings: &mut Vec<String>) -> ProjectConfig {
    let Some(fields) = entry.as_object() else {
        if !entry.is_null() {
            warnings.push(format!("projects[{index}] is not an object, using empty values"));
        }
        return ProjectConfig::default();
    };

    let mut text = |key: &str| -> String {
        match lookup(fields, key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(_) => {
                warnings.push(format!("projects[{index}].{key} is not a string, using \"\""));
                String::new()
            }
        }
    };
    let repo_url = text("repo_url");
    let destination_path = text("destination_path");
    let temp_directory = text("temp_directory");
    let project_name = text("project_name");

    let mut flag = |key: &str| -> bool {
        match lookup(fields, key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Null) | None => false,
            Some(_) => {
                warnings.push(format!("projects[{index}].{key} is not a boolean, using false"));
                false
            }
        }
    };
    let delete_temp_dir_after_done = flag("delete_temp_dir_after_done");
    let purge_destination_before_copy = flag("purge_destination_before_copy");

    ProjectConfig {
        repo_url,
        destination_path,
        temp_directory,
        delete_temp_dir_after_done,
        project_name,
        purge_destination_before_copy,
    }
}

/// Exact key first, then a case-insensitive match
fn lookup<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).or_else(|| {
        fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}
