use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs as async_fs;
use tracing::debug;

/// Configuration store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file not found at path: {0}")]
    ConfigFileNotFound(String),

    #[error("Configuration file read failed: {0}")]
    ReadFailed(String),

    #[error("Configuration file already exists: {0}")]
    AlreadyExists(String),

    #[error("Configuration file write failed: {0}")]
    WriteFailed(String),

    #[error("Configuration directory creation failed: {0}")]
    DirectoryCreationFailed(String),
}

/// Reads and writes the resource list file
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Read the whole file as text
    pub async fn read_config<P: AsRef<Path>>(
        &self,
        config_path: P,
    ) -> Result<String, ConfigStoreError> {
        let config_path = config_path.as_ref();

        let bytes = async_fs::read(config_path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ConfigStoreError::ConfigFileNotFound(config_path.display().to_string())
            } else {
                ConfigStoreError::ReadFailed(format!("{}: {}", config_path.display(), e))
            }
        })?;

        debug!(
            "Read {} bytes from {}",
            bytes.len(),
            config_path.display()
        );
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write `content` to `config_path`, refusing to replace an existing file unless `force`
    pub async fn write_config<P: AsRef<Path>>(
        &self,
        config_path: P,
        content: &str,
        force: bool,
    ) -> Result<PathBuf, ConfigStoreError> {
        let config_path = config_path.as_ref();

        if config_path.exists() && !force {
            return Err(ConfigStoreError::AlreadyExists(
                config_path.display().to_string(),
            ));
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                async_fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ConfigStoreError::DirectoryCreationFailed(e.to_string()))?;
            }
        }

        async_fs::write(config_path, content)
            .await
            .map_err(|e| ConfigStoreError::WriteFailed(e.to_string()))?;

        Ok(config_path.to_path_buf())
    }
}
