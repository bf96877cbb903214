use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::common::result::ResultExt;
use crate::common::templates::{get_resources_template, CONFIG_FILE_NAME};
use crate::infrastructure::filesystem::config_store::ConfigStore;

/// Write a template project list
pub struct InitCommand {
    /// Directory where to create the file
    pub path: Option<PathBuf>,
    /// Force overwrite existing file
    pub force: bool,
}

impl InitCommand {
    pub fn new(path: Option<PathBuf>, force: bool) -> Self {
        Self { path, force }
    }

    /// Execute the init command
    pub async fn execute(&self) -> Result<()> {
        let target_dir = match &self.path {
            Some(path) => path.clone(),
            None => env::current_dir()
                .with_filesystem_error("Cannot determine the working directory", None)?,
        };
        let target_file = target_dir.join(CONFIG_FILE_NAME);

        let written = ConfigStore::new()
            .write_config(&target_file, get_resources_template(), self.force)
            .await
            .with_config_error(
                "Could not write template (use --force to overwrite)",
                Some(target_file.clone()),
            )?;

        println!("✅ Successfully created {} template file", CONFIG_FILE_NAME);
        println!("📁 Location: {}", written.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the {} file to list your projects", CONFIG_FILE_NAME);
        println!("   2. Run 'gitwrap check' to review the list");
        println!("   3. Run 'gitwrap' to fetch and copy everything");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_template() {
        let temp_dir = TempDir::new().unwrap();
        InitCommand::new(Some(temp_dir.path().to_path_buf()), false)
            .execute()
            .await
            .unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(content, get_resources_template());
    }

    #[tokio::test]
    async fn test_init_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&target, "{}").unwrap();

        let result = InitCommand::new(Some(temp_dir.path().to_path_buf()), false)
            .execute()
            .await;
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");

        InitCommand::new(Some(temp_dir.path().to_path_buf()), true)
            .execute()
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            get_resources_template()
        );
    }
}
