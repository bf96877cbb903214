use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::application::services::config_loader::{ConfigLoader, LoadedConfig};
use crate::application::use_cases::process_projects::{ProcessProjectsUseCase, RunSummary};
use crate::common::error::GitwrapError;
use crate::infrastructure::scm::GitScm;
use crate::presentation::cli::RunSettings;
use crate::presentation::ui::display::DisplayHelper;

/// Process every project in the list
pub struct RunCommand {
    pub settings: RunSettings,
}

impl RunCommand {
    pub fn new(settings: RunSettings) -> Self {
        Self { settings }
    }

    /// Execute the run command
    pub async fn execute(&self) -> Result<RunSummary> {
        let display = Arc::new(self.settings.display());
        if self.settings.show_banner {
            display.welcome();
        }

        let loaded = load_project_list(&self.settings, &display).await?;

        debug!(
            "Running {} project(s) with git executable '{}'",
            loaded.projects.len(),
            self.settings.git_executable
        );

        let scm = GitScm::with_executable(&self.settings.git_executable);
        let use_case = ProcessProjectsUseCase::new(Box::new(scm)).with_listener(display.clone());
        let summary = use_case
            .execute(&loaded.projects)
            .await
            .map_err(GitwrapError::from)?;

        for warning in &summary.warnings {
            display.warning(warning);
        }
        if self.settings.verbose {
            display.print_run_summary(&summary);
        }
        display.success(&format!(
            "All {} project(s) processed",
            summary.processed_count()
        ));

        Ok(summary)
    }
}

/// Load the project list, print decode warnings, and refuse an empty list
pub(crate) async fn load_project_list(
    settings: &RunSettings,
    display: &DisplayHelper,
) -> Result<LoadedConfig> {
    let loaded = match ConfigLoader::new(settings.decode_mode)
        .load(&settings.config_path)
        .await
    {
        Ok(loaded) => loaded,
        Err(e) => {
            if e.is_not_found() {
                display.info(&format!(
                    "{} must be in the working directory (or pass --config); 'gitwrap init' writes a template",
                    settings.config_path.display()
                ));
            }
            return Err(GitwrapError::from(e).into());
        }
    };

    for warning in &loaded.warnings {
        display.warning(warning);
    }

    if loaded.projects.is_empty() {
        return Err(GitwrapError::config_error(
            format!("No projects found in {}", loaded.path.display()),
            Some(loaded.path.clone()),
        )
        .into());
    }

    Ok(loaded)
}
