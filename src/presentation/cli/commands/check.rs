use anyhow::Result;

use crate::common::error::GitwrapError;
use crate::infrastructure::filesystem::directory;
use crate::infrastructure::scm::{GitScm, ScmOperations};
use crate::presentation::cli::RunSettings;

use super::run::load_project_list;

/// Show what a run would do, without doing it
pub struct CheckCommand {
    pub settings: RunSettings,
}

impl CheckCommand {
    pub fn new(settings: RunSettings) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<()> {
        let display = self.settings.display();
        if self.settings.show_banner {
            display.welcome();
        }

        let loaded = load_project_list(&self.settings, &display).await?;

        display.section_header(&format!(
            "{} project(s) in {}",
            loaded.projects.len(),
            loaded.path.display()
        ));

        for (index, project) in loaded.projects.iter().enumerate() {
            display.info(&format!(
                "[{}] {}",
                index + 1,
                display.format_project(project.display_name())
            ));
            display.print_indented(&format!("repository:  {}", display.format_url(&project.repo_url)), 2);
            display.print_indented(&format!("source:      {}", project.source_root().display()), 2);
            display.print_indented(
                &format!(
                    "destination: {}{}",
                    project.destination_path,
                    if directory::exists(project.destination_dir()) {
                        ""
                    } else {
                        " (will be created)"
                    }
                ),
                2,
            );

            let mut flags = Vec::new();
            if project.purge_destination_before_copy {
                flags.push("purge destination");
            }
            if project.delete_temp_dir_after_done {
                flags.push("delete temp");
            }
            if !flags.is_empty() {
                display.print_indented(&format!("options:     {}", flags.join(", ")), 2);
            }
        }

        let scm = GitScm::with_executable(&self.settings.git_executable);
        let version = scm.check_availability().await.map_err(GitwrapError::from)?;
        display.success(&format!("{} ({})", version, scm.executable()));

        Ok(())
    }
}
