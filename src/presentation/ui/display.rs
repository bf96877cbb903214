use colored::Colorize;
use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::use_cases::process_projects::{
    ProgressListener, ProjectEvent, RunSummary,
};
use crate::domain::entities::project::ProjectConfig;
use crate::infrastructure::filesystem::directory::EnsureOutcome;

/// Display utilities for the CLI interface
pub struct DisplayHelper {
    pub use_color: bool,
    pub verbose: bool,
    pub terminal: Term,
    spinner: Mutex<Option<ProgressBar>>,
}

impl DisplayHelper {
    /// Create a new DisplayHelper
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self {
            use_color,
            verbose,
            terminal: Term::stdout(),
            spinner: Mutex::new(None),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[SUCCESS] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "⚠".yellow().bold(), message);
        } else {
            println!("[WARNING] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "::".blue().bold(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Print a debug message (only if verbose is enabled)
    pub fn debug(&self, message: &str) {
        if self.verbose {
            if self.use_color {
                println!("{} {}", "->".dimmed(), message.dimmed());
            } else {
                println!("[DEBUG] {}", message);
            }
        }
    }

    /// Print a section header
    pub fn section_header(&self, title: &str) {
        if self.use_color {
            println!("\n{}", title.bold().underline());
        } else {
            println!("\n=== {} ===", title);
        }
    }

    /// One-line banner with version and build
    pub fn welcome(&self) {
        let banner = format!(
            "gitwrap {} ({})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_HASH")
        );
        if self.use_color {
            println!("{}", banner.bold());
        } else {
            println!("{}", banner);
        }
    }

    /// Format a file path with appropriate styling
    pub fn format_path(&self, path: &str) -> String {
        if self.use_color {
            path.cyan().to_string()
        } else {
            format!("'{}'", path)
        }
    }

    /// Format a URL with appropriate styling
    pub fn format_url(&self, url: &str) -> String {
        if self.use_color {
            url.blue().underline().to_string()
        } else {
            url.to_string()
        }
    }

    /// Format a project name with appropriate styling
    pub fn format_project(&self, name: &str) -> String {
        if self.use_color {
            name.cyan().bold().to_string()
        } else {
            name.to_string()
        }
    }

    /// Create a spinner for indeterminate operations
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = if self.use_color && self.terminal.is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        };

        if self.use_color {
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_strings(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈", "✓"])
                .template("{spinner:.green} {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(120));
        }

        pb
    }

    /// Print an indented message
    pub fn print_indented(&self, message: &str, level: usize) {
        let indent = "  ".repeat(level);
        println!("{}{}", indent, message);
    }

    /// Format a duration in human-readable format
    pub fn format_duration(&self, duration: Duration) -> String {
        let secs = duration.as_secs();
        let millis = duration.subsec_millis();

        if secs > 60 {
            let mins = secs / 60;
            let remaining_secs = secs % 60;
            format!("{}m {}s", mins, remaining_secs)
        } else if secs > 0 {
            format!("{}.{}s", secs, millis / 100)
        } else {
            format!("{}ms", millis)
        }
    }

    /// Print a summary box
    pub fn print_summary(&self, title: &str, items: &[(String, String)]) {
        if self.use_color {
            println!("\n┌─ {} ─┐", title.bold());
            for (key, value) in items {
                println!("│ {}: {}", key.bold(), value);
            }
            println!("└{:─<width$}┘", "", width = title.len() + 4);
        } else {
            println!("\n=== {} ===", title);
            for (key, value) in items {
                println!("{}: {}", key, value);
            }
            println!("{}", "=".repeat(title.len() + 8));
        }
    }

    /// Print the run summary
    pub fn print_run_summary(&self, summary: &RunSummary) {
        let elapsed = summary.elapsed().to_std().unwrap_or_default();
        let items = vec![
            (
                "Projects".to_string(),
                summary.processed_count().to_string(),
            ),
            ("Cloned".to_string(), summary.cloned_count().to_string()),
            ("Pulled".to_string(), summary.pulled_count().to_string()),
            ("Files copied".to_string(), summary.files_copied().to_string()),
            ("Warnings".to_string(), summary.warnings.len().to_string()),
            ("Elapsed".to_string(), self.format_duration(elapsed)),
            (
                "Started".to_string(),
                summary.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ),
        ];
        self.print_summary("Summary", &items);
    }

    fn start_spinner(&self, message: &str) {
        let pb = self.create_spinner(message);
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressListener for DisplayHelper {
    fn on_event(&self, event: &ProjectEvent<'_>) {
        match event {
            ProjectEvent::ProjectStarted {
                index,
                total,
                project,
            } => {
                self.section_header(&format!(
                    "[{}/{}] {}",
                    index + 1,
                    total,
                    project.display_name()
                ));
                if self.verbose {
                    for (key, value) in project_fields(project) {
                        self.print_indented(&format!("{:<30} {}", key, value), 1);
                    }
                }
            }
            ProjectEvent::TempDirectoryReady { path, outcome } => {
                let verb = match outcome {
                    EnsureOutcome::Created => "Created",
                    EnsureOutcome::AlreadyExists => "Using",
                };
                self.debug(&format!(
                    "{} temp directory {}",
                    verb,
                    self.format_path(&path.display().to_string())
                ));
            }
            ProjectEvent::FetchStarted { url, target } => {
                self.info(&format!(
                    "Fetching {} into {}",
                    self.format_url(url),
                    self.format_path(&target.display().to_string())
                ));
                self.start_spinner("Running git...");
            }
            ProjectEvent::FetchFinished { strategy } => {
                self.stop_spinner();
                if let Some(strategy) = strategy {
                    self.success(&format!("Repository {}", strategy));
                }
            }
            ProjectEvent::SourceRootResolved { path } => {
                self.debug(&format!(
                    "Copy source {}",
                    self.format_path(&path.display().to_string())
                ));
            }
            ProjectEvent::DestinationCreated { path } => {
                self.debug(&format!(
                    "Created destination {}",
                    self.format_path(&path.display().to_string())
                ));
            }
            ProjectEvent::DestinationCreateFailed { path, error } => {
                self.warning(&format!(
                    "Could not create {}: {}",
                    self.format_path(&path.display().to_string()),
                    error
                ));
            }
            ProjectEvent::DestinationPurged { path } => {
                self.info(&format!(
                    "Purged {}",
                    self.format_path(&path.display().to_string())
                ));
            }
            ProjectEvent::Copied { from, to, stats } => {
                self.success(&format!(
                    "Copied {} file(s) to {}",
                    stats.files,
                    self.format_path(&to.display().to_string())
                ));
                self.debug(&format!(
                    "from {} ({} directories, {} symlinks)",
                    from.display(),
                    stats.directories,
                    stats.symlinks
                ));
            }
            ProjectEvent::TempDirectoryRemoved { path } => {
                self.debug(&format!(
                    "Removed temp directory {}",
                    self.format_path(&path.display().to_string())
                ));
            }
            ProjectEvent::TempDirectoryKept { path } => {
                self.debug(&format!(
                    "Keeping temp directory {}",
                    self.format_path(&path.display().to_string())
                ));
            }
            ProjectEvent::CleanupFailed { path, error } => {
                self.warning(&format!(
                    "Could not remove {}: {}",
                    self.format_path(&path.display().to_string()),
                    error
                ));
            }
            ProjectEvent::ProjectFinished { name } => {
                self.success(&format!("{} done", self.format_project(name)));
            }
        }
    }
}

/// Every field of a project entry, keyed by its name in the project list
pub fn project_fields(project: &ProjectConfig) -> Vec<(&'static str, String)> {
    vec![
        ("repo_url", project.repo_url.clone()),
        ("destination_path", project.destination_path.clone()),
        ("temp_directory", project.temp_directory.clone()),
        (
            "delete_temp_dir_after_done",
            project.delete_temp_dir_after_done.to_string(),
        ),
        ("project_name", project.project_name.clone()),
        (
            "purge_destination_before_copy",
            project.purge_destination_before_copy.to_string(),
        ),
    ]
}

/// Helper functions for common display patterns
pub mod helpers {
    use super::*;

    /// Create a display helper with color detection
    pub fn auto_display(no_color: bool, verbose: bool) -> DisplayHelper {
        let use_color =
            !no_color && Term::stdout().is_term() && std::env::var_os("NO_COLOR").is_none();
        DisplayHelper::new(use_color, verbose)
    }
}
