pub mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;

use crate::application::services::config_loader::DecodeMode;
use crate::common::result::ResultExt;
use crate::common::templates::CONFIG_FILE_NAME;
use crate::presentation::ui::display::{helpers, DisplayHelper};

use commands::{CheckCommand, InitCommand, RunCommand};

/// gitwrap - Pull resource folders out of git repositories
#[derive(Debug, Parser)]
#[command(name = "gitwrap")]
#[command(about = "Clone or update repositories and copy a folder out of each into place")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project list to read
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Reject project entries with mismatched or empty fields
    #[arg(long, global = true)]
    pub strict: bool,

    /// Git executable to run
    #[arg(long, global = true, env = "GITWRAP_GIT", default_value = "git")]
    pub git: String,

    /// Skip the version header
    #[arg(long, global = true)]
    pub no_banner: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Process every project in the list (default)
    Run,

    /// Show the decoded project list and check git, without touching anything
    Check,

    /// Write a template project list
    Init {
        /// Directory where to create the file (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config_path: PathBuf,
    pub verbose: bool,
    pub no_color: bool,
    pub decode_mode: DecodeMode,
    pub git_executable: String,
    pub show_banner: bool,
}

impl RunSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            verbose: cli.verbose,
            no_color: cli.no_color,
            decode_mode: if cli.strict {
                DecodeMode::Strict
            } else {
                DecodeMode::Lenient
            },
            git_executable: cli.git.clone(),
            show_banner: !cli.no_banner,
        }
    }

    pub fn display(&self) -> DisplayHelper {
        helpers::auto_display(self.no_color, self.verbose)
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        // Set up colored output
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        // Change directory if specified
        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir).with_filesystem_error(
                format!("Cannot change to directory '{}'", dir),
                Some(PathBuf::from(dir)),
            )?;
        }

        let settings = RunSettings::from_cli(&self.cli);

        match &self.cli.command {
            None | Some(Commands::Run) => RunCommand::new(settings).execute().await.map(|_| ()),
            Some(Commands::Check) => CheckCommand::new(settings).execute().await,
            Some(Commands::Init { path, force }) => {
                InitCommand::new(path.clone(), *force).execute().await
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
