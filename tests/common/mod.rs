//! Common test utilities and helpers
//!
//! Each test gets a scratch directory holding a fake `git`, some "remote" repositories
//! (plain directories) and the project list. The binary runs with that directory as cwd.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for the git client.
///
/// `clone SRC DST` copies the SRC directory and leaves a marker; `pull` succeeds only inside a
/// directory carrying that marker and records that it ran.
const FAKE_GIT: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "git version 2.99.0 (fake)"
    exit 0
    ;;
  clone)
    src="$2"
    dst="$3"
    if [ -d "$dst" ] && [ -n "$(ls -A "$dst")" ]; then
      echo "fatal: destination path '$dst' already exists and is not an empty directory." >&2
      exit 128
    fi
    if [ ! -d "$src" ]; then
      echo "fatal: repository '$src' does not exist" >&2
      exit 128
    fi
    mkdir -p "$dst" && cp -R "$src/." "$dst/" && touch "$dst/.fake-git"
    exit $?
    ;;
  pull)
    if [ -f .fake-git ]; then
      touch .fake-git-pulled
      exit 0
    fi
    echo "fatal: not a git repository (or any of the parent directories): .git" >&2
    exit 128
    ;;
esac
echo "unsupported: $*" >&2
exit 1
"#;

pub struct TestEnv {
    pub dir: TempDir,
    pub git: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let git = dir.path().join("bin").join("git");
        fs::create_dir_all(git.parent().unwrap()).unwrap();
        fs::write(&git, FAKE_GIT).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&git, fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self { dir, git }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Create a "remote" repository containing the given files
    pub fn remote(&self, name: &str, files: &[(&str, &str)]) -> String {
        let repo = self.path("remotes").join(name);
        for (relative, content) in files {
            write_file(&repo.join(relative), content);
        }
        repo.display().to_string()
    }

    /// URL of a remote that does not exist
    pub fn missing_remote(&self, name: &str) -> String {
        self.path("remotes").join(name).display().to_string()
    }

    pub fn write_config(&self, json: &str) {
        fs::write(self.path("l1onResources.json"), json).unwrap();
    }

    /// The binary, run inside the scratch directory against the fake git
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("gitwrap").unwrap();
        cmd.current_dir(self.root())
            .env("GITWRAP_GIT", &self.git)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .args(["--no-color", "--no-banner"]);
        cmd
    }
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// One entry of the project list
pub fn project_json(
    repo_url: &str,
    destination: &str,
    temp: &str,
    project_name: &str,
    delete_temp: bool,
    purge: bool,
) -> String {
    serde_json::json!({
        "repo_url": repo_url,
        "destination_path": destination,
        "temp_directory": temp,
        "delete_temp_dir_after_done": delete_temp,
        "project_name": project_name,
        "purge_destination_before_copy": purge,
    })
    .to_string()
}

pub fn config_json(projects: &[String]) -> String {
    format!("{{\"projects\": [{}]}}", projects.join(","))
}

/// Sorted relative paths of every entry under `dir`
pub fn list_tree(dir: &Path) -> Vec<String> {
    let mut entries: Vec<String> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .display()
                .to_string()
        })
        .collect();
    entries.sort();
    entries
}
