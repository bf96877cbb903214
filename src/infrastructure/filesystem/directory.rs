use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs as async_fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Directory operation errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Invalid directory path: '{}'", .path.display())]
    InvalidPath { path: PathBuf },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to delete {}: {source}", .path.display())]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Copy source does not exist: {}", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", .path.display())]
    WalkFailed {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Background copy of {} did not finish: {message}", .path.display())]
    TaskFailed { path: PathBuf, message: String },
}

/// What `ensure_directory` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

/// What `delete_recursive` found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotFound,
}

/// Counters reported by `copy_recursive`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub directories: usize,
    pub symlinks: usize,
}

/// True iff something is observable at `path`.
///
/// A missing entry, or a path running through a regular file, is absent. Other errors
/// (permission denied on a parent, for instance) count as existing, so callers never try to
/// create over an entry they merely cannot stat.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    match std::fs::metadata(path.as_ref()) {
        Ok(_) => true,
        Err(e) => !matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory),
    }
}

/// Create `path` and any missing parents. An existing entry is success even if it is a file.
pub async fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<EnsureOutcome, DirectoryError> {
    let path = path.as_ref();

    if path.as_os_str().is_empty() {
        return Err(DirectoryError::InvalidPath {
            path: path.to_path_buf(),
        });
    }

    if exists(path) {
        debug!("Directory already present: {}", path.display());
        return Ok(EnsureOutcome::AlreadyExists);
    }

    async_fs::create_dir_all(path)
        .await
        .map_err(|source| DirectoryError::CreateFailed {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Created directory: {}", path.display());
    Ok(EnsureOutcome::Created)
}

/// Remove `path` and everything below it. A missing path is success.
pub async fn delete_recursive<P: AsRef<Path>>(path: P) -> Result<DeleteOutcome, DirectoryError> {
    let path = path.as_ref();

    let metadata = match async_fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Nothing to delete at {}", path.display());
            return Ok(DeleteOutcome::NotFound);
        }
        Err(source) => {
            return Err(DirectoryError::DeleteFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let result = if metadata.is_dir() {
        async_fs::remove_dir_all(path).await
    } else {
        async_fs::remove_file(path).await
    };

    match result {
        Ok(()) => {
            info!("Deleted {}", path.display());
            Ok(DeleteOutcome::Removed)
        }
        // Raced with another remover
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
        Err(source) => Err(DirectoryError::DeleteFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Copy the tree under `source` into `destination`, merging with what is already there.
///
/// Existing files are overwritten, other existing entries are left alone. If `source` is a
/// single file it is copied to `destination` as a file. An empty `destination` is rejected
/// rather than resolved against the working directory.
pub async fn copy_recursive<P, Q>(source: P, destination: Q) -> Result<CopyStats, DirectoryError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref().to_path_buf();
    let destination = destination.as_ref().to_path_buf();

    if destination.as_os_str().is_empty() {
        return Err(DirectoryError::InvalidPath { path: destination });
    }

    let task_path = source.clone();

    tokio::task::spawn_blocking(move || copy_tree(&source, &destination))
        .await
        .map_err(|e| DirectoryError::TaskFailed {
            path: task_path,
            message: e.to_string(),
        })?
}

fn copy_tree(source: &Path, destination: &Path) -> Result<CopyStats, DirectoryError> {
    if !exists(source) {
        return Err(DirectoryError::SourceMissing {
            path: source.to_path_buf(),
        });
    }

    let mut stats = CopyStats::default();

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| DirectoryError::WalkFailed {
            path: source.to_path_buf(),
            source: e,
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| DirectoryError::InvalidPath {
                path: entry.path().to_path_buf(),
            })?;
        let target = if relative.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| DirectoryError::CreateFailed {
                path: target.clone(),
                source: e,
            })?;
            stats.directories += 1;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            stats.symlinks += 1;
        } else {
            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() && !exists(parent) {
                    std::fs::create_dir_all(parent).map_err(|e| DirectoryError::CreateFailed {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
            }
            std::fs::copy(entry.path(), &target).map_err(|e| DirectoryError::CopyFailed {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source: e,
            })?;
            stats.files += 1;
        }
    }

    debug!(
        "Copied {} files, {} directories, {} symlinks from {} to {}",
        stats.files,
        stats.directories,
        stats.symlinks,
        source.display(),
        destination.display()
    );
    Ok(stats)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<(), DirectoryError> {
    let copy_failed = |e: std::io::Error| DirectoryError::CopyFailed {
        from: link.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    };

    let pointee = std::fs::read_link(link).map_err(copy_failed)?;
    if std::fs::symlink_metadata(target).is_ok() {
        std::fs::remove_file(target).map_err(copy_failed)?;
    }
    std::os::unix::fs::symlink(pointee, target).map_err(copy_failed)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<(), DirectoryError> {
    std::fs::copy(link, target)
        .map(|_| ())
        .map_err(|e| DirectoryError::CopyFailed {
            from: link.to_path_buf(),
            to: target.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        assert!(exists(temp_dir.path()));
        assert!(!exists(temp_dir.path().join("missing")));

        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(exists(&file));
        assert!(!exists(file.join("below")));
    }

    #[tokio::test]
    async fn test_ensure_directory_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b").join("c");

        let first = ensure_directory(&target).await.unwrap();
        assert_eq!(first, EnsureOutcome::Created);
        assert!(target.is_dir());

        let second = ensure_directory(&target).await.unwrap();
        assert_eq!(second, EnsureOutcome::AlreadyExists);
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_directory_accepts_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let outcome = ensure_directory(&file).await.unwrap();
        assert_eq!(outcome, EnsureOutcome::AlreadyExists);
        assert!(file.is_file());
    }

    #[tokio::test]
    async fn test_ensure_directory_rejects_empty_path() {
        let result = ensure_directory("").await;
        assert!(matches!(result, Err(DirectoryError::InvalidPath { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ensure_directory_below_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file");
        std::fs::write(&file, "x").unwrap();

        let result = ensure_directory(file.join("child")).await;
        assert!(matches!(result, Err(DirectoryError::CreateFailed { .. })));
    }

    #[tokio::test]
    async fn test_delete_recursive_missing_path_is_success() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("never-created");

        let outcome = delete_recursive(&missing).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
        let outcome = delete_recursive(&missing).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_delete_recursive_removes_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        std::fs::create_dir_all(root.join("nested/deeper")).unwrap();
        std::fs::write(root.join("nested/deeper/file.txt"), "content").unwrap();
        std::fs::write(root.join("top.txt"), "content").unwrap();

        let outcome = delete_recursive(&root).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Removed);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_delete_recursive_removes_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("single.txt");
        std::fs::write(&file, "content").unwrap();

        assert_eq!(delete_recursive(&file).await.unwrap(), DeleteOutcome::Removed);
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_copy_recursive_copies_tree() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        std::fs::create_dir_all(source.join("sub/inner")).unwrap();
        std::fs::write(source.join("root.txt"), "root").unwrap();
        std::fs::write(source.join("sub/inner/leaf.txt"), "leaf").unwrap();

        let stats = copy_recursive(&source, &dest).await.unwrap();

        assert_eq!(stats.files, 2);
        // source root, sub and sub/inner
        assert_eq!(stats.directories, 3);
        assert_eq!(std::fs::read_to_string(dest.join("root.txt")).unwrap(), "root");
        assert_eq!(
            std::fs::read_to_string(dest.join("sub/inner/leaf.txt")).unwrap(),
            "leaf"
        );
    }

    #[tokio::test]
    async fn test_copy_recursive_merges_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(source.join("shared.txt"), "new").unwrap();
        std::fs::write(dest.join("shared.txt"), "old").unwrap();
        std::fs::write(dest.join("keep.txt"), "untouched").unwrap();

        copy_recursive(&source, &dest).await.unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("shared.txt")).unwrap(), "new");
        assert_eq!(
            std::fs::read_to_string(dest.join("keep.txt")).unwrap(),
            "untouched"
        );
    }

    #[tokio::test]
    async fn test_copy_recursive_rejects_empty_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("spilled.txt"), "x").unwrap();

        let result = copy_recursive(&source, "").await;

        assert!(matches!(result, Err(DirectoryError::InvalidPath { .. })));
        assert!(!Path::new("spilled.txt").exists());
    }

    #[tokio::test]
    async fn test_copy_recursive_onto_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("a.txt"), "a").unwrap();
        std::fs::write(&dest, "occupied").unwrap();

        let result = copy_recursive(&source, &dest).await;

        assert!(matches!(result, Err(DirectoryError::CreateFailed { .. })));
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "occupied");
    }

    #[tokio::test]
    async fn test_copy_recursive_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let result = copy_recursive(temp_dir.path().join("nope"), temp_dir.path().join("dest")).await;

        assert!(matches!(result, Err(DirectoryError::SourceMissing { .. })));
        assert!(!temp_dir.path().join("dest").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_recursive_recreates_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("real.txt"), "real").unwrap();
        std::os::unix::fs::symlink("real.txt", source.join("link.txt")).unwrap();

        let stats = copy_recursive(&source, &dest).await.unwrap();

        assert_eq!(stats.symlinks, 1);
        let link = dest.join("link.txt");
        assert!(link.is_symlink());
        assert_eq!(std::fs::read_link(&link).unwrap(), Path::new("real.txt"));
        assert_eq!(std::fs::read_to_string(&link).unwrap(), "real");
    }
}
