use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::services::repository_fetcher::{
    FetchError, FetchStrategy, RepositoryFetcher,
};
use crate::domain::entities::project::{ProjectConfig, ProjectList};
use crate::infrastructure::filesystem::directory::{
    self, CopyStats, DeleteOutcome, DirectoryError, EnsureOutcome,
};
use crate::infrastructure::scm::ScmOperations;

/// ProcessProjects関連のエラー
///
/// どのエラーも実行全体を中断する。残りのプロジェクトは処理されない。
#[derive(Debug, Error)]
pub enum ProcessProjectsError {
    #[error("No projects to process")]
    EmptyProjectList,

    #[error("Temp directory for '{project}' could not be prepared: {source}")]
    TempDirectory {
        project: String,
        source: DirectoryError,
    },

    #[error("Fetching '{project}' failed: {source}")]
    Fetch { project: String, source: FetchError },

    #[error("Copy source for '{project}' does not exist: {}", .path.display())]
    SourceRootMissing { project: String, path: PathBuf },

    #[error("Purging destination of '{project}' failed: {source}")]
    Purge {
        project: String,
        source: DirectoryError,
    },

    #[error("Recreating destination of '{project}' failed: {source}")]
    Recreate {
        project: String,
        source: DirectoryError,
    },

    #[error("Copying '{project}' failed: {source}")]
    Copy {
        project: String,
        source: DirectoryError,
    },
}

impl ProcessProjectsError {
    pub fn project_name(&self) -> Option<&str> {
        match self {
            Self::EmptyProjectList => None,
            Self::TempDirectory { project, .. }
            | Self::Fetch { project, .. }
            | Self::SourceRootMissing { project, .. }
            | Self::Purge { project, .. }
            | Self::Recreate { project, .. }
            | Self::Copy { project, .. } => Some(project),
        }
    }
}

/// 処理中に発生するイベント
///
/// 表示層はこれを受け取って進捗を出力する。
#[derive(Debug)]
pub enum ProjectEvent<'a> {
    ProjectStarted {
        index: usize,
        total: usize,
        project: &'a ProjectConfig,
    },
    TempDirectoryReady {
        path: &'a Path,
        outcome: EnsureOutcome,
    },
    FetchStarted {
        url: &'a str,
        target: &'a Path,
    },
    FetchFinished {
        strategy: Option<FetchStrategy>,
    },
    SourceRootResolved {
        path: &'a Path,
    },
    DestinationCreated {
        path: &'a Path,
    },
    DestinationCreateFailed {
        path: &'a Path,
        error: &'a DirectoryError,
    },
    DestinationPurged {
        path: &'a Path,
    },
    Copied {
        from: &'a Path,
        to: &'a Path,
        stats: CopyStats,
    },
    TempDirectoryRemoved {
        path: &'a Path,
    },
    TempDirectoryKept {
        path: &'a Path,
    },
    CleanupFailed {
        path: &'a Path,
        error: &'a DirectoryError,
    },
    ProjectFinished {
        name: &'a str,
    },
}

/// 進捗の受け取り手
pub trait ProgressListener: Send + Sync {
    fn on_event(&self, event: &ProjectEvent<'_>);
}

/// 何も出力しないリスナー
#[derive(Debug, Default)]
pub struct SilentListener;

impl ProgressListener for SilentListener {
    fn on_event(&self, _event: &ProjectEvent<'_>) {}
}

/// プロジェクト1件分の処理結果
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub name: String,
    pub strategy: FetchStrategy,
    pub stats: CopyStats,
    pub purged: bool,
    pub temp_removed: bool,
}

/// 実行全体の結果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub projects: Vec<ProjectReport>,
    /// 致命的ではなかった失敗（コピー先の自動作成、一時ディレクトリの削除）
    pub warnings: Vec<String>,
}

impl RunSummary {
    pub fn processed_count(&self) -> usize {
        self.projects.len()
    }

    pub fn cloned_count(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| p.strategy == FetchStrategy::Cloned)
            .count()
    }

    pub fn pulled_count(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| p.strategy == FetchStrategy::Pulled)
            .count()
    }

    pub fn files_copied(&self) -> usize {
        self.projects.iter().map(|p| p.stats.files).sum()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// プロジェクト処理のユースケース
///
/// リスト順に1件ずつ、取得 → コピー先の準備 → コピー → 後片付けを行う。
/// 最初の致命的エラーで実行を中断し、それまでの副作用は巻き戻さない。
pub struct ProcessProjectsUseCase {
    scm: Box<dyn ScmOperations>,
    listener: Arc<dyn ProgressListener>,
}

impl ProcessProjectsUseCase {
    /// 新しいProcessProjectsUseCaseインスタンスを作成
    pub fn new(scm: Box<dyn ScmOperations>) -> Self {
        Self {
            scm,
            listener: Arc::new(SilentListener),
        }
    }

    /// 進捗リスナーを設定
    pub fn with_listener(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    /// 全プロジェクトを処理
    pub async fn execute(
        &self,
        projects: &ProjectList,
    ) -> Result<RunSummary, ProcessProjectsError> {
        if projects.is_empty() {
            return Err(ProcessProjectsError::EmptyProjectList);
        }

        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(projects.len());
        let mut warnings = Vec::new();

        for (index, project) in projects.iter().enumerate() {
            self.listener.on_event(&ProjectEvent::ProjectStarted {
                index,
                total: projects.len(),
                project,
            });

            let report = self.process_project(project, &mut warnings).await?;
            reports.push(report);
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            projects: reports,
            warnings,
        };
        info!(
            "Processed {} project(s), {} file(s) copied",
            summary.processed_count(),
            summary.files_copied()
        );
        Ok(summary)
    }

    /// 単一プロジェクトの処理
    async fn process_project(
        &self,
        project: &ProjectConfig,
        warnings: &mut Vec<String>,
    ) -> Result<ProjectReport, ProcessProjectsError> {
        let name = project.display_name().to_string();
        let temp_dir = project.temp_dir();
        let destination = project.destination_dir();

        // 1. 一時ディレクトリの用意
        let outcome = directory::ensure_directory(&temp_dir).await.map_err(|source| {
            ProcessProjectsError::TempDirectory {
                project: name.clone(),
                source,
            }
        })?;
        self.listener.on_event(&ProjectEvent::TempDirectoryReady {
            path: &temp_dir,
            outcome,
        });

        // 2. クローン（失敗時はpull）
        let strategy = self.fetch(project, &name, &temp_dir).await?;

        // 3. コピー元の確認
        let source_root = project.source_root();
        if !directory::exists(&source_root) {
            return Err(ProcessProjectsError::SourceRootMissing {
                project: name,
                path: source_root,
            });
        }
        self.listener.on_event(&ProjectEvent::SourceRootResolved {
            path: &source_root,
        });

        // 4. コピー先の準備
        self.ensure_destination(&destination, warnings).await;

        if project.purge_destination_before_copy {
            self.purge_destination(&name, &destination).await?;
        }

        // 5. コピー
        let stats = directory::copy_recursive(&source_root, &destination)
            .await
            .map_err(|source| ProcessProjectsError::Copy {
                project: name.clone(),
                source,
            })?;
        self.listener.on_event(&ProjectEvent::Copied {
            from: &source_root,
            to: &destination,
            stats,
        });

        // 6. 後片付け
        let temp_removed = if project.delete_temp_dir_after_done {
            self.remove_temp_directory(&temp_dir, warnings).await
        } else {
            self.listener
                .on_event(&ProjectEvent::TempDirectoryKept { path: &temp_dir });
            false
        };

        self.listener
            .on_event(&ProjectEvent::ProjectFinished { name: &name });

        Ok(ProjectReport {
            name,
            strategy,
            stats,
            purged: project.purge_destination_before_copy,
            temp_removed,
        })
    }

    async fn fetch(
        &self,
        project: &ProjectConfig,
        name: &str,
        temp_dir: &Path,
    ) -> Result<FetchStrategy, ProcessProjectsError> {
        self.listener.on_event(&ProjectEvent::FetchStarted {
            url: &project.repo_url,
            target: temp_dir,
        });

        let fetcher = RepositoryFetcher::new(self.scm.as_ref());
        let result = fetcher.clone_or_update(&project.repo_url, temp_dir).await;

        self.listener.on_event(&ProjectEvent::FetchFinished {
            strategy: result.as_ref().ok().copied(),
        });

        result.map_err(|source| ProcessProjectsError::Fetch {
            project: name.to_string(),
            source,
        })
    }

    /// コピー先が無ければ作成する。失敗しても中断せず警告として残す。
    async fn ensure_destination(&self, destination: &Path, warnings: &mut Vec<String>) {
        if directory::exists(destination) {
            debug!("Destination exists: {}", destination.display());
            return;
        }

        match directory::ensure_directory(destination).await {
            Ok(_) => self.listener.on_event(&ProjectEvent::DestinationCreated {
                path: destination,
            }),
            Err(error) => {
                warn!("Could not create destination up front: {}", error);
                warnings.push(error.to_string());
                self.listener.on_event(&ProjectEvent::DestinationCreateFailed {
                    path: destination,
                    error: &error,
                });
            }
        }
    }

    async fn purge_destination(
        &self,
        name: &str,
        destination: &Path,
    ) -> Result<(), ProcessProjectsError> {
        directory::delete_recursive(destination)
            .await
            .map_err(|source| ProcessProjectsError::Purge {
                project: name.to_string(),
                source,
            })?;

        directory::ensure_directory(destination)
            .await
            .map_err(|source| ProcessProjectsError::Recreate {
                project: name.to_string(),
                source,
            })?;

        self.listener
            .on_event(&ProjectEvent::DestinationPurged { path: destination });
        Ok(())
    }

    /// 一時ディレクトリを削除する。失敗は警告のみ。
    async fn remove_temp_directory(&self, temp_dir: &Path, warnings: &mut Vec<String>) -> bool {
        match directory::delete_recursive(temp_dir).await {
            Ok(DeleteOutcome::Removed) | Ok(DeleteOutcome::NotFound) => {
                self.listener
                    .on_event(&ProjectEvent::TempDirectoryRemoved { path: temp_dir });
                true
            }
            Err(error) => {
                warn!("Temp directory cleanup failed: {}", error);
                warnings.push(error.to_string());
                self.listener.on_event(&ProjectEvent::CleanupFailed {
                    path: temp_dir,
                    error: &error,
                });
                false
            }
        }
    }
}
