use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// プロジェクト定義
///
/// リソースリスト内の1エントリ。クローン元、一時ディレクトリ、コピー先と
/// 後処理のフラグを保持する。読み込み後に変更されることはない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectConfig {
    /// クローン元（gitが解釈できるURLまたはパス）
    #[validate(length(min = 1, message = "repo_url must not be empty"))]
    pub repo_url: String,

    /// コピー先ディレクトリ
    #[validate(length(min = 1, message = "destination_path must not be empty"))]
    pub destination_path: String,

    /// クローン先の一時ディレクトリ（複数プロジェクトで共有してもよい）
    #[validate(length(min = 1, message = "temp_directory must not be empty"))]
    pub temp_directory: String,

    /// コピー成功後に一時ディレクトリを削除するか
    pub delete_temp_dir_after_done: bool,

    /// 一時ディレクトリ内でコピー元として扱うサブディレクトリ名
    pub project_name: String,

    /// コピー前にコピー先を削除して作り直すか
    pub purge_destination_before_copy: bool,
}

impl ProjectConfig {
    /// 新しいProjectConfigインスタンスを作成
    pub fn new(
        repo_url: impl Into<String>,
        temp_directory: impl Into<String>,
        destination_path: impl Into<String>,
    ) -> Self {
        Self {
            repo_url: repo_url.into(),
            temp_directory: temp_directory.into(),
            destination_path: destination_path.into(),
            ..Self::default()
        }
    }

    /// プロジェクト名を設定
    pub fn with_project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = project_name.into();
        self
    }

    /// 一時ディレクトリ削除フラグを設定
    pub fn with_delete_temp_dir(mut self, delete: bool) -> Self {
        self.delete_temp_dir_after_done = delete;
        self
    }

    /// コピー先パージフラグを設定
    pub fn with_purge_destination(mut self, purge: bool) -> Self {
        self.purge_destination_before_copy = purge;
        self
    }

    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(&self.temp_directory)
    }

    pub fn destination_dir(&self) -> PathBuf {
        PathBuf::from(&self.destination_path)
    }

    /// コピー元ディレクトリ（`temp_directory/project_name`）
    ///
    /// `project_name`が空の場合は一時ディレクトリそのものになる。
    pub fn source_root(&self) -> PathBuf {
        if self.project_name.is_empty() {
            self.temp_dir()
        } else {
            self.temp_dir().join(&self.project_name)
        }
    }

    /// 表示用の名前（プロジェクト名が空ならリポジトリURL）
    pub fn display_name(&self) -> &str {
        if self.project_name.is_empty() {
            &self.repo_url
        } else {
            &self.project_name
        }
    }
}

/// リソースリスト全体
///
/// `projects`の順序がそのまま処理順になる。重複は検出しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

impl ProjectList {
    pub fn new(projects: Vec<ProjectConfig>) -> Self {
        Self { projects }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectConfig> {
        self.projects.iter()
    }
}
