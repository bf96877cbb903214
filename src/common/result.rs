use crate::common::error::GitwrapError;

/// gitwrap全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use gitwrap::common::result::GitwrapResult;
/// use gitwrap::common::error::GitwrapError;
///
/// fn example_function() -> GitwrapResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> GitwrapResult<()> {
///     Err(GitwrapError::config_error("No projects found", None))
/// }
/// ```
pub type GitwrapResult<T> = Result<T, GitwrapError>;

/// Resultのエラー変換ヘルパー
///
/// 標準のResult型をGitwrapResultに変換するためのヘルパー
pub trait ResultExt<T, E> {
    /// ファイルシステムエラーとしてGitwrapResultに変換
    ///
    /// # Examples
    ///
    /// ```
    /// use gitwrap::common::result::{GitwrapResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let converted: GitwrapResult<String> =
    ///     result.with_filesystem_error("read failed", Some(PathBuf::from("a.json")));
    /// assert!(converted.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitwrapResult<T>
    where
        E: Into<std::io::Error>;

    /// 設定エラーとしてGitwrapResultに変換
    fn with_config_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitwrapResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitwrapResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            GitwrapError::filesystem_error_with_source(message, path, io_error)
        })
    }

    fn with_config_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitwrapResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| GitwrapError::config_error_with_source(message, path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_result_ext_with_filesystem_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let result: Result<String, std::io::Error> = Err(io_error);
        let path = Some(PathBuf::from("/test/path"));

        let converted = result.with_filesystem_error("test operation", path);
        match converted {
            Err(GitwrapError::FileSystemError { message, path, .. }) => {
                assert_eq!(message, "test operation");
                assert_eq!(path, Some(PathBuf::from("/test/path")));
            }
            other => panic!("Expected FileSystemError, got {other:?}"),
        }
    }

    #[test]
    fn test_result_ext_with_config_error() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let result: Result<serde_json::Value, serde_json::Error> = Err(parse_error);

        let converted = result.with_config_error("bad json", None);
        assert!(matches!(converted, Err(GitwrapError::ConfigError { .. })));
    }
}
