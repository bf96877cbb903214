pub mod config_loader;
pub mod repository_fetcher;

pub use config_loader::{ConfigLoadError, ConfigLoader, DecodeMode, LoadedConfig};
pub use repository_fetcher::{FetchError, FetchStrategy, RepositoryFetcher};
