use thiserror::Error;

/// Everything that can go wrong outside the UI layer
///
/// Fetch failures carry the underlying message for the log only; the search
/// view shows one generic notice no matter which variant it got.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetching repositories failed: {0}")]
    FetchFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<repostar_api::GitHubError> for Error {
    fn from(err: repostar_api::GitHubError) -> Self {
        Error::FetchFailed(err.to_string())
    }
}
