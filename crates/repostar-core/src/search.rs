use crate::{models::RepositoryRecord, Result};

/// Anything that can answer a repository search
///
/// The GitHub provider is the only real one; tests plug in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<RepositoryRecord>>;
}
