use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source-assigned repository identifier. Stable across searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoId(pub u64);

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RepoId {
    fn from(id: u64) -> Self {
        RepoId(id)
    }
}

/// One repository as returned by a search
///
/// Never patched after it is fetched. A newer search produces new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: RepoId,
    pub name: String,
    pub description: Option<String>,
    pub owner_avatar_url: String,
    pub html_url: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RepositoryRecord {
    /// Language name, or "N/A" when GitHub couldn't detect one
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or("N/A")
    }
}
