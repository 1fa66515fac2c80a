// GitHub REST client used by the search view
pub mod github;

pub use github::{GitHubClient, GitHubError, GitHubOwner, GitHubRepo, SearchResponse};
