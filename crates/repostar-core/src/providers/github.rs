// GitHub provider implementation - bridges API client with SearchProvider trait
use async_trait::async_trait;
use repostar_api::{GitHubClient, GitHubRepo};

use crate::{
    models::{RepoId, RepositoryRecord},
    search::SearchProvider,
    Result,
};

/// Wrapper around GitHubClient that implements SearchProvider
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::with_base_url(api_url)?,
        })
    }
}

#[async_trait]
impl SearchProvider for GitHubProvider {
    async fn search(&self, query: &str) -> Result<Vec<RepositoryRecord>> {
        let repos = self.client.search_repositories(query).await?;
        Ok(repos.into_iter().map(github_to_record).collect())
    }
}

/// Convert GitHub API repo to our internal record
fn github_to_record(gh: GitHubRepo) -> RepositoryRecord {
    RepositoryRecord {
        id: RepoId(gh.id),
        name: gh.name,
        description: gh.description,
        owner_avatar_url: gh.owner.avatar_url,
        html_url: gh.html_url,
        stars: gh.stargazers_count,
        forks: gh.forks_count,
        language: gh.language,
        created_at: gh.created_at,
        updated_at: gh.updated_at,
    }
}
