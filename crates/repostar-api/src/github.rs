use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Thin client over the GitHub repository search endpoint.
///
/// No token is ever sent: every request is anonymous.
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// For GitHub Enterprise or a local test server
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        // GitHub rejects requests without a User-Agent
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Repostar/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a search, query percent-encoded
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/repositories?q={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Search repositories. One request, no retries, no paging.
    pub async fn search_repositories(&self, query: &str) -> Result<Vec<GitHubRepo>> {
        let url = self.search_url(query);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed { status, body });
        }

        // Read the body first so a bad payload surfaces as ParseError, not NetworkError
        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(
            "search returned {} of {} items",
            parsed.items.len(),
            parsed.total_count
        );

        Ok(parsed.items)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<GitHubRepo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub owner: GitHubOwner,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    #[serde(default)]
    pub login: String,
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const TWO_REPOS: &str = r#"{
        "total_count": 2,
        "incomplete_results": false,
        "items": [
            {
                "id": 10270250,
                "name": "react",
                "description": "The library for web and native user interfaces.",
                "owner": { "login": "facebook", "avatar_url": "https://avatars.githubusercontent.com/u/69631?v=4" },
                "html_url": "https://github.com/facebook/react",
                "stargazers_count": 228000,
                "forks_count": 46500,
                "language": "JavaScript",
                "created_at": "2013-05-24T16:15:54Z",
                "updated_at": "2024-06-01T10:00:00Z"
            },
            {
                "id": 75396575,
                "name": "react-native-thing",
                "description": null,
                "owner": { "login": "someone", "avatar_url": "https://avatars.githubusercontent.com/u/1?v=4" },
                "stargazers_count": 3,
                "forks_count": 0,
                "language": null,
                "created_at": "2016-12-02T12:00:00Z",
                "updated_at": "2016-12-03T12:00:00Z"
            }
        ]
    }"#;

    /// Serve exactly one canned HTTP response and hand back the request line
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let request = String::from_utf8_lossy(&buf).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = GitHubClient::with_base_url("https://api.github.com/").unwrap();
        assert_eq!(
            client.search_url("react native"),
            "https://api.github.com/search/repositories?q=react%20native"
        );
        assert_eq!(
            client.search_url("c++ & friends"),
            "https://api.github.com/search/repositories?q=c%2B%2B%20%26%20friends"
        );
    }

    #[test]
    fn test_parse_search_response() {
        let parsed: SearchResponse = serde_json::from_str(TWO_REPOS).unwrap();
        assert_eq!(parsed.total_count, 2);
        assert_eq!(parsed.items.len(), 2);

        let first = &parsed.items[0];
        assert_eq!(first.id, 10270250);
        assert_eq!(first.owner.login, "facebook");
        assert_eq!(first.language.as_deref(), Some("JavaScript"));

        let second = &parsed.items[1];
        assert!(second.description.is_none());
        assert!(second.language.is_none());
        assert!(second.html_url.is_none());
    }

    #[tokio::test]
    async fn test_search_repositories_success() {
        let (base, server) = serve_once("200 OK", TWO_REPOS).await;
        let client = GitHubClient::with_base_url(base).unwrap();

        let repos = client.search_repositories("react").await.unwrap();
        let ids: Vec<u64> = repos.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10270250, 75396575]);

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /search/repositories?q=react HTTP/1.1");
    }

    #[tokio::test]
    async fn test_search_repositories_non_success_status() {
        let (base, server) = serve_once(
            "422 Unprocessable Entity",
            r#"{"message":"Validation Failed"}"#,
        )
        .await;
        let client = GitHubClient::with_base_url(base).unwrap();

        let err = client.search_repositories("x").await.unwrap_err();
        match err {
            GitHubError::RequestFailed { status, body } => {
                assert_eq!(status.as_u16(), 422);
                assert!(body.contains("Validation Failed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_search_repositories_malformed_payload() {
        let (base, server) = serve_once("200 OK", r#"{"items": "nope"}"#).await;
        let client = GitHubClient::with_base_url(base).unwrap();

        let err = client.search_repositories("rust").await.unwrap_err();
        assert!(matches!(err, GitHubError::ParseError(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_search_repositories_connection_refused() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GitHubClient::with_base_url(format!("http://{}", addr)).unwrap();
        let err = client.search_repositories("rust").await.unwrap_err();
        assert!(matches!(err, GitHubError::NetworkError(_)));
    }
}
