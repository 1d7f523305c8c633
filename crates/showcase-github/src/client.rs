//! Widget-side client for the proxy endpoints.

use crate::error::{GitHubError, Result};
use crate::types::{StarRequest, StarResponse, StarredList, StarredStatus};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use showcase_types::Repository;

/// The star state store, as seen by the widget.
#[async_trait]
pub trait StarStore: Send + Sync {
    /// Lists the repositories the session user starred.
    async fn starred_list(&self) -> Result<StarredList>;

    /// Reads the starred flag of one repository.
    async fn starred(&self, owner: &str, repo: &str) -> Result<StarredStatus>;

    /// Stars one repository. Returns [`GitHubError::Unauthenticated`] when
    /// the proxy answers 401.
    async fn star(&self, owner: &str, repo: &str) -> Result<StarResponse>;
}

/// HTTP client for the showcase proxy.
///
/// Mirrors the requests the widget issues against its own server. The client
/// is cheaply cloneable.
#[derive(Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
    session: Option<String>,
}

impl ProxyClient {
    /// Cookie carrying the session credential.
    pub const SESSION_COOKIE: &'static str = "gh_token";

    /// Creates a client for the proxy at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session: None,
        })
    }

    /// Attaches a session credential, sent as the session cookie.
    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_cookie(self.http.get(format!("{}{path}", self.base_url)))
    }

    fn with_cookie(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session {
            Some(token) => request.header(
                "Cookie",
                format!("{}={token}", Self::SESSION_COOKIE),
            ),
            None => request,
        }
    }

    /// Decodes a JSON body regardless of status; the proxy always answers
    /// with its neutral shape.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }

    /// Retrieves the repository list served by the proxy.
    pub async fn repos(&self) -> Result<Vec<Repository>> {
        let response = self
            .get("/api/repos")
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GitHubError::Upstream {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Self::decode(response).await
    }
}

#[async_trait]
impl StarStore for ProxyClient {
    async fn starred_list(&self) -> Result<StarredList> {
        let response = self
            .get("/api/github/starred-list")
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn starred(&self, owner: &str, repo: &str) -> Result<StarredStatus> {
        let response = self
            .get("/api/github/starred")
            .query(&[("owner", owner), ("repo", repo)])
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn star(&self, owner: &str, repo: &str) -> Result<StarResponse> {
        let request = self
            .http
            .post(format!("{}/api/github/star", self.base_url))
            .json(&StarRequest {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        let response = self
            .with_cookie(request)
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(GitHubError::Unauthenticated);
        }

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_starred_list_decodes_unauthenticated_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/github/starred-list"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "authed": false, "repos": [] })),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(server.uri()).unwrap();
        let list = client.starred_list().await.unwrap();

        assert!(!list.authed);
        assert!(list.repos.is_empty());
    }

    #[tokio::test]
    async fn test_starred_sends_query_and_cookie() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/github/starred"))
            .and(query_param("owner", "alice"))
            .and(query_param("repo", "site"))
            .and(header("cookie", "gh_token=abc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "authed": true, "starred": true })),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(server.uri()).unwrap().with_session("abc");
        let status = client.starred("alice", "site").await.unwrap();

        assert!(status.authed);
        assert!(status.starred);
    }

    #[tokio::test]
    async fn test_star_posts_body_and_reads_count() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/github/star"))
            .and(body_json(json!({ "owner": "alice", "repo": "site" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "count": 12 })),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(server.uri()).unwrap();
        let response = client.star("alice", "site").await.unwrap();

        assert!(response.ok);
        assert_eq!(response.count, Some(12));
    }

    #[tokio::test]
    async fn test_star_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/github/star"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "ok": false })))
            .mount(&server)
            .await;

        let client = ProxyClient::new(server.uri()).unwrap();
        let err = client.star("alice", "site").await.unwrap_err();
        assert!(matches!(err, GitHubError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_repos_reports_server_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/repos"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ProxyClient::new(server.uri()).unwrap();
        let err = client.repos().await.unwrap_err();
        assert_eq!(err.status(), Some(502));
    }
}
