//! Upstream GitHub client.
//!
//! Covers the handful of endpoints the showcase needs: listing an account's
//! repositories with their language breakdowns, and the session-scoped star
//! endpoints proxied for the widget.

use crate::error::{GitHubError, Result};
use crate::types::{Account, GitHubConfig, GitHubRepo, RepoStars};

use futures::future::join_all;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use showcase_types::{LanguageMap, Repository};
use tracing::{debug, info, warn};

const ACCEPT: &str = "application/vnd.github+json";

/// Client for the hosting API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates an anonymous client.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Returns a client sending `token` as bearer credential.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            api_url: self.api_url.clone(),
            token,
        }
    }

    /// Returns true if a credential is attached.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.http.request(method, url).header("Accept", ACCEPT);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))
    }

    async fn upstream_error(response: Response) -> GitHubError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        GitHubError::Upstream { status, body }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, url)).await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }

    fn require_token(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(GitHubError::Unauthenticated);
        }
        Ok(())
    }

    /// Lists up to 100 repositories of `user`, most recently updated first.
    pub async fn list_user_repos(&self, user: &str) -> Result<Vec<GitHubRepo>> {
        let url = format!(
            "{}/users/{user}/repos?per_page=100&sort=updated",
            self.api_url
        );
        self.get_json(&url).await
    }

    /// Fetches the language breakdown at `languages_url`.
    pub async fn repo_languages(&self, languages_url: &str) -> Result<LanguageMap> {
        self.get_json(languages_url).await
    }

    async fn languages_or_empty(&self, repo: &GitHubRepo) -> LanguageMap {
        match self.repo_languages(&repo.languages_url).await {
            Ok(languages) => languages,
            Err(e) => {
                warn!(repo = %repo.name, error = %e, "Failed to fetch languages");
                LanguageMap::new()
            }
        }
    }

    /// Fetches the normalized repository list of `account`.
    ///
    /// Language breakdowns are requested concurrently for every repository.
    /// A failed breakdown degrades that repository to an empty map; only a
    /// failure of the primary listing is returned as an error.
    pub async fn fetch_repos(&self, account: &Account) -> Result<Vec<Repository>> {
        let user = account
            .username
            .as_deref()
            .ok_or(GitHubError::MissingAccount)?;
        let client = self.with_token(account.token.clone());

        let raw = client.list_user_repos(user).await?;
        debug!(user = %user, count = raw.len(), "Listed repositories");

        let repos = join_all(raw.into_iter().map(|repo| {
            let client = &client;
            async move {
                let languages = client.languages_or_empty(&repo).await;
                repo.into_repository(languages)
            }
        }))
        .await;

        info!(user = %user, count = repos.len(), "Fetched repositories");
        Ok(repos)
    }

    /// Lists the repositories starred by the session user.
    ///
    /// Items are returned as raw JSON so the proxy can pass them through.
    pub async fn list_starred(&self) -> Result<Vec<serde_json::Value>> {
        self.require_token()?;
        let url = format!("{}/user/starred?per_page=100", self.api_url);
        self.get_json(&url).await
    }

    /// Checks whether the session user starred `owner/repo`.
    pub async fn is_starred(&self, owner: &str, repo: &str) -> Result<bool> {
        self.require_token()?;
        let url = format!("{}/user/starred/{owner}/{repo}", self.api_url);
        let response = self.send(self.request(Method::GET, &url)).await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            StatusCode::UNAUTHORIZED => Err(GitHubError::Unauthenticated),
            _ => Err(Self::upstream_error(response).await),
        }
    }

    /// Stars `owner/repo` on behalf of the session user.
    pub async fn star(&self, owner: &str, repo: &str) -> Result<()> {
        self.require_token()?;
        let url = format!("{}/user/starred/{owner}/{repo}", self.api_url);
        let request = self
            .request(Method::PUT, &url)
            .header("Content-Length", "0");
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(GitHubError::Unauthenticated),
            _ => Err(Self::upstream_error(response).await),
        }
    }

    /// Reads the current star count of `owner/repo`.
    pub async fn star_count(&self, owner: &str, repo: &str) -> Result<u64> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_url);
        let stars: RepoStars = self.get_json(&url).await?;
        Ok(stars.stargazers_count)
    }
}
