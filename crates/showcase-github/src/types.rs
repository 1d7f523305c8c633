//! Wire types for the hosting API and the proxy endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_types::{LanguageMap, Repository, RepositoryId};
use std::time::Duration;

/// Default hosting API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default `User-Agent` sent upstream.
pub const DEFAULT_USER_AGENT: &str = "showcase-proxy";

/// Connection settings for the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API base URL, without trailing slash.
    pub api_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl GitHubConfig {
    /// Creates a config pointing at `api_url` with default settings otherwise.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The account whose repositories are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Account login.
    pub username: Option<String>,
    /// Optional credential. Absent means anonymous, rate-limited access.
    pub token: Option<String>,
}

impl Account {
    /// Environment variable holding the account login.
    pub const USERNAME_VAR: &'static str = "GITHUB_USERNAME";
    /// Environment variable holding the credential.
    pub const TOKEN_VAR: &'static str = "GITHUB_TOKEN";

    /// Creates an anonymous account for `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            token: None,
        }
    }

    /// Sets the credential.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads the account from process environment. Empty values count as
    /// absent.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            username: read(Self::USERNAME_VAR),
            token: read(Self::TOKEN_VAR),
        }
    }
}

/// Repository as returned by `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub owner: Option<GitHubOwner>,
    pub languages_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

impl GitHubRepo {
    /// Normalizes the upstream record, attaching its language breakdown.
    ///
    /// Null timestamps become the Unix epoch, so such records sort last.
    pub fn into_repository(self, languages: LanguageMap) -> Repository {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;

        Repository {
            id: RepositoryId::new(self.id),
            name: self.name,
            owner: self.owner.map(|o| o.login).unwrap_or_default(),
            html_url: self.html_url,
            description: self.description,
            language: self.language,
            languages,
            stargazers_count: self.stargazers_count,
            forks_count: self.forks_count,
            open_issues_count: self.open_issues_count,
            created_at: self.created_at.unwrap_or(epoch),
            pushed_at: self.pushed_at.unwrap_or(epoch),
            updated_at: self.updated_at.unwrap_or(epoch),
        }
    }
}

/// Repository summary used to read back a star count.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepoStars {
    pub stargazers_count: u64,
}

/// Response of `GET /api/github/starred-list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarredList {
    pub authed: bool,
    /// Upstream repository objects, passed through untouched.
    #[serde(default)]
    pub repos: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StarredList {
    /// The neutral, unauthenticated answer.
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    /// Returns the names of every listed repository that has one.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repos
            .iter()
            .filter_map(|r| r.get("name").and_then(|n| n.as_str()))
            .filter(|n| !n.is_empty())
    }
}

/// Response of `GET /api/github/starred`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredStatus {
    pub authed: bool,
    pub starred: bool,
}

/// Body of `POST /api/github/star`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRequest {
    pub owner: String,
    pub repo: String,
}

/// Response of `POST /api/github/star`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
