//! Repository types for the showcase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language name to byte count, as reported by the hosting API.
pub type LanguageMap = BTreeMap<String, u64>;

/// A unique identifier for a repository, assigned by the hosting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(u64);

impl RepositoryId {
    /// Creates a repository ID from the upstream numeric id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RepositoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized repository record.
///
/// Field names follow the hosting API so the JSON served to the widget keeps
/// the upstream shape. Records are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique identifier.
    pub id: RepositoryId,
    /// Repository name, unique within the owner.
    pub name: String,
    /// Owner login. Empty when the upstream record has no owner.
    #[serde(default)]
    pub owner: String,
    /// Canonical web URL.
    pub html_url: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,
    /// Full language breakdown.
    #[serde(default)]
    pub languages: LanguageMap,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub created_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    /// Creates a repository with empty metrics and all timestamps set to `at`.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        owner: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let owner = owner.into();
        let html_url = format!("https://github.com/{owner}/{name}");

        Self {
            id: RepositoryId::new(id),
            name,
            owner,
            html_url,
            description: None,
            language: None,
            languages: LanguageMap::new(),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            created_at: at,
            pushed_at: at,
            updated_at: at,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the primary language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Adds an entry to the language breakdown.
    pub fn with_language_bytes(mut self, language: impl Into<String>, bytes: u64) -> Self {
        self.languages.insert(language.into(), bytes);
        self
    }

    /// Sets the star count.
    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stargazers_count = stars;
        self
    }

    /// Returns the full name (owner/name).
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Returns true if the repository is written in `language`, either as a
    /// key of the breakdown or as its primary language.
    pub fn uses_language(&self, language: &str) -> bool {
        self.languages.contains_key(language) || self.language.as_deref() == Some(language)
    }
}
