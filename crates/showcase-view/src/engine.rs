//! Visible-list derivation.
//!
//! The visible list is a pure function of the repository snapshot and the
//! filter/sort criteria. [`RepoListView`] memoises it and recomputes from
//! scratch whenever either input changes.

use serde::{Deserialize, Serialize};
use showcase_types::Repository;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Label of the language sentinel that disables filtering.
pub const ALL_LANGUAGES: &str = "All";

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

/// Field the visible list is ordered by, always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation time.
    Created,
    /// Star count.
    Stars,
    /// Last push time.
    #[default]
    Activity,
    /// Last update time.
    Updated,
}

impl SortKey {
    /// Every sort key, in the order the sort control lists them.
    pub const ALL: [SortKey; 4] = [
        SortKey::Stars,
        SortKey::Created,
        SortKey::Activity,
        SortKey::Updated,
    ];

    /// Value used in the sort control.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Stars => "stars",
            SortKey::Activity => "activity",
            SortKey::Updated => "updated",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Created => "Date Created",
            SortKey::Stars => "Most Stars",
            SortKey::Activity => "Most Activity",
            SortKey::Updated => "Last Updated",
        }
    }

    /// Descending comparison of two records on this key.
    pub fn compare(&self, a: &Repository, b: &Repository) -> Ordering {
        match self {
            SortKey::Created => b.created_at.cmp(&a.created_at),
            SortKey::Stars => b.stargazers_count.cmp(&a.stargazers_count),
            SortKey::Activity => b.pushed_at.cmp(&a.pushed_at),
            SortKey::Updated => b.updated_at.cmp(&a.updated_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(SortKey::Created),
            "stars" => Ok(SortKey::Stars),
            "activity" => Ok(SortKey::Activity),
            "updated" => Ok(SortKey::Updated),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Language selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageFilter {
    /// No filtering.
    #[default]
    All,
    /// Exact, case-sensitive language name.
    Language(String),
}

impl LanguageFilter {
    /// Returns true if `repo` passes the filter.
    pub fn matches(&self, repo: &Repository) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Language(language) => repo.uses_language(language),
        }
    }
}

impl From<&str> for LanguageFilter {
    fn from(value: &str) -> Self {
        if value == ALL_LANGUAGES {
            LanguageFilter::All
        } else {
            LanguageFilter::Language(value.to_string())
        }
    }
}

impl From<String> for LanguageFilter {
    fn from(value: String) -> Self {
        if value == ALL_LANGUAGES {
            LanguageFilter::All
        } else {
            LanguageFilter::Language(value)
        }
    }
}

impl From<LanguageFilter> for String {
    fn from(filter: LanguageFilter) -> Self {
        match filter {
            LanguageFilter::All => ALL_LANGUAGES.to_string(),
            LanguageFilter::Language(language) => language,
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str(ALL_LANGUAGES),
            LanguageFilter::Language(language) => f.write_str(language),
        }
    }
}

/// User-selected filter and sort criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewCriteria {
    pub language: LanguageFilter,
    #[serde(rename = "sortBy")]
    pub sort: SortKey,
}

impl ViewCriteria {
    /// Creates criteria from a language selector and a sort key.
    pub fn new(language: impl Into<LanguageFilter>, sort: SortKey) -> Self {
        Self {
            language: language.into(),
            sort,
        }
    }
}

/// Computes the ordered visible subset of `repos`.
///
/// Ties keep their input order.
pub fn visible_repos(repos: &[Repository], criteria: &ViewCriteria) -> Vec<Repository> {
    let mut list: Vec<Repository> = repos
        .iter()
        .filter(|repo| criteria.language.matches(repo))
        .cloned()
        .collect();

    list.sort_by(|a, b| criteria.sort.compare(a, b));
    list
}

/// Collects the options of the language control: the `"All"` sentinel
/// followed by every distinct primary language, ascending.
///
/// Ordering ignores case first; names equal up to case put the lowercase
/// spelling first.
pub fn language_options(repos: &[Repository]) -> Vec<String> {
    let distinct: BTreeSet<&str> = repos
        .iter()
        .filter_map(|repo| repo.language.as_deref())
        .collect();

    let mut languages: Vec<&str> = distinct.into_iter().collect();
    languages.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a))
    });

    std::iter::once(ALL_LANGUAGES)
        .chain(languages)
        .map(str::to_string)
        .collect()
}

/// Memoised visible list over a repository snapshot.
#[derive(Debug, Clone)]
pub struct RepoListView {
    repos: Arc<[Repository]>,
    criteria: ViewCriteria,
    languages: Vec<String>,
    visible: Vec<Repository>,
}

impl RepoListView {
    /// Creates a view with default criteria (all languages, most activity).
    pub fn new(repos: impl Into<Arc<[Repository]>>) -> Self {
        Self::with_criteria(repos, ViewCriteria::default())
    }

    /// Creates a view with the given criteria.
    pub fn with_criteria(repos: impl Into<Arc<[Repository]>>, criteria: ViewCriteria) -> Self {
        let repos = repos.into();
        let languages = language_options(&repos);
        let visible = visible_repos(&repos, &criteria);

        Self {
            repos,
            criteria,
            languages,
            visible,
        }
    }

    /// The current visible list.
    pub fn visible(&self) -> &[Repository] {
        &self.visible
    }

    /// The options of the language control.
    pub fn language_options(&self) -> &[String] {
        &self.languages
    }

    /// The current criteria.
    pub fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    /// The repository snapshot.
    pub fn repos(&self) -> &Arc<[Repository]> {
        &self.repos
    }

    /// Replaces the criteria. Returns true if the visible list was
    /// recomputed.
    pub fn set_criteria(&mut self, criteria: ViewCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.visible = visible_repos(&self.repos, &self.criteria);
        true
    }

    /// Changes the language selector.
    pub fn set_language(&mut self, language: impl Into<LanguageFilter>) -> bool {
        let criteria = ViewCriteria {
            language: language.into(),
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    /// Changes the sort key.
    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        let criteria = ViewCriteria {
            sort,
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    /// Replaces the repository snapshot. Returns true if it differed from the
    /// current one.
    pub fn set_repos(&mut self, repos: impl Into<Arc<[Repository]>>) -> bool {
        let repos = repos.into();
        if Arc::ptr_eq(&repos, &self.repos) || repos[..] == self.repos[..] {
            return false;
        }
        self.languages = language_options(&repos);
        self.visible = visible_repos(&repos, &self.criteria);
        self.repos = repos;
        true
    }
}
