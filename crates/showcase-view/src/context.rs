//! # Shared Repo Context
//!
//! View state handed to every list and card: the repository snapshot plus
//! the session's star state.

use showcase_github::StarStore;
use showcase_types::Repository;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Shared view state.
///
/// Every collection is an immutable snapshot behind an [`Arc`]. Updates
/// replace the snapshot; readers holding an old one keep a consistent view.
#[derive(Debug, Clone)]
pub struct RepoContext {
    repos: Arc<[Repository]>,
    starred: Arc<HashSet<String>>,
    counts: Arc<HashMap<String, u64>>,
    loaded: bool,
}

impl RepoContext {
    /// Creates the context and seeds display counts from each record's
    /// star count.
    pub fn new(repos: impl Into<Arc<[Repository]>>) -> Self {
        let repos = repos.into();
        let counts = repos
            .iter()
            .map(|r| (r.name.clone(), r.stargazers_count))
            .collect();

        Self {
            repos,
            starred: Arc::new(HashSet::new()),
            counts: Arc::new(counts),
            loaded: false,
        }
    }

    /// Creates the context and runs the initial star refresh.
    pub async fn mount<S: StarStore + ?Sized>(
        repos: impl Into<Arc<[Repository]>>,
        store: &S,
    ) -> Self {
        let mut context = Self::new(repos);
        context.refresh_stars(store).await;
        context
    }

    /// Re-synchronizes the starred set from the store.
    ///
    /// An authenticated answer replaces the whole set. Any failure keeps the
    /// previous set. The loaded flag is set either way.
    pub async fn refresh_stars<S: StarStore + ?Sized>(&mut self, store: &S) {
        match store.starred_list().await {
            Ok(list) if list.authed => {
                let names: HashSet<String> = list.names().map(str::to_string).collect();
                tracing::debug!(count = names.len(), "Refreshed starred repositories");
                self.starred = Arc::new(names);
            }
            Ok(_) => {
                tracing::debug!("Star refresh unauthenticated, keeping previous state");
            }
            Err(e) => {
                tracing::error!(error = %e, "refreshStars failed");
            }
        }
        self.loaded = true;
    }

    /// Publishes a confirmed star from a card.
    pub fn record_star(&mut self, name: &str, count: Option<u64>) {
        let mut starred = (*self.starred).clone();
        starred.insert(name.to_string());
        self.starred = Arc::new(starred);

        if let Some(count) = count {
            let mut counts = (*self.counts).clone();
            counts.insert(name.to_string(), count);
            self.counts = Arc::new(counts);
        }
    }

    /// Publishes a confirmed star, then re-synchronizes the whole starred
    /// set from `store`.
    pub async fn confirm_star<S: StarStore + ?Sized>(
        &mut self,
        name: &str,
        count: Option<u64>,
        store: &S,
    ) {
        self.record_star(name, count);
        self.refresh_stars(store).await;
    }

    /// The repository snapshot.
    pub fn repos(&self) -> &Arc<[Repository]> {
        &self.repos
    }

    /// The current starred-name snapshot.
    pub fn starred(&self) -> &Arc<HashSet<String>> {
        &self.starred
    }

    /// Returns true if `name` is starred.
    pub fn is_starred(&self, name: &str) -> bool {
        self.starred.contains(name)
    }

    /// The current display-count snapshot.
    pub fn counts(&self) -> &Arc<HashMap<String, u64>> {
        &self.counts
    }

    /// Display count for `name`.
    pub fn count(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    /// True once a refresh attempt completed, successful or not.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
