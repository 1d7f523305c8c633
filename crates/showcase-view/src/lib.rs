//! # Showcase View
//!
//! View state of the repository showcase, independent of any rendering
//! toolkit. Every type is a plain owned value mutated from a single event
//! loop; timers are deadlines advanced with `tick(now)`.
//!
//! - [`engine`] - Visible-list derivation (filter + descending sort) and the
//!   language control options
//! - [`hover`] - Hover preview placement and its scroll/resize invalidation
//! - [`context`] - Shared repository snapshot and session star state
//! - [`card`] - Per-card star toggle state machine
//!
//! ## Example
//!
//! ```rust,ignore
//! use showcase_github::ProxyClient;
//! use showcase_view::{CardEffect, RepoCard, RepoContext, RepoListView, SortKey};
//!
//! let client = ProxyClient::new("http://127.0.0.1:8080")?;
//! let mut context = RepoContext::mount(client.repos().await?, &client).await;
//!
//! let mut list = RepoListView::new(context.repos().clone());
//! list.set_sort(SortKey::Stars);
//! let mut card = RepoCard::from_context(&list.visible()[0], &context);
//! if let CardEffect::Starred { name, count } = card.star(&client).await {
//!     context.confirm_star(&name, count, &client).await;
//! }
//! ```

pub mod card;
pub mod context;
pub mod engine;
pub mod hover;

pub use card::{CardEffect, CardState, Click, Confirm, Propagation, RepoCard};
pub use context::RepoContext;
pub use engine::{
    language_options, visible_repos, LanguageFilter, RepoListView, SortKey, UnknownSortKey,
    ViewCriteria, ALL_LANGUAGES,
};
pub use hover::{hover_placement, HoverPreview, HoverTracker};
