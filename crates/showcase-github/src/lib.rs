//! # Showcase GitHub
//!
//! Network collaborators of the repository showcase:
//!
//! - **Repo Data Fetcher**: [`GitHubClient::fetch_repos`] lists an account's
//!   repositories and attaches each one's language breakdown, fetched
//!   concurrently with per-repository failure isolation.
//! - **Upstream star endpoints**: [`GitHubClient`] also lists, reads and sets
//!   the session user's starred repositories with a bearer credential.
//! - **Star State Store client**: [`ProxyClient`] implements [`StarStore`]
//!   against the showcase proxy, the way the widget talks to its server.
//!
//! ## Example
//!
//! ```rust,ignore
//! use showcase_github::{Account, GitHubClient, GitHubConfig};
//!
//! #[tokio::main]
//! async fn main() -> showcase_github::Result<()> {
//!     let client = GitHubClient::new(&GitHubConfig::default())?;
//!     let repos = client.fetch_repos(&Account::from_env()).await?;
//!     println!("{} repositories", repos.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod github;
pub mod types;

// Re-export main types
pub use client::{ProxyClient, StarStore};
pub use error::{FailureKind, GitHubError, Result};
pub use github::GitHubClient;
pub use types::*;
