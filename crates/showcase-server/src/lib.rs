//! # Showcase Server
//!
//! HTTP backend of the repository showcase widget.
//!
//! It serves the normalized repository list of the configured account and
//! proxies the session user's star operations to the hosting API, so the
//! upstream credential never reaches the browser.
//!
//! ```text
//! ┌──────────────┐   cookie gh_token   ┌────────────────┐   bearer   ┌────────────┐
//! │    widget    │ ──────────────────▶ │ showcase-server│ ─────────▶ │ GitHub API │
//! └──────────────┘                     └────────────────┘            └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! GITHUB_USERNAME=octocat cargo run --bin showcase-server -- --listen-addr 127.0.0.1:8080
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Router, shared state and the repository listing
//! - [`github_api`] - Session-scoped star proxy endpoints
//! - [`config`] - Layered server configuration
//! - [`observability`] - Structured logging and request tracing
//! - [`session`] - Session cookie extraction
//!
//! ## Example: Building the router
//!
//! ```rust,no_run
//! use showcase_github::{GitHubClient, GitHubConfig};
//! use showcase_server::api::{create_router, AppState};
//! use showcase_server::config::SessionConfig;
//!
//! let github = GitHubClient::new(&GitHubConfig::default()).unwrap();
//! let app = create_router(AppState::new(github, SessionConfig::default()));
//! ```

pub mod api;
pub mod config;
pub mod github_api;
pub mod observability;
pub mod session;
