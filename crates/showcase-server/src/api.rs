//! HTTP API for the showcase server.
//!
//! Serves the repository listing consumed by the widget and mounts the
//! session-scoped GitHub proxy endpoints from [`crate::github_api`].

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use showcase_github::{Account, GitHubClient, GitHubError};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SessionConfig;
use crate::github_api;
use crate::observability::request_id_layer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Anonymous upstream client; handlers attach credentials per request.
    pub github: GitHubClient,
    /// Session cookie settings.
    pub session: Arc<SessionConfig>,
    /// Where the listed account comes from.
    pub account: AccountSource,
}

impl AppState {
    /// Creates state reading the account from the environment.
    pub fn new(github: GitHubClient, session: SessionConfig) -> Self {
        Self {
            github,
            session: Arc::new(session),
            account: AccountSource::Environment,
        }
    }

    /// Pins the listed account instead of reading the environment.
    pub fn with_account(mut self, account: Account) -> Self {
        self.account = AccountSource::Fixed(account);
        self
    }
}

/// Source of the listed account.
#[derive(Debug, Clone)]
pub enum AccountSource {
    /// `GITHUB_USERNAME` / `GITHUB_TOKEN`, read on every request.
    Environment,
    /// A fixed account.
    Fixed(Account),
}

impl AccountSource {
    /// Returns the account to use for the current request.
    pub fn resolve(&self) -> Account {
        match self {
            AccountSource::Environment => Account::from_env(),
            AccountSource::Fixed(account) => account.clone(),
        }
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("repository fetch failed: {0}")]
    Fetch(#[from] GitHubError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Fetch(GitHubError::MissingAccount) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Fetch(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Repository listing
        .route("/api/repos", get(list_repos))
        // Session-scoped GitHub proxy
        .merge(github_api::github_routes())
        .layer(request_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Lists the configured account's repositories.
async fn list_repos(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let account = state.account.resolve();

    match state.github.fetch_repos(&account).await {
        Ok(repos) => Ok(Json(repos)),
        Err(e) => {
            tracing::error!(error = %e, "Repository fetch failed");
            Err(e.into())
        }
    }
}
