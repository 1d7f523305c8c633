//! Session-scoped GitHub proxy endpoints.
//!
//! The upstream credential travels in the session cookie and is attached as
//! a bearer token to each forwarded request. Every endpoint answers with its
//! neutral JSON shape on failure; only the status code varies.
//!
//! ## Endpoints
//!
//! - `GET /api/github/starred-list` - Repositories starred by the session user
//! - `GET /api/github/starred?owner=&repo=` - Star status of one repository
//! - `POST /api/github/star` - Star a repository and read back its count

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use showcase_github::{
    FailureKind, GitHubClient, GitHubError, StarRequest, StarResponse, StarredList, StarredStatus,
};

use crate::api::AppState;
use crate::session::session_token;

/// Creates the proxy routes.
pub fn github_routes() -> Router<AppState> {
    Router::new()
        .route("/api/github/starred-list", get(starred_list))
        .route("/api/github/starred", get(starred))
        .route("/api/github/star", post(star))
}

/// Returns an upstream client carrying the session credential, if any.
fn session_client(state: &AppState, headers: &HeaderMap) -> Option<GitHubClient> {
    session_token(headers, &state.session.cookie_name)
        .map(|token| state.github.with_token(Some(token)))
}

/// Status code a failed upstream call is answered with.
fn failure_status(error: &GitHubError) -> StatusCode {
    match error.kind() {
        FailureKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        FailureKind::UpstreamFailure => error
            .status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        FailureKind::NetworkFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error text surfaced to the caller. Only transport-level failures carry
/// one; upstream answers are reported through the status code alone.
fn failure_message(error: &GitHubError) -> Option<String> {
    match error {
        GitHubError::Network(_) | GitHubError::InvalidResponse(_) => Some(error.to_string()),
        _ => None,
    }
}

/// Lists the session user's starred repositories.
async fn starred_list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(client) = session_client(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, Json(StarredList::unauthenticated())).into_response();
    };

    match client.list_starred().await {
        Ok(repos) => {
            tracing::debug!(count = repos.len(), "Listed starred repositories");
            Json(StarredList {
                authed: true,
                repos,
                error: None,
            })
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Starred list request failed");
            let body = StarredList {
                error: failure_message(&e),
                ..StarredList::unauthenticated()
            };
            (failure_status(&e), Json(body)).into_response()
        }
    }
}

/// Query of `GET /api/github/starred`.
#[derive(Debug, serde::Deserialize)]
struct StarredQuery {
    owner: String,
    repo: String,
}

#[derive(serde::Serialize)]
struct StarredBody {
    #[serde(flatten)]
    status: StarredStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<StarredStatus> for StarredBody {
    fn from(status: StarredStatus) -> Self {
        Self {
            status,
            error: None,
        }
    }
}

/// Reports whether the session user starred one repository.
async fn starred(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StarredQuery>,
) -> Response {
    let Some(client) = session_client(&state, &headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(StarredBody::from(StarredStatus::default())),
        )
            .into_response();
    };

    match client.is_starred(&query.owner, &query.repo).await {
        Ok(starred) => Json(StarredBody::from(StarredStatus {
            authed: true,
            starred,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(
                owner = %query.owner,
                repo = %query.repo,
                error = %e,
                "Star status request failed"
            );
            let body = StarredBody {
                status: StarredStatus::default(),
                error: failure_message(&e),
            };
            (failure_status(&e), Json(body)).into_response()
        }
    }
}

/// Stars a repository and echoes its new star count.
async fn star(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<StarRequest>,
) -> Response {
    let Some(client) = session_client(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, Json(StarResponse::default())).into_response();
    };

    if let Err(e) = client.star(&request.owner, &request.repo).await {
        tracing::warn!(
            owner = %request.owner,
            repo = %request.repo,
            error = %e,
            "Star request failed"
        );
        let body = StarResponse {
            error: failure_message(&e),
            ..StarResponse::default()
        };
        return (failure_status(&e), Json(body)).into_response();
    }

    let count = match client.star_count(&request.owner, &request.repo).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(
                owner = %request.owner,
                repo = %request.repo,
                error = %e,
                "Failed to read star count"
            );
            None
        }
    };

    tracing::info!(owner = %request.owner, repo = %request.repo, ?count, "Starred repository");

    Json(StarResponse {
        ok: true,
        count,
        error: None,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_status_mapping() {
        assert_eq!(
            failure_status(&GitHubError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            failure_status(&GitHubError::Upstream {
                status: 403,
                body: String::new()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            failure_status(&GitHubError::Network("refused".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            failure_status(&GitHubError::InvalidResponse("eof".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_transport_failures_carry_message() {
        assert!(failure_message(&GitHubError::Network("refused".into())).is_some());
        assert!(failure_message(&GitHubError::Upstream {
            status: 500,
            body: "boom".into()
        })
        .is_none());
        assert!(failure_message(&GitHubError::Unauthenticated).is_none());
    }
}
