//! Error types for upstream and proxy requests.

use thiserror::Error;

/// Coarse failure category shared by every boundary in the showcase.
///
/// Each category degrades to a neutral state rather than surfacing to the
/// end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No or invalid session credential.
    Unauthenticated,
    /// Non-2xx answer from the hosting API.
    UpstreamFailure,
    /// Transport-level failure.
    NetworkFailure,
}

/// GitHub and proxy request errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request needs a session credential that is missing or rejected.
    #[error("Authentication required")]
    Unauthenticated,

    /// The hosting API answered with a non-success status.
    #[error("GitHub API error {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No account identifier is configured for the repository listing.
    #[error("No GitHub account configured")]
    MissingAccount,
}

impl GitHubError {
    /// Returns the failure category.
    pub fn kind(&self) -> FailureKind {
        match self {
            GitHubError::Unauthenticated => FailureKind::Unauthenticated,
            GitHubError::Upstream { status: 401, .. } => FailureKind::Unauthenticated,
            GitHubError::Upstream { .. } => FailureKind::UpstreamFailure,
            GitHubError::InvalidResponse(_) => FailureKind::UpstreamFailure,
            GitHubError::MissingAccount => FailureKind::UpstreamFailure,
            GitHubError::Network(_) => FailureKind::NetworkFailure,
        }
    }

    /// Returns the upstream status code, if the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Unauthenticated => Some(401),
            GitHubError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GitHubError::InvalidResponse(e.to_string())
        } else {
            GitHubError::Network(e.to_string())
        }
    }
}

/// Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, GitHubError>;
