//! # Repo Card
//!
//! Per-card view state: the repository summary and the star toggle.
//!
//! ```text
//!  Idle(false) ──click_star──▶ Starring ──ok──▶ Idle(true)
//!       ▲                         │
//!       └──── 401 (navigate) ─────┤
//!       └──── other failure ──────┘
//!
//!  Idle(true) ──click_unstar──▶ ConfirmingUnstar ──No──▶ Idle(true)
//!                                     │
//!                                    Yes
//!                                     ▼
//!                               MessageShown ──3s──▶ Idle(true)
//! ```
//!
//! Unstarring is never sent upstream; confirming it only shows a refusal.

use chrono::{DateTime, Utc};
use showcase_github::{GitHubError, StarRequest, StarResponse, StarStore, StarredStatus};
use showcase_types::Repository;
use std::time::{Duration, Instant};

use crate::context::RepoContext;

/// Route the page navigates to when starring requires a login.
pub const LOGIN_PATH: &str = "/api/github/login";

/// Message shown after confirming an unstar.
pub const NOT_ALLOWED_MESSAGE: &str = "😆 Not allowed!";

/// How long the refusal message stays up.
pub const MESSAGE_DURATION: Duration = Duration::from_millis(3000);

/// Star toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle { starred: bool },
    /// Star request in flight.
    Starring,
    /// Inline Yes/No prompt replacing the card content.
    ConfirmingUnstar,
    /// Refusal message, dismissed at `until`.
    MessageShown { until: Instant },
}

/// Answer to the unstar prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
}

/// Side effect requested by the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEffect {
    None,
    /// Issue a star request.
    SendStar(StarRequest),
    /// The server confirmed the star; publish it to the shared context.
    Starred { name: String, count: Option<u64> },
    /// Navigate the whole page.
    Navigate(String),
    /// Call [`RepoCard::tick`] at this instant.
    ScheduleDismiss(Instant),
}

/// Whether a click may reach outer handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stopped,
}

/// Outcome of a click on one of the card's controls.
///
/// Controls always stop propagation and prevent the default action, so the
/// click neither follows the card's outer link nor reaches hover tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub effect: CardEffect,
    pub propagation: Propagation,
    pub default_prevented: bool,
}

impl Click {
    fn handled(effect: CardEffect) -> Self {
        Self {
            effect,
            propagation: Propagation::Stopped,
            default_prevented: true,
        }
    }
}

/// View state of one repository card.
#[derive(Debug, Clone)]
pub struct RepoCard {
    owner: String,
    name: String,
    html_url: String,
    description: Option<String>,
    language: Option<String>,
    updated_at: DateTime<Utc>,
    count: u64,
    state: CardState,
    login_path: String,
}

impl RepoCard {
    /// Creates an un-starred card showing the record's star count.
    pub fn new(repo: &Repository) -> Self {
        Self {
            owner: repo.owner.clone(),
            name: repo.name.clone(),
            html_url: repo.html_url.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            updated_at: repo.updated_at,
            count: repo.stargazers_count,
            state: CardState::Idle { starred: false },
            login_path: LOGIN_PATH.to_string(),
        }
    }

    /// Creates a card seeded with the shared context's star state and
    /// display count for `repo`.
    pub fn from_context(repo: &Repository, context: &RepoContext) -> Self {
        let mut card = Self::new(repo);
        if let Some(count) = context.count(&repo.name) {
            card.count = count;
        }
        card.state = CardState::Idle {
            starred: context.is_starred(&repo.name),
        };
        card
    }

    /// Overrides the login route.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Applies the starred check done on mount. Only an authenticated
    /// positive answer changes anything.
    pub fn sync_starred(&mut self, status: StarredStatus) {
        if status.authed && status.starred && self.state == (CardState::Idle { starred: false }) {
            self.state = CardState::Idle { starred: true };
        }
    }

    /// Runs the starred check against `store`. Failures are ignored.
    pub async fn check_starred<S: StarStore + ?Sized>(&mut self, store: &S) {
        match store.starred(&self.owner, &self.name).await {
            Ok(status) => self.sync_starred(status),
            Err(e) => tracing::debug!(repo = %self.name, error = %e, "Starred check failed"),
        }
    }

    /// Star button clicked.
    pub fn click_star(&mut self) -> Click {
        if self.state != (CardState::Idle { starred: false }) {
            return Click::handled(CardEffect::None);
        }

        self.state = CardState::Starring;
        Click::handled(CardEffect::SendStar(StarRequest {
            owner: self.owner.clone(),
            repo: self.name.clone(),
        }))
    }

    /// Completes an in-flight star request.
    pub fn complete_star(&mut self, result: Result<StarResponse, GitHubError>) -> CardEffect {
        if self.state != CardState::Starring {
            return CardEffect::None;
        }

        match result {
            Ok(response) if response.ok => {
                if let Some(count) = response.count {
                    self.count = count;
                }
                self.state = CardState::Idle { starred: true };
                CardEffect::Starred {
                    name: self.name.clone(),
                    count: response.count,
                }
            }
            Ok(_) => {
                self.state = CardState::Idle { starred: false };
                CardEffect::None
            }
            Err(GitHubError::Unauthenticated) => {
                self.state = CardState::Idle { starred: false };
                CardEffect::Navigate(self.login_path.clone())
            }
            Err(e) => {
                tracing::debug!(repo = %self.name, error = %e, "Star request failed");
                self.state = CardState::Idle { starred: false };
                CardEffect::None
            }
        }
    }

    /// Clicks the star button and drives the request through `store`.
    pub async fn star<S: StarStore + ?Sized>(&mut self, store: &S) -> CardEffect {
        match self.click_star().effect {
            CardEffect::SendStar(request) => {
                let result = store.star(&request.owner, &request.repo).await;
                self.complete_star(result)
            }
            other => other,
        }
    }

    /// Unstar button clicked.
    pub fn click_unstar(&mut self) -> Click {
        if self.state == (CardState::Idle { starred: true }) {
            self.state = CardState::ConfirmingUnstar;
        }
        Click::handled(CardEffect::None)
    }

    /// Answers the unstar prompt at `now`.
    pub fn confirm_unstar(&mut self, choice: Confirm, now: Instant) -> Click {
        if self.state != CardState::ConfirmingUnstar {
            return Click::handled(CardEffect::None);
        }

        match choice {
            Confirm::No => {
                self.state = CardState::Idle { starred: true };
                Click::handled(CardEffect::None)
            }
            Confirm::Yes => {
                let until = now + MESSAGE_DURATION;
                self.state = CardState::MessageShown { until };
                Click::handled(CardEffect::ScheduleDismiss(until))
            }
        }
    }

    /// Fires due timers. Returns true if the message was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            CardState::MessageShown { until } if now >= until => {
                self.state = CardState::Idle { starred: true };
                true
            }
            _ => false,
        }
    }

    /// The pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            CardState::MessageShown { until } => Some(until),
            _ => None,
        }
    }

    /// Cancels the pending dismissal.
    pub fn unmount(&mut self) {
        if let CardState::MessageShown { .. } = self.state {
            self.state = CardState::Idle { starred: true };
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_starred(&self) -> bool {
        self.state == CardState::Idle { starred: true }
    }

    /// Displayed star count.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target of the card's outer link.
    pub fn html_url(&self) -> &str {
        &self.html_url
    }

    /// Message replacing the card content, if shown.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            CardState::MessageShown { .. } => Some(NOT_ALLOWED_MESSAGE),
            _ => None,
        }
    }

    /// Label of the star button. `None` while the content is replaced by the
    /// prompt or the message.
    pub fn star_label(&self) -> Option<String> {
        match self.state {
            CardState::Idle { starred: false } => Some(format!("{} ☆", self.count)),
            CardState::Idle { starred: true } => Some(format!("{}⭐", self.count)),
            CardState::Starring => Some("Starring...".to_string()),
            CardState::ConfirmingUnstar | CardState::MessageShown { .. } => None,
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }

    pub fn language_text(&self) -> &str {
        self.language.as_deref().unwrap_or("Unknown")
    }

    /// Footer line, e.g. `Updated Mar 4, 2024`.
    pub fn updated_label(&self) -> String {
        format!("Updated {}", self.updated_at.format("%b %-d, %Y"))
    }
}
