//! Hover preview placement and its invalidation.

use showcase_types::{Rect, RepositoryId};
use std::time::{Duration, Instant};

/// Offset below the container top when the hovered element is scrolled above
/// it.
pub const TOP_OFFSET: f64 = 10.0;

/// Offset past the container bottom when the hovered element overflows it.
pub const BOTTOM_OFFSET: f64 = 20.0;

/// Quiet window after the last scroll event before previews render again.
pub const SCROLL_QUIET: Duration = Duration::from_millis(150);

/// Computes where the preview card for `element` goes inside `container`.
///
/// The bottom clamp wins when both clamps apply.
pub fn hover_placement(element: Rect, container: Rect) -> Rect {
    let mut top = element.top;

    if element.top < container.top {
        top = container.top + TOP_OFFSET;
    }
    if element.bottom() > container.bottom() {
        top = container.bottom() + BOTTOM_OFFSET - element.height;
    }

    Rect { top, ..element }
}

/// The active hover entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPreview {
    pub repo: RepositoryId,
    pub placement: Rect,
}

/// Tracks the single hovered repository and the scrolling suppression flag.
#[derive(Debug, Default)]
pub struct HoverTracker {
    hovered: Option<HoverPreview>,
    scrolling: bool,
    quiet_deadline: Option<Instant>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered the card of `repo`.
    pub fn pointer_enter(&mut self, repo: RepositoryId, element: Rect, container: Rect) {
        self.hovered = Some(HoverPreview {
            repo,
            placement: hover_placement(element, container),
        });
    }

    /// Pointer left the hovered card.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// The scroll container scrolled at `now`.
    ///
    /// Clears the hover immediately and pushes the quiet deadline back.
    pub fn scroll(&mut self, now: Instant) {
        self.scrolling = true;
        self.hovered = None;
        self.quiet_deadline = Some(now + SCROLL_QUIET);
    }

    /// The viewport was resized.
    pub fn resize(&mut self) {
        self.hovered = None;
    }

    /// Fires due timers. Returns true if the scrolling flag cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.quiet_deadline {
            Some(deadline) if now >= deadline => {
                self.quiet_deadline = None;
                self.scrolling = false;
                true
            }
            _ => false,
        }
    }

    /// The pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.quiet_deadline
    }

    /// Cancels pending timers and drops all hover state.
    pub fn unmount(&mut self) {
        *self = Self::default();
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// The hovered entry, regardless of scrolling.
    pub fn hovered(&self) -> Option<&HoverPreview> {
        self.hovered.as_ref()
    }

    /// The preview to render. Suppressed while scrolling.
    pub fn preview(&self) -> Option<&HoverPreview> {
        if self.scrolling {
            return None;
        }
        self.hovered.as_ref()
    }
}
