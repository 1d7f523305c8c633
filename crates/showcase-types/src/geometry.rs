//! Viewport geometry.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Returns the y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom() {
        let rect = Rect::new(100.0, 0.0, 200.0, 500.0);
        assert_eq!(rect.bottom(), 600.0);
    }
}
