//! Host events
//!
//! The host (a browser binding or a headless driver) translates its native
//! events into these and hands them to the page.

/// Viewport dimensions in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The smaller of the two dimensions (the CSS `vmin` base)
    pub fn vmin(&self) -> f32 {
        self.width.min(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// A page-level event
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The document scrolled; `y` is the absolute vertical offset
    Scroll { y: f32 },
    /// The viewport changed size
    Resize { width: f32, height: f32 },
    /// Pointer moved over an element, coordinates relative to the element's
    /// top-left corner
    PointerMove {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Pointer left the element
    PointerLeave,
}

impl Event {
    /// Whether this event invalidates scroll-driven layout
    pub fn affects_layout(&self) -> bool {
        matches!(self, Event::Scroll { .. } | Event::Resize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vmin() {
        assert_eq!(Viewport::new(1280.0, 800.0).vmin(), 800.0);
        assert_eq!(Viewport::new(390.0, 844.0).vmin(), 390.0);
    }

    #[test]
    fn test_affects_layout() {
        assert!(Event::Scroll { y: 10.0 }.affects_layout());
        assert!(Event::Resize {
            width: 100.0,
            height: 100.0
        }
        .affects_layout());
        assert!(!Event::PointerLeave.affects_layout());
    }
}
