//! Scroll ratio
//!
//! Converts the absolute scroll offset into normalized hero-collapse
//! progress: 0 at the top of the page, 1 once the hero has shrunk to its
//! collapsed height.

use tracing::trace;

/// Normalized scroll progress, clamped to `[0, 1]`.
///
/// `scroll_y / (viewport_height - collapsed_height)`. When the viewport is
/// not taller than the collapsed hero there is no travel distance, so any
/// positive scroll counts as fully collapsed.
pub fn compute_ratio(scroll_y: f32, viewport_height: f32, collapsed_height: f32) -> f32 {
    let travel = viewport_height - collapsed_height;
    if !scroll_y.is_finite() || scroll_y <= 0.0 {
        return if scroll_y == f32::INFINITY { 1.0 } else { 0.0 };
    }
    if !travel.is_finite() || travel <= 0.0 {
        return 1.0;
    }
    (scroll_y / travel).clamp(0.0, 1.0)
}

/// Remembers the last emitted ratio and suppresses repeats
#[derive(Debug, Default)]
pub struct ScrollRatioEngine {
    last: Option<f32>,
    suppressed: u64,
}

impl ScrollRatioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the ratio for the current scroll position.
    ///
    /// Returns `None` when it equals the previously emitted ratio, in which
    /// case downstream layout does not need to run.
    pub fn update(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
        collapsed_height: f32,
    ) -> Option<f32> {
        let ratio = compute_ratio(scroll_y, viewport_height, collapsed_height);
        if self.last == Some(ratio) {
            self.suppressed += 1;
            trace!(ratio, "scroll ratio unchanged");
            return None;
        }
        self.last = Some(ratio);
        Some(ratio)
    }

    /// Last emitted ratio, if any
    pub fn last(&self) -> Option<f32> {
        self.last
    }

    /// Forget the last ratio so the next update always emits.
    ///
    /// Needed after a resize: the ratio may be unchanged while the layout
    /// derived from the viewport is not.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Updates that were suppressed as duplicates
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(compute_ratio(0.0, 800.0, 60.0), 0.0);
        assert_eq!(compute_ratio(740.0, 800.0, 60.0), 1.0);
        assert_eq!(compute_ratio(370.0, 800.0, 60.0), 0.5);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(compute_ratio(-50.0, 800.0, 60.0), 0.0);
        assert_eq!(compute_ratio(5000.0, 800.0, 60.0), 1.0);
        assert_eq!(compute_ratio(f32::NAN, 800.0, 60.0), 0.0);
        assert_eq!(compute_ratio(f32::INFINITY, 800.0, 60.0), 1.0);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        for (h, c) in [(800.0, 60.0), (61.0, 60.0), (2160.0, 120.0)] {
            let mut prev = 0.0;
            for step in 0..=3000 {
                let ratio = compute_ratio(step as f32, h, c);
                assert!((0.0..=1.0).contains(&ratio));
                assert!(ratio >= prev);
                prev = ratio;
            }
            assert_eq!(compute_ratio(h - c, h, c), 1.0);
        }
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(compute_ratio(0.0, 60.0, 60.0), 0.0);
        assert_eq!(compute_ratio(1.0, 60.0, 60.0), 1.0);
        assert_eq!(compute_ratio(1.0, 40.0, 60.0), 1.0);
    }

    #[test]
    fn test_engine_suppresses_repeats() {
        let mut engine = ScrollRatioEngine::new();

        assert_eq!(engine.update(0.0, 800.0, 60.0), Some(0.0));
        assert_eq!(engine.update(0.0, 800.0, 60.0), None);
        assert_eq!(engine.update(370.0, 800.0, 60.0), Some(0.5));
        // Both clamp to 1.0
        assert_eq!(engine.update(900.0, 800.0, 60.0), Some(1.0));
        assert_eq!(engine.update(1200.0, 800.0, 60.0), None);
        assert_eq!(engine.suppressed(), 2);
    }

    #[test]
    fn test_engine_reset() {
        let mut engine = ScrollRatioEngine::new();
        engine.update(100.0, 800.0, 60.0);
        engine.reset();
        assert_eq!(engine.last(), None);
        assert!(engine.update(100.0, 800.0, 60.0).is_some());
    }
}
