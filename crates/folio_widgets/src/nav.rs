//! Navigation bar visibility
//!
//! The top navigation bar is hidden while the hero is (nearly) expanded and
//! shown once the scroll ratio reaches a threshold. Visibility is a two-state
//! machine; only a crossing of the threshold changes state, so the "show"
//! class is never re-applied for repeated updates on the same side.
//!
//! The bar is also "locked" while the hero is fully collapsed (ratio 1),
//! which the stylesheet uses to pin it.

use folio_core::fsm::{EventId, StateId, StateMachine, Transition};
use folio_core::Surface;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Navigation states
pub mod states {
    use super::StateId;

    pub const HIDDEN: StateId = 0;
    pub const VISIBLE: StateId = 1;
}

/// Navigation events
pub mod events {
    use super::EventId;

    /// Ratio at or above the threshold
    pub const ABOVE_THRESHOLD: EventId = 1;
    /// Ratio below the threshold
    pub const BELOW_THRESHOLD: EventId = 2;
}

/// Visibility of the navigation bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavVisibility {
    Hidden,
    Visible,
}

impl NavVisibility {
    fn from_state(state: StateId) -> Self {
        if state == states::VISIBLE {
            NavVisibility::Visible
        } else {
            NavVisibility::Hidden
        }
    }
}

/// Navigation constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Ratio at which the bar appears
    pub threshold: f32,
    pub show_class: String,
    pub lock_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            show_class: "show".to_string(),
            lock_class: "locked".to_string(),
        }
    }
}

/// Surfaces driven by the controller
#[derive(Debug, Default)]
pub struct NavSurfaces {
    pub bar: Surface,
}

/// Maps the scroll ratio to navigation bar visibility
pub struct NavVisibilityController {
    config: NavConfig,
    fsm: StateMachine,
    surfaces: NavSurfaces,
    locked: bool,
}

impl NavVisibilityController {
    pub fn new(config: NavConfig, surfaces: NavSurfaces) -> Self {
        let fsm = StateMachine::builder(states::HIDDEN)
            .on(states::HIDDEN, events::ABOVE_THRESHOLD, states::VISIBLE)
            .on(states::VISIBLE, events::BELOW_THRESHOLD, states::HIDDEN)
            .history_limit(16)
            .build();

        Self {
            config,
            fsm,
            surfaces,
            locked: false,
        }
    }

    pub fn visibility(&self) -> NavVisibility {
        NavVisibility::from_state(self.fsm.current_state())
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Recent visibility transitions
    pub fn history(&self) -> &[Transition] {
        self.fsm.history()
    }

    /// Feed a new scroll ratio.
    ///
    /// Returns the new visibility when the threshold was crossed, `None`
    /// when the bar stays as it was.
    pub fn update(&mut self, ratio: f32) -> Option<NavVisibility> {
        self.update_lock(ratio);

        let event = if ratio >= self.config.threshold {
            events::ABOVE_THRESHOLD
        } else {
            events::BELOW_THRESHOLD
        };

        let before = self.fsm.current_state();
        let after = self.fsm.send(event);
        if before == after {
            return None;
        }

        let visibility = NavVisibility::from_state(after);
        let visible = visibility == NavVisibility::Visible;
        self.surfaces
            .bar
            .set_class(&self.config.show_class, visible);
        debug!(ratio, ?visibility, "navigation visibility changed");

        Some(visibility)
    }

    fn update_lock(&mut self, ratio: f32) {
        let locked = ratio >= 1.0;
        if locked == self.locked {
            return;
        }
        self.locked = locked;
        self.surfaces
            .bar
            .set_class(&self.config.lock_class, locked);
        debug!(locked, "navigation lock changed");
    }
}

impl std::fmt::Debug for NavVisibilityController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavVisibilityController")
            .field("visibility", &self.visibility())
            .field("locked", &self.locked)
            .field("threshold", &self.config.threshold)
            .finish()
    }
}
