//! Contact card tilt
//!
//! Contact cards lean toward the pointer: the card box rotates in 3D, its
//! shadow shifts, and the icon and icon shadow follow with smaller factors.
//! Pointer moves are coalesced to one update per frame; leaving the card
//! resets every transform immediately. Small viewports (touch devices)
//! disable the effect.

use folio_core::{FrameScheduler, Surface, Viewport};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tilt constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Narrower viewports get no tilt (px)
    pub min_viewport_width: f32,
    /// CSS perspective distance (rem)
    pub perspective_rem: f32,
    /// Resting X rotation of the card box (deg)
    pub base_tilt_deg: f32,
    /// CSS color for the card shadow
    pub shadow_color: String,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 600.0,
            perspective_rem: 30.0,
            base_tilt_deg: 45.0,
            shadow_color: "color-mix(in srgb, var(--color-bg-blue) 40%, transparent)".to_string(),
        }
    }
}

/// Transforms for one pointer offset from the card center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltTransform {
    pub box_rotate_x: f32,
    pub box_rotate_y: f32,
    pub shadow_x: f32,
    pub shadow_y: f32,
    pub icon_rotate_x: f32,
    pub icon_rotate_z: f32,
    pub icon_translate_x: f32,
    pub icon_translate_y: f32,
    pub icon_shadow_rotate_z: f32,
    pub icon_shadow_translate_x: f32,
    pub icon_shadow_translate_y: f32,
}

impl TiltTransform {
    /// `dx`/`dy` are the pointer offset from the card center in px
    pub fn from_offset(dx: f32, dy: f32, config: &TiltConfig) -> Self {
        Self {
            box_rotate_x: config.base_tilt_deg - dy / 10.0,
            box_rotate_y: dx / 10.0,
            shadow_x: dx / 20.0,
            shadow_y: 8.0 + dy / 20.0,
            icon_rotate_x: -dy / 10.0,
            icon_rotate_z: dx / 14.0,
            icon_translate_x: dx / 10.0,
            icon_translate_y: dy / 20.0,
            icon_shadow_rotate_z: dx / 10.0,
            icon_shadow_translate_x: dx / 5.0,
            icon_shadow_translate_y: dy / 10.0,
        }
    }

    pub fn box_css(&self, config: &TiltConfig) -> String {
        format!(
            "perspective({}rem) rotateX({}deg) rotateY({}deg)",
            config.perspective_rem, self.box_rotate_x, self.box_rotate_y
        )
    }

    pub fn shadow_css(&self, config: &TiltConfig) -> String {
        format!(
            "{}px {}px 16px {}",
            self.shadow_x, self.shadow_y, config.shadow_color
        )
    }

    pub fn icon_css(&self, config: &TiltConfig) -> String {
        format!(
            "perspective({}rem) rotateX({}deg) rotateZ({}deg) translateX({}px) translateY({}px)",
            config.perspective_rem,
            self.icon_rotate_x,
            self.icon_rotate_z,
            self.icon_translate_x,
            self.icon_translate_y
        )
    }

    pub fn icon_shadow_css(&self, config: &TiltConfig) -> String {
        format!(
            "perspective({}rem) rotateZ({}deg) translateX({}px) translateY({}px)",
            config.perspective_rem,
            self.icon_shadow_rotate_z,
            self.icon_shadow_translate_x,
            self.icon_shadow_translate_y
        )
    }
}

/// Surfaces of one contact card
#[derive(Debug, Default)]
pub struct TiltSurfaces {
    pub card_box: Surface,
    pub icon: Surface,
    pub icon_shadow: Surface,
}

/// Per-frame state handed to the tilt frame callback
struct TiltFrame {
    config: TiltConfig,
    surfaces: TiltSurfaces,
    /// Latest pointer offset from the card center
    pointer: Option<(f32, f32)>,
}

/// Tilt controller for one contact card
pub struct ContactTilt {
    frame: TiltFrame,
    scheduler: FrameScheduler<TiltFrame>,
    enabled: bool,
}

impl ContactTilt {
    pub fn new(config: TiltConfig, surfaces: TiltSurfaces, viewport: Viewport) -> Self {
        let enabled = viewport.width >= config.min_viewport_width;
        if !enabled {
            debug!(width = viewport.width, "contact tilt disabled for narrow viewport");
        }

        let mut scheduler = FrameScheduler::new();
        scheduler.register(|frame: &mut TiltFrame, _| {
            let Some((dx, dy)) = frame.pointer else {
                return;
            };
            let tilt = TiltTransform::from_offset(dx, dy, &frame.config);
            let config = &frame.config;
            frame
                .surfaces
                .card_box
                .set_style("transform", &tilt.box_css(config));
            frame
                .surfaces
                .card_box
                .set_style("box-shadow", &tilt.shadow_css(config));
            frame
                .surfaces
                .icon
                .set_style("transform", &tilt.icon_css(config));
            frame
                .surfaces
                .icon_shadow
                .set_style("transform", &tilt.icon_shadow_css(config));
        });

        Self {
            frame: TiltFrame {
                config,
                surfaces,
                pointer: None,
            },
            scheduler,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pointer moved to (`x`, `y`) within a card of `width` x `height`.
    ///
    /// Returns `true` when the host must request an animation frame.
    pub fn pointer_move(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.frame.pointer = Some((x - width / 2.0, y - height / 2.0));
        self.scheduler.notify()
    }

    /// Pointer left the card: drop any pending frame and reset transforms
    pub fn pointer_leave(&mut self) {
        if !self.enabled {
            return;
        }
        self.frame.pointer = None;
        self.scheduler.cancel();
        let surfaces = &mut self.frame.surfaces;
        surfaces.card_box.clear_style("transform");
        surfaces.card_box.clear_style("box-shadow");
        surfaces.icon.clear_style("transform");
        surfaces.icon_shadow.clear_style("transform");
    }

    /// Apply the latest pointer offset if a frame is pending
    pub fn run_frame(&mut self, timestamp_ms: f64) -> bool {
        self.scheduler.run_frame(&mut self.frame, timestamp_ms)
    }
}

impl std::fmt::Debug for ContactTilt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactTilt")
            .field("enabled", &self.enabled)
            .field("pointer", &self.frame.pointer)
            .field("pending", &self.scheduler.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::StyleTarget;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Styles(Rc<RefCell<BTreeMap<String, String>>>);

    impl Styles {
        fn get(&self, property: &str) -> Option<String> {
            self.0.borrow().get(property).cloned()
        }
    }

    impl StyleTarget for Styles {
        fn set_style(&mut self, property: &str, value: &str) {
            self.0
                .borrow_mut()
                .insert(property.to_string(), value.to_string());
        }

        fn clear_style(&mut self, property: &str) {
            self.0.borrow_mut().remove(property);
        }

        fn set_class(&mut self, _class: &str, _enabled: bool) {}

        fn set_text(&mut self, _text: &str) {}
    }

    fn card(viewport: Viewport) -> (ContactTilt, Styles, Styles, Styles) {
        let card_box = Styles::default();
        let icon = Styles::default();
        let icon_shadow = Styles::default();
        let tilt = ContactTilt::new(
            TiltConfig::default(),
            TiltSurfaces {
                card_box: Surface::new(card_box.clone()),
                icon: Surface::new(icon.clone()),
                icon_shadow: Surface::new(icon_shadow.clone()),
            },
            viewport,
        );
        (tilt, card_box, icon, icon_shadow)
    }

    #[test]
    fn test_transform_at_center() {
        let tilt = TiltTransform::from_offset(0.0, 0.0, &TiltConfig::default());
        assert_eq!(tilt.box_rotate_x, 45.0);
        assert_eq!(tilt.box_rotate_y, 0.0);
        assert_eq!(tilt.shadow_y, 8.0);
    }

    #[test]
    fn test_transform_factors() {
        let config = TiltConfig::default();
        let tilt = TiltTransform::from_offset(140.0, -40.0, &config);
        assert_eq!(tilt.box_rotate_x, 49.0);
        assert_eq!(tilt.box_rotate_y, 14.0);
        assert_eq!(tilt.shadow_x, 7.0);
        assert_eq!(tilt.shadow_y, 6.0);
        assert_eq!(tilt.icon_rotate_z, 10.0);
        assert_eq!(tilt.icon_shadow_translate_x, 28.0);
        assert_eq!(
            tilt.box_css(&config),
            "perspective(30rem) rotateX(49deg) rotateY(14deg)"
        );
    }

    #[test]
    fn test_pointer_moves_coalesce_to_latest() {
        let (mut tilt, card_box, _, icon_shadow) = card(Viewport::new(1280.0, 800.0));

        assert!(tilt.pointer_move(10.0, 10.0, 200.0, 100.0));
        assert!(!tilt.pointer_move(200.0, 50.0, 200.0, 100.0));
        assert!(tilt.run_frame(16.0));

        // Offset (100, 0) from the center
        assert_eq!(
            card_box.get("transform").as_deref(),
            Some("perspective(30rem) rotateX(45deg) rotateY(10deg)")
        );
        assert_eq!(
            icon_shadow.get("transform").as_deref(),
            Some("perspective(30rem) rotateZ(10deg) translateX(20px) translateY(0px)")
        );
    }

    #[test]
    fn test_leave_resets() {
        let (mut tilt, card_box, icon, icon_shadow) = card(Viewport::new(1280.0, 800.0));

        tilt.pointer_move(0.0, 0.0, 200.0, 100.0);
        tilt.run_frame(16.0);
        assert!(card_box.get("transform").is_some());

        tilt.pointer_leave();
        assert_eq!(card_box.get("transform"), None);
        assert_eq!(card_box.get("box-shadow"), None);
        assert_eq!(icon.get("transform"), None);
        assert_eq!(icon_shadow.get("transform"), None);

        // A frame already requested before leaving applies nothing
        tilt.pointer_move(0.0, 0.0, 200.0, 100.0);
        tilt.pointer_leave();
        assert!(!tilt.run_frame(32.0));
        assert_eq!(card_box.get("transform"), None);

        // The next move asks for a frame again
        assert!(tilt.pointer_move(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_disabled_on_narrow_viewport() {
        let (mut tilt, card_box, _, _) = card(Viewport::new(390.0, 844.0));
        assert!(!tilt.is_enabled());
        assert!(!tilt.pointer_move(10.0, 10.0, 200.0, 100.0));
        assert!(!tilt.run_frame(16.0));
        assert_eq!(card_box.get("transform"), None);
    }
}
