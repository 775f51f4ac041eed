//! Hero layout animator
//!
//! The page header ("hero") collapses continuously as the page scrolls. The
//! scroll ratio is mapped to a [`HeroVisualState`] by a pure function, and
//! [`HeroAnimator::apply`] then writes that state to the four hero surfaces
//! (container, background, icon, title).
//!
//! Every mapping reproduces its design constant exactly at ratio 0 (expanded)
//! and ratio 1 (collapsed) and is continuous in between.

use folio_core::{Surface, Viewport};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::easing::{lerp, Easing};

/// Root font size used to resolve `rem` values
const ROOT_FONT_PX: f32 = 16.0;

/// Hero geometry and animation constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Height of the fully collapsed hero (px)
    pub collapsed_height: f32,
    /// Title left edge once collapsed (px)
    pub final_title_left: f32,
    /// Title vertical center once collapsed (px)
    pub final_title_top: f32,
    /// Title vertical position when expanded, as a fraction of viewport height
    pub title_rest_fraction: f32,
    /// Icon offset at either end of its travel (vh); +travel expanded, -travel collapsed
    pub icon_travel_vh: f32,
    /// Background blur once collapsed (px)
    pub max_blur: f32,
    /// Extra background scale once collapsed
    pub scale_gain: f32,
    /// Upward background shift once collapsed (px)
    pub background_parallax: f32,
    /// Background opacity once collapsed
    pub collapsed_background_opacity: f32,
    pub font_min_rem: f32,
    pub font_max_rem: f32,
    /// Preferred title size when expanded (vmin)
    pub font_ideal_expanded_vmin: f32,
    /// Preferred title size when collapsed (vmin)
    pub font_ideal_collapsed_vmin: f32,
    /// Curve for the title's horizontal travel and centering translation
    pub title_easing: Easing,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            collapsed_height: 60.0,
            final_title_left: 15.0,
            final_title_top: 30.0,
            title_rest_fraction: 0.55,
            icon_travel_vh: 40.0,
            max_blur: 5.0,
            scale_gain: 0.2,
            background_parallax: 0.0,
            collapsed_background_opacity: 1.0,
            font_min_rem: 2.5,
            font_max_rem: 8.0,
            font_ideal_expanded_vmin: 16.0,
            font_ideal_collapsed_vmin: 4.8,
            title_easing: Easing::EaseInQuad,
        }
    }
}

/// CSS `clamp(min, ideal, max)` for the title font size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizeClamp {
    pub min_rem: f32,
    pub ideal_vmin: f32,
    pub max_rem: f32,
}

impl FontSizeClamp {
    pub fn css(&self) -> String {
        format!(
            "clamp({}rem, {}vmin, {}rem)",
            self.min_rem, self.ideal_vmin, self.max_rem
        )
    }

    /// Resolved size in px for a viewport
    pub fn resolve_px(&self, viewport: Viewport) -> f32 {
        let ideal = self.ideal_vmin * viewport.vmin() / 100.0;
        ideal.clamp(self.min_rem * ROOT_FONT_PX, self.max_rem * ROOT_FONT_PX)
    }
}

/// Snapshot of every animated hero property for one ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroVisualState {
    /// Container height (px)
    pub container_height: f32,
    /// Background blur radius (px)
    pub background_blur: f32,
    pub background_scale: f32,
    /// Background vertical offset (px)
    pub background_offset_y: f32,
    pub background_opacity: f32,
    pub title_font_size: FontSizeClamp,
    /// Title anchor left (px)
    pub title_left: f32,
    /// Title anchor top (px)
    pub title_top: f32,
    /// Horizontal centering translation (percent of title width)
    pub title_translate_x: f32,
    /// Icon wrapper top (vh)
    pub icon_top: f32,
}

impl HeroVisualState {
    /// Map a scroll ratio to the hero's visual state
    pub fn compute(ratio: f32, config: &HeroConfig, viewport: Viewport) -> Self {
        let r = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let eased = config.title_easing.apply(r);
        let travel = viewport.height - config.collapsed_height;

        Self {
            container_height: (1.0 - r) * travel + config.collapsed_height,
            background_blur: r * config.max_blur,
            background_scale: 1.0 + r * config.scale_gain,
            background_offset_y: 0.0 - r * config.background_parallax,
            background_opacity: lerp(1.0, config.collapsed_background_opacity, r),
            title_font_size: FontSizeClamp {
                min_rem: config.font_min_rem,
                ideal_vmin: lerp(
                    config.font_ideal_expanded_vmin,
                    config.font_ideal_collapsed_vmin,
                    r,
                ),
                max_rem: config.font_max_rem,
            },
            title_left: config.final_title_left * eased + viewport.width / 2.0 * (1.0 - eased),
            title_top: config.final_title_top * r
                + viewport.height * config.title_rest_fraction * (1.0 - r),
            title_translate_x: 50.0 * (1.0 - eased),
            icon_top: lerp(config.icon_travel_vh, -config.icon_travel_vh, r),
        }
    }

    /// Resting state at the top of the page
    pub fn expanded(config: &HeroConfig, viewport: Viewport) -> Self {
        Self {
            container_height: viewport.height,
            background_blur: 0.0,
            background_scale: 1.0,
            background_offset_y: 0.0,
            background_opacity: 1.0,
            title_font_size: FontSizeClamp {
                min_rem: config.font_min_rem,
                ideal_vmin: config.font_ideal_expanded_vmin,
                max_rem: config.font_max_rem,
            },
            title_left: viewport.width / 2.0,
            title_top: viewport.height * config.title_rest_fraction,
            title_translate_x: 50.0,
            icon_top: config.icon_travel_vh,
        }
    }

    /// Resting state once the hero is fully collapsed
    pub fn collapsed(config: &HeroConfig) -> Self {
        Self {
            container_height: config.collapsed_height,
            background_blur: config.max_blur,
            background_scale: 1.0 + config.scale_gain,
            background_offset_y: 0.0 - config.background_parallax,
            background_opacity: config.collapsed_background_opacity,
            title_font_size: FontSizeClamp {
                min_rem: config.font_min_rem,
                ideal_vmin: config.font_ideal_collapsed_vmin,
                max_rem: config.font_max_rem,
            },
            title_left: config.final_title_left,
            title_top: config.final_title_top,
            title_translate_x: 0.0,
            icon_top: -config.icon_travel_vh,
        }
    }
}

/// The four hero surfaces
#[derive(Debug, Default)]
pub struct HeroTargets {
    pub container: Surface,
    pub background: Surface,
    pub icon: Surface,
    pub title: Surface,
}

/// Applies ratio-derived hero layout to its surfaces
#[derive(Debug)]
pub struct HeroAnimator {
    config: HeroConfig,
    targets: HeroTargets,
    applied: u64,
}

impl HeroAnimator {
    pub fn new(config: HeroConfig, targets: HeroTargets) -> Self {
        Self {
            config,
            targets,
            applied: 0,
        }
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    /// Number of times a state has been written to the surfaces
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Compute the state for `ratio` and write it to every surface.
    ///
    /// All four surfaces are written in one call, so a frame never shows a
    /// mix of two ratios.
    pub fn apply(&mut self, ratio: f32, viewport: Viewport) -> HeroVisualState {
        let state = HeroVisualState::compute(ratio, &self.config, viewport);
        trace!(ratio, height = state.container_height, "applying hero layout");

        let targets = &mut self.targets;

        targets
            .container
            .set_style("height", &format!("{}px", state.container_height));

        targets
            .background
            .set_style("filter", &format!("blur({}px)", state.background_blur));
        targets.background.set_style(
            "transform",
            &format!(
                "translateY({}px) scale({})",
                state.background_offset_y, state.background_scale
            ),
        );
        targets
            .background
            .set_style("opacity", &state.background_opacity.to_string());

        targets
            .icon
            .set_style("top", &format!("{}vh", state.icon_top));

        targets
            .title
            .set_style("font-size", &state.title_font_size.css());
        targets
            .title
            .set_style("left", &format!("{}px", state.title_left));
        targets
            .title
            .set_style("top", &format!("{}px", state.title_top));
        targets.title.set_style(
            "transform",
            &format!("translate(-{}%, -50%)", state.title_translate_x),
        );

        self.applied += 1;
        state
    }
}
