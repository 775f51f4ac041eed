//! Folio Animation
//!
//! Scroll-driven layout interpolation for the page header and pointer-driven
//! card effects.
//!
//! # Features
//!
//! - **Scroll Ratio**: Normalized, clamped scroll progress with duplicate suppression
//! - **Hero Layout**: Pure ratio → visual state mapping, applied to four surfaces
//! - **Easing**: Curves used by the interpolations
//! - **Contact Tilt**: 3D tilt transforms following the pointer over a card

pub mod easing;
pub mod hero;
pub mod scroll_ratio;
pub mod tilt;

pub use easing::{lerp, Easing};
pub use hero::{FontSizeClamp, HeroAnimator, HeroConfig, HeroTargets, HeroVisualState};
pub use scroll_ratio::{compute_ratio, ScrollRatioEngine};
pub use tilt::{ContactTilt, TiltConfig, TiltSurfaces, TiltTransform};
