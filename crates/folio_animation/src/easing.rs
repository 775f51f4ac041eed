//! Easing curves for scroll-driven interpolation
//!
//! Every curve maps 0 to 0 and 1 to 1 exactly, so a fully expanded or fully
//! collapsed hero lands on its design constants regardless of the curve.

use serde::{Deserialize, Serialize};

/// Progress curve, named as in `folio.toml` (`"ease-in-quad"`, ...)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    /// `t²`: slow start, used for the hero title's travel
    EaseInQuad,
    EaseOutQuad,
    EaseInCubic,
    EaseOutCubic,
    /// `3t² - 2t³`
    Smoothstep,
}

impl Easing {
    /// Map progress `t` (clamped to 0..=1) through the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - inv * inv,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - inv * inv * inv,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Linear interpolation from `from` (t = 0) to `to` (t = 1).
///
/// Both endpoints are reproduced exactly.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from * (1.0 - t) + to * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::Smoothstep,
    ];

    #[test]
    fn test_endpoints_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_in_quad_is_square() {
        assert_eq!(Easing::EaseInQuad.apply(0.5), 0.25);
        assert_eq!(Easing::EaseInQuad.apply(0.3), 0.3 * 0.3);
        assert_eq!(Easing::Smoothstep.apply(0.5), 0.5);
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= prev, "{easing:?} not monotonic at {i}");
                prev = value;
            }
        }
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Easing::EaseOutCubic.apply(-0.5), 0.0);
        assert_eq!(Easing::EaseInQuad.apply(2.0), 1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(16.0, 4.8, 0.0), 16.0);
        assert_eq!(lerp(16.0, 4.8, 1.0), 4.8);
        assert_eq!(lerp(40.0, -40.0, 0.5), 0.0);
    }

    #[test]
    fn test_deserialize_names() {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        let de: StrDeserializer<'_, Error> = "ease-in-quad".into_deserializer();
        assert_eq!(Easing::deserialize(de).unwrap(), Easing::EaseInQuad);
    }
}
