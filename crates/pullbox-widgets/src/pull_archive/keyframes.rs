#![forbid(unsafe_code)]

//! Keyframe catalog for the arrow-to-box release animation.
//!
//! Each [`ShapeDescriptor`] is one stage of the morph. Durations are counted
//! in frames of a fixed nominal budget ([`FrameBudget`]) so the whole
//! sequence can be slowed down uniformly for inspection.

use std::borrow::Cow;
use std::time::Duration;

/// Geometry parameters for one keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescriptor {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    /// Square top corners, leaving room for the lid.
    pub top_caps: bool,
    /// Step length in nominal frames. `None` means applied instantly.
    pub frames: Option<u32>,
    /// Length of the connector line that replaces the arrow.
    pub line_width: f64,
    /// Extra vertical offset of the connector line.
    pub line_shift: f64,
    pub cap_height: f64,
    /// Lid width. Non-positive means "no lid".
    pub cap_width: f64,
    /// How far the lid floats above the box top.
    pub cap_offset: f64,
    pub cap_corner: f64,
}

impl ShapeDescriptor {
    const BASE: Self = Self {
        width: 0.0,
        height: 0.0,
        corner_radius: 0.0,
        top_caps: false,
        frames: None,
        line_width: 8.0,
        line_shift: 0.0,
        cap_height: 0.0,
        cap_width: 0.0,
        cap_offset: 0.0,
        cap_corner: 3.0,
    };

    /// Whether this keyframe animates the lid.
    #[inline]
    pub fn has_cap(&self) -> bool {
        self.cap_width > 0.0
    }

    /// Whether this keyframe is applied without animation.
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.frames.is_none()
    }
}

/// The white circle behind the arrow, before any morphing.
pub const CIRCLE: ShapeDescriptor = ShapeDescriptor {
    width: 20.0,
    height: 20.0,
    corner_radius: 10.0,
    cap_height: -1.0,
    cap_width: -1.0,
    ..ShapeDescriptor::BASE
};

/// The five release keyframes, in play order.
pub static RELEASE_KEYFRAMES: [ShapeDescriptor; 5] = [
    ShapeDescriptor {
        width: 22.0,
        height: 18.0,
        corner_radius: 5.0,
        cap_height: 4.0,
        cap_width: 22.0,
        ..ShapeDescriptor::BASE
    },
    ShapeDescriptor {
        width: 24.0,
        height: 18.0,
        corner_radius: 3.0,
        frames: Some(2),
        cap_height: 6.0,
        cap_width: 24.0,
        cap_offset: 8.0,
        ..ShapeDescriptor::BASE
    },
    // lid lifts off
    ShapeDescriptor {
        width: 24.0,
        height: 18.0,
        corner_radius: 3.0,
        top_caps: true,
        frames: Some(5),
        cap_height: 6.0,
        cap_width: 24.0,
        cap_offset: 9.0,
        ..ShapeDescriptor::BASE
    },
    // squashed
    ShapeDescriptor {
        width: 26.0,
        height: 17.0,
        corner_radius: 3.0,
        top_caps: true,
        frames: Some(11),
        line_width: 12.0,
        line_shift: 2.0,
        cap_height: 6.0,
        cap_width: 26.0,
        cap_offset: 7.0,
        ..ShapeDescriptor::BASE
    },
    ShapeDescriptor {
        width: 24.0,
        height: 18.0,
        corner_radius: 3.0,
        top_caps: true,
        frames: Some(8),
        cap_height: 6.0,
        cap_width: 26.0,
        cap_offset: 7.5,
        ..ShapeDescriptor::BASE
    },
];

/// Converts frame counts to wall time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBudget {
    /// Frames per second-equivalent.
    pub frames: f64,
    /// Slow-motion multiplier, normally 1.
    pub scale: f64,
}

impl Default for FrameBudget {
    fn default() -> Self {
        Self {
            frames: 80.0,
            scale: 1.0,
        }
    }
}

impl FrameBudget {
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale: if scale.is_finite() && scale > 0.0 {
                scale
            } else {
                1.0
            },
            ..Self::default()
        }
    }

    /// Wall-clock length of `descriptor`'s step.
    pub fn duration_of(&self, descriptor: &ShapeDescriptor) -> Duration {
        match descriptor.frames {
            None | Some(0) => Duration::ZERO,
            Some(n) => Duration::try_from_secs_f64(f64::from(n) / self.frames * self.scale)
                .unwrap_or(Duration::MAX),
        }
    }
}

/// An ordered, read-only keyframe sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeCatalog {
    initial: ShapeDescriptor,
    steps: Cow<'static, [ShapeDescriptor]>,
}

impl Default for KeyframeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl KeyframeCatalog {
    /// The built-in circle-to-box sequence. Borrows the static table.
    pub fn standard() -> Self {
        Self {
            initial: CIRCLE,
            steps: Cow::Borrowed(&RELEASE_KEYFRAMES),
        }
    }

    /// A custom sequence starting from `initial`.
    pub fn custom(initial: ShapeDescriptor, steps: Vec<ShapeDescriptor>) -> Self {
        Self {
            initial,
            steps: Cow::Owned(steps),
        }
    }

    /// Shape shown before the sequence starts.
    #[inline]
    pub fn initial(&self) -> &ShapeDescriptor {
        &self.initial
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ShapeDescriptor> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.steps.iter()
    }

    /// Sum of every step's duration.
    pub fn total_duration(&self, budget: &FrameBudget) -> Duration {
        self.iter()
            .map(|d| budget.duration_of(d))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_shape() {
        let catalog = KeyframeCatalog::standard();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.get(0).is_some_and(ShapeDescriptor::is_instant));
        assert!(catalog.iter().skip(1).all(|d| !d.is_instant()));
        assert!(catalog.iter().all(ShapeDescriptor::has_cap));
        assert!(!catalog.initial().has_cap());
    }

    #[test]
    fn only_later_steps_have_top_caps() {
        let caps: Vec<bool> = RELEASE_KEYFRAMES.iter().map(|d| d.top_caps).collect();
        assert_eq!(caps, [false, false, true, true, true]);
    }

    #[test]
    fn squash_step_widens_connector() {
        let squash = &RELEASE_KEYFRAMES[3];
        assert_eq!(squash.line_width, 12.0);
        assert_eq!(squash.line_shift, 2.0);
        assert_eq!(RELEASE_KEYFRAMES[4].line_width, 8.0);
        assert_eq!(RELEASE_KEYFRAMES[4].cap_corner, 3.0);
    }

    #[test]
    fn frame_budget_durations() {
        let budget = FrameBudget::default();
        assert_eq!(budget.duration_of(&RELEASE_KEYFRAMES[0]), Duration::ZERO);
        assert_eq!(
            budget.duration_of(&RELEASE_KEYFRAMES[3]),
            Duration::from_secs_f64(11.0 / 80.0)
        );
        let total = KeyframeCatalog::standard().total_duration(&budget);
        assert!((total.as_secs_f64() - 26.0 / 80.0).abs() < 1e-9);
    }

    #[test]
    fn slow_motion_scales_every_step() {
        let slow = FrameBudget::with_scale(10.0);
        let total = KeyframeCatalog::standard().total_duration(&slow);
        assert!((total.as_secs_f64() - 3.25).abs() < 1e-9);
        assert_eq!(FrameBudget::with_scale(0.0).scale, 1.0);
    }

    #[test]
    fn unusable_scales_fall_back_or_saturate() {
        for scale in [f64::NAN, f64::INFINITY, -3.0] {
            assert_eq!(FrameBudget::with_scale(scale).scale, 1.0);
        }
        let huge = FrameBudget::with_scale(1e30);
        assert_eq!(huge.duration_of(&RELEASE_KEYFRAMES[1]), Duration::MAX);
        assert_eq!(
            KeyframeCatalog::standard().total_duration(&huge),
            Duration::MAX
        );
    }
}
