#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Everything here is driven by explicit time deltas: callers own the frame
//! clock and call [`Animation::tick`] with however much time has passed. No
//! animation reads wall-clock time on its own, which keeps playback
//! deterministic under test.
//!
//! - [`Easing`]: timing curves mapping linear progress to eased progress.
//! - [`Interpolate`]: values that can be blended between two endpoints.
//! - [`Tween`]: a duration-based transition between two [`Interpolate`]
//!   values.
//! - [`Spring`]: a damped harmonic oscillator for springy motion.

pub mod spring;
pub mod tween;

use std::time::Duration;

pub use spring::Spring;
pub use tween::Tween;

/// A time-driven animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Normalized progress or position in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time accumulated past the end of the animation, if any.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Timing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Decelerating curve: starts fast, settles slowly.
    #[default]
    EaseOut,
    /// Accelerating curve.
    EaseIn,
    /// Smooth S-curve.
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a progress value. Input is clamped to [0.0, 1.0].
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Values that can be blended between two endpoints.
///
/// `t` is eased progress; implementations must return `self` at `t == 0.0`
/// and `to` at `t == 1.0`.
pub trait Interpolate: Clone {
    /// Blend from `self` toward `to` by `t`.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        if t <= 0.0 {
            *self
        } else if t >= 1.0 {
            *to
        } else {
            self + (to - self) * t
        }
    }
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        f64::from(*self).interpolate(&f64::from(*to), t) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseIn,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn ease_out_leads_linear() {
        for i in 1..10 {
            let t = f64::from(i) / 10.0;
            assert!(Easing::EaseOut.apply(t) > t);
        }
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_eq!(Easing::EaseOut.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(7.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn f64_interpolation_hits_endpoints() {
        assert_eq!(2.0f64.interpolate(&6.0, 0.0), 2.0);
        assert_eq!(2.0f64.interpolate(&6.0, 1.0), 6.0);
        assert_eq!(2.0f64.interpolate(&6.0, 0.25), 3.0);
    }
}
