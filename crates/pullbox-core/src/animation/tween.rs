#![forbid(unsafe_code)]

//! Duration-based transition between two values.
//!
//! A [`Tween`] blends from a start value to a target over a fixed duration
//! using an [`Easing`] curve. Retargeting mid-flight starts the new
//! transition from the value currently on screen, so chained transitions
//! never jump.
//!
//! # Invariants
//!
//! 1. `current()` equals the start value before any tick and the target once
//!    complete.
//! 2. A zero-duration tween is complete on construction.
//! 3. `elapsed` only grows on `tick`; `overshoot()` reports how far past the
//!    duration the last tick went.

use std::time::Duration;

use super::{Animation, Easing, Interpolate};

/// A transition from one value to another over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween from `from` to `to`.
    #[must_use]
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// A settled tween holding `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self::new(value.clone(), value, Duration::ZERO, Easing::Linear)
    }

    /// Value at the current point of the transition.
    #[must_use]
    pub fn current(&self) -> T {
        if self.is_complete() {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, self.easing.apply(self.progress()))
    }

    /// The value being animated toward.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }

    /// Start a new transition from the current value toward `to`.
    pub fn animate_to(&mut self, to: T, duration: Duration, easing: Easing) {
        self.from = self.current();
        self.to = to;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.easing = easing;
    }

    /// Jump to `value` without animating.
    pub fn snap(&mut self, value: T) {
        self.from = value.clone();
        self.to = value;
        self.duration = Duration::ZERO;
        self.elapsed = Duration::ZERO;
    }

    /// Linear progress in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Configured duration of the current transition.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Easing curve of the current transition.
    #[inline]
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }
}

impl<T: Interpolate> Animation for Tween<T> {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        self.progress() as f32
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn zero_duration_is_complete_immediately() {
        let tween = Tween::new(0.0, 10.0, Duration::ZERO, Easing::EaseOut);
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 10.0);
    }

    #[test]
    fn linear_midpoint() {
        let mut tween: Tween<f64> = Tween::new(0.0, 10.0, MS_100, Easing::Linear);
        tween.tick(Duration::from_millis(50));
        assert!((tween.current() - 5.0).abs() < 1e-9);
        assert!(!tween.is_complete());
    }

    #[test]
    fn completes_and_reports_overshoot() {
        let mut tween = Tween::new(0.0, 1.0, MS_100, Easing::EaseOut);
        tween.tick(Duration::from_millis(130));
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 1.0);
        assert_eq!(tween.overshoot(), Duration::from_millis(30));
    }

    #[test]
    fn animate_to_starts_from_current_value() {
        let mut tween: Tween<f64> = Tween::new(0.0, 10.0, MS_100, Easing::Linear);
        tween.tick(Duration::from_millis(50));
        tween.animate_to(0.0, MS_100, Easing::Linear);
        assert!((tween.current() - 5.0).abs() < 1e-9);
        tween.tick(MS_100);
        assert_eq!(tween.current(), 0.0);
    }

    #[test]
    fn snap_discards_transition() {
        let mut tween = Tween::new(0.0, 10.0, MS_100, Easing::Linear);
        tween.snap(3.0);
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 3.0);
    }

    #[test]
    fn reset_rewinds_elapsed() {
        let mut tween = Tween::new(0.0, 4.0, MS_100, Easing::Linear);
        tween.tick(MS_100);
        tween.reset();
        assert_eq!(tween.current(), 0.0);
        assert_eq!(tween.value(), 0.0);
    }
}
