#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Springs drive motion that has to feel physical, such as labels sliding in
//! and out while the user is still dragging. Unlike a [`Tween`](super::Tween)
//! a spring has no fixed duration; it can be retargeted at any time and
//! carries its velocity into the new motion.
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! Springs are usually described by a **settle time** and a **damping
//! ratio** ζ rather than raw stiffness/damping:
//!
//! - ζ < 1: underdamped, overshoots once or more before settling.
//! - ζ = 1: critically damped.
//! - ζ > 1: overdamped.
//!
//! [`Spring::with_response`] converts those into stiffness and damping.
//!
//! # Invariants
//!
//! 1. `position()` is unclamped; `value()` clamps to [0.0, 1.0].
//! 2. A spring at rest stays at rest until `set_target()`, `snap_to()` or
//!    `reset()`.
//! 3. Stiffness is clamped to a small positive minimum.
//!
//! # Failure Modes
//!
//! - Large dt: subdivided into steps of at most 4ms for stability.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step.
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring is considered at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (combined with position) the spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// A damped spring moving a scalar toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `position`.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn at(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            initial: position,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            at_rest: true,
        }
    }

    /// Configure from a settle time and damping ratio (builder pattern).
    ///
    /// The natural period is taken as the settle time, so a 0.5 s response
    /// with ζ = 0.7 reaches its target in roughly half a second with a small
    /// overshoot.
    #[must_use]
    pub fn with_response(mut self, settle: Duration, damping_ratio: f64) -> Self {
        let period = settle.as_secs_f64().max(1e-3);
        let omega = std::f64::consts::TAU / period;
        self.stiffness = (omega * omega).max(MIN_STIFFNESS);
        self.damping = 2.0 * damping_ratio.max(0.0) * omega;
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold || !self.at_rest {
            self.target = target;
            self.at_rest = (self.position - target).abs() < self.rest_threshold
                && self.velocity.abs() < DEFAULT_VELOCITY_THRESHOLD;
        }
    }

    /// Jump to `position` and rest there.
    pub fn snap_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: velocity first, then position from the new velocity.
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }
        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < DEFAULT_VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.snap_to(self.initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(FRAME);
        }
    }

    #[test]
    fn new_spring_is_at_rest() {
        let spring = Spring::at(3.0);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 3.0);
    }

    #[test]
    fn converges_to_target() {
        let mut spring = Spring::at(0.0).with_response(Duration::from_millis(500), 0.7);
        spring.set_target(100.0);
        assert!(!spring.is_at_rest());
        run(&mut spring, 240);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 100.0);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let mut spring = Spring::at(0.0).with_response(Duration::from_millis(500), 0.3);
        spring.set_target(1.0);
        let mut peak = 0.0f64;
        for _ in 0..120 {
            spring.tick(FRAME);
            peak = peak.max(spring.position());
        }
        assert!(peak > 1.0, "peak {peak} should exceed target");
    }

    #[test]
    fn retarget_keeps_velocity() {
        let mut spring = Spring::at(0.0).with_response(Duration::from_millis(500), 0.7);
        spring.set_target(50.0);
        run(&mut spring, 5);
        let velocity = spring.velocity();
        spring.set_target(-50.0);
        assert_eq!(spring.velocity(), velocity);
        assert!(!spring.is_at_rest());
    }

    #[test]
    fn snap_and_reset() {
        let mut spring = Spring::at(2.0);
        spring.set_target(9.0);
        run(&mut spring, 3);
        spring.snap_to(5.0);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 5.0);
        spring.reset();
        assert_eq!(spring.position(), 2.0);
    }

    #[test]
    fn large_dt_is_stable() {
        let mut spring = Spring::at(0.0).with_response(Duration::from_millis(200), 1.0);
        spring.set_target(1.0);
        spring.tick(Duration::from_secs(5));
        assert!(spring.position().is_finite());
        assert!(spring.is_at_rest());
    }
}
