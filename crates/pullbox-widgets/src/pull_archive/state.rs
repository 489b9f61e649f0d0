#![forbid(unsafe_code)]

//! Interaction state machine for the pull-to-archive control.
//!
//! Maps the continuous pulled offset onto four discrete states and guards
//! offset-driven flips with a time-window debounce.
//!
//! # State machine
//!
//! ```text
//!   Pulling ──offset ≥ threshold──▶ CanRelease ──try_release()──▶ Releasing
//!      ▲                                │                              │
//!      └────────offset < threshold──────┘                     finish_release()
//!                                                                      ▼
//!                                                                     Done
//! ```
//!
//! # Invariants
//!
//! - Exactly one state is active at a time.
//! - Two offset-driven transitions are never accepted within one debounce
//!   window of each other.
//! - `Releasing` is entered only through [`PullStateMachine::try_release`],
//!   and `Done` only through [`PullStateMachine::finish_release`].
//! - `Done` is terminal; offsets are ignored once releasing has started.
//!
//! # Failure Modes
//!
//! - Requests blocked by the debounce guard are dropped, not queued.
//! - `try_release` outside `CanRelease` returns `false` and changes nothing.

use std::fmt;
use std::time::Duration;

use pullbox_core::clock::{Clock, Instant};

// ============================================================================
// States
// ============================================================================

/// Discrete interaction state of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// Pulled less than the release threshold.
    #[default]
    Pulling,
    /// Pulled far enough; lifting the finger would archive.
    CanRelease,
    /// Released; the box animation is playing.
    Releasing,
    /// Animation finished. Terminal for this control.
    Done,
}

impl InteractionState {
    /// True while the user's finger drives the control.
    #[inline]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Pulling | Self::CanRelease)
    }

    /// True once the release has been accepted.
    #[inline]
    pub fn is_release_class(self) -> bool {
        !self.is_dragging()
    }

    /// Short lowercase name, used in logs and demo output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pulling => "pulling",
            Self::CanRelease => "can_release",
            Self::Releasing => "releasing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: InteractionState,
    pub to: InteractionState,
}

// ============================================================================
// Debounce guard
// ============================================================================

/// Time-window guard over offset-driven transitions.
///
/// A request is permitted when strictly more than `window` has passed since
/// the last stamp. The first stamp is the construction time, so a control
/// cannot flip within its first window either.
#[derive(Debug, Clone, Copy)]
pub struct TransitionGuard {
    last_transition: Instant,
    window: Duration,
}

impl TransitionGuard {
    pub fn new(now: Instant, window: Duration) -> Self {
        Self {
            last_transition: now,
            window,
        }
    }

    /// Whether a transition at `now` is outside the window.
    #[must_use]
    pub fn permits(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_transition) > self.window
    }

    /// Record an accepted transition.
    pub fn stamp(&mut self, now: Instant) {
        self.last_transition = now;
    }

    /// Permit-and-stamp in one step. Returns whether the request was allowed.
    pub fn try_pass(&mut self, now: Instant) -> bool {
        let allowed = self.permits(now);
        if allowed {
            self.stamp(now);
        }
        allowed
    }

    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[inline]
    pub fn last_transition(&self) -> Instant {
        self.last_transition
    }
}

// ============================================================================
// State machine
// ============================================================================

/// The pull state machine with an injected clock.
#[derive(Debug)]
pub struct PullStateMachine<C> {
    state: InteractionState,
    guard: TransitionGuard,
    threshold: f64,
    clock: C,
}

impl<C: Clock> PullStateMachine<C> {
    /// Start in `Pulling`, with the guard stamped at the current time.
    pub fn new(clock: C, threshold: f64, debounce_window: Duration) -> Self {
        let guard = TransitionGuard::new(clock.now(), debounce_window);
        Self {
            state: InteractionState::Pulling,
            guard,
            threshold,
            clock,
        }
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn guard(&self) -> &TransitionGuard {
        &self.guard
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Feed the current pulled offset.
    ///
    /// Returns the accepted change, if any. Negative or NaN offsets count as
    /// "below threshold".
    pub fn update(&mut self, offset: f64) -> Option<StateChange> {
        let reached = offset >= self.threshold;
        let next = match self.state {
            InteractionState::Pulling if reached => InteractionState::CanRelease,
            InteractionState::CanRelease if !reached => InteractionState::Pulling,
            _ => return None,
        };
        let now = self.clock.now();
        if !self.guard.try_pass(now) {
            pullbox_core::trace!(
                from = %self.state,
                to = %next,
                offset,
                "state change debounced"
            );
            return None;
        }
        Some(self.enter(next))
    }

    /// Accept a release. Only valid in `CanRelease`.
    ///
    /// Bypasses the debounce guard, but stamps it.
    pub fn try_release(&mut self) -> bool {
        if self.state != InteractionState::CanRelease {
            pullbox_core::trace!(state = %self.state, "release rejected");
            return false;
        }
        let now = self.clock.now();
        self.guard.stamp(now);
        self.enter(InteractionState::Releasing);
        true
    }

    /// Move from `Releasing` to `Done`. No-op in any other state.
    pub fn finish_release(&mut self) -> Option<StateChange> {
        if self.state != InteractionState::Releasing {
            return None;
        }
        Some(self.enter(InteractionState::Done))
    }

    fn enter(&mut self, to: InteractionState) -> StateChange {
        let change = StateChange {
            from: self.state,
            to,
        };
        self.state = to;
        pullbox_core::debug!(from = %change.from, to = %change.to, "pull state changed");
        change
    }
}
