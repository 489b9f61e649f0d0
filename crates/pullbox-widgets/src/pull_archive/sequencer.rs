#![forbid(unsafe_code)]

//! Release animation sequencer.
//!
//! Plays a [`KeyframeCatalog`] in strict index order. The sequencer never
//! schedules anything itself: it hands out one [`KeyframeStep`] at a time
//! and advances only when told that exactly that step has finished.
//!
//! # Example
//!
//! ```ignore
//! let mut seq = ReleaseSequencer::new(KeyframeCatalog::standard(), budget, &metrics);
//! let mut outcome = seq.play();
//! while let StepOutcome::Next(step) = outcome {
//!     apply(&step);             // animate layers over step.duration
//!     wait(step.duration);
//!     outcome = seq.step_finished(step.index);
//! }
//! assert_eq!(outcome, StepOutcome::Completed);
//! ```
//!
//! # Invariants
//!
//! - Step `i + 1` is only handed out after `step_finished(i)`.
//! - For `N` keyframes, [`StepOutcome::Completed`] is returned exactly once,
//!   after exactly `N` accepted completion signals.
//! - Stale, duplicate or out-of-order signals return [`StepOutcome::Ignored`].
//!
//! # Failure Modes
//!
//! - [`ReleaseSequencer::abort`] ends the session; nothing completes after it.
//! - An empty catalog completes as soon as it is played.

use std::time::Duration;

use pullbox_core::path::Path;

use super::config::PullMetrics;
use super::keyframes::{FrameBudget, KeyframeCatalog, ShapeDescriptor};
use super::paths;

// ============================================================================
// Session and steps
// ============================================================================

/// One in-flight release sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSession {
    current_index: usize,
    total: usize,
}

impl AnimationSession {
    fn new(total: usize) -> Self {
        Self {
            current_index: 0,
            total,
        }
    }

    /// Index of the step currently playing.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.total
    }
}

/// Target geometry of one keyframe, in layer-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct StepGeometry {
    /// Circle-turned-box outline.
    pub body: Path,
    /// Lid outline, if this keyframe has a lid.
    pub cap: Option<Path>,
    /// Stripe collapsed back onto the circle.
    pub stripe: Path,
    /// Line left where the arrow was.
    pub connector: Path,
}

/// A keyframe ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStep {
    pub index: usize,
    pub descriptor: ShapeDescriptor,
    /// Zero for instant steps.
    pub duration: Duration,
    pub geometry: StepGeometry,
}

impl KeyframeStep {
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

/// Lifecycle of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerPhase {
    #[default]
    Idle,
    Playing(AnimationSession),
    Finished,
    Aborted,
}

/// Result of driving the sequencer.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Apply this step and report back when it finishes.
    Next(KeyframeStep),
    /// The last step finished. Returned once per session.
    Completed,
    /// The signal did not match the session and was dropped.
    Ignored,
}

// ============================================================================
// Sequencer
// ============================================================================

/// Hands out keyframe steps in order.
#[derive(Debug, Clone)]
pub struct ReleaseSequencer {
    catalog: KeyframeCatalog,
    budget: FrameBudget,
    vertical_shift: f64,
    radius: f64,
    connector_offset: f64,
    phase: SequencerPhase,
}

impl ReleaseSequencer {
    pub fn new(catalog: KeyframeCatalog, budget: FrameBudget, metrics: &PullMetrics) -> Self {
        Self {
            catalog,
            budget,
            vertical_shift: metrics.sequence_shift(),
            radius: metrics.arrow_circle_radius,
            connector_offset: metrics.connector_base_offset,
            phase: SequencerPhase::Idle,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &KeyframeCatalog {
        &self.catalog
    }

    #[inline]
    pub fn budget(&self) -> &FrameBudget {
        &self.budget
    }

    #[inline]
    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    /// The live session, if a sequence is playing.
    pub fn session(&self) -> Option<AnimationSession> {
        match self.phase {
            SequencerPhase::Playing(session) => Some(session),
            _ => None,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, SequencerPhase::Playing(_))
    }

    /// Start the sequence and return step 0.
    ///
    /// Only valid once, from `Idle`.
    pub fn play(&mut self) -> StepOutcome {
        if self.phase != SequencerPhase::Idle {
            pullbox_core::trace!(phase = ?self.phase, "play ignored");
            return StepOutcome::Ignored;
        }
        let total = self.catalog.len();
        pullbox_core::debug!(total, "release sequence started");
        self.advance_to(AnimationSession::new(total))
    }

    /// Report that step `index` finished animating.
    pub fn step_finished(&mut self, index: usize) -> StepOutcome {
        let SequencerPhase::Playing(mut session) = self.phase else {
            pullbox_core::trace!(index, phase = ?self.phase, "step signal without session");
            return StepOutcome::Ignored;
        };
        if index != session.current_index {
            pullbox_core::trace!(
                index,
                expected = session.current_index,
                "out-of-order step signal"
            );
            return StepOutcome::Ignored;
        }
        session.current_index += 1;
        self.advance_to(session)
    }

    /// End the session without completing it.
    ///
    /// Returns whether a session was actually cut short.
    pub fn abort(&mut self) -> bool {
        let SequencerPhase::Playing(session) = self.phase else {
            return false;
        };
        pullbox_core::debug!(
            index = session.current_index,
            total = session.total,
            "release sequence aborted"
        );
        self.phase = SequencerPhase::Aborted;
        true
    }

    /// Build step `index` without touching the session.
    pub fn step(&self, index: usize) -> Option<KeyframeStep> {
        let descriptor = *self.catalog.get(index)?;
        let shift = self.vertical_shift;
        let geometry = StepGeometry {
            body: paths::box_path(&descriptor, shift, self.radius),
            cap: descriptor
                .has_cap()
                .then(|| paths::box_cap_path(&descriptor, shift, self.radius)),
            stripe: paths::stripe_path(self.catalog.initial(), None, shift, self.radius),
            connector: paths::connector_path(&descriptor, shift, self.connector_offset),
        };
        Some(KeyframeStep {
            index,
            descriptor,
            duration: self.budget.duration_of(&descriptor),
            geometry,
        })
    }

    fn advance_to(&mut self, session: AnimationSession) -> StepOutcome {
        if session.is_finished() {
            self.phase = SequencerPhase::Finished;
            pullbox_core::debug!(total = session.total, "release sequence completed");
            return StepOutcome::Completed;
        }
        self.phase = SequencerPhase::Playing(session);
        match self.step(session.current_index) {
            Some(step) => {
                pullbox_core::debug!(
                    index = step.index,
                    duration_ms = step.duration.as_secs_f64() * 1000.0,
                    "keyframe step"
                );
                StepOutcome::Next(step)
            }
            None => {
                self.phase = SequencerPhase::Finished;
                StepOutcome::Completed
            }
        }
    }
}
