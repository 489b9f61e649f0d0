#![forbid(unsafe_code)]

//! Pull-to-archive list header.
//!
//! The user drags a list past its top edge. A white circle with an arrow
//! slides down with the finger, a stripe trails above it, and two labels
//! swap once the drag is deep enough to archive. Lifting the finger at that
//! point turns the circle into a small box through a fixed keyframe
//! sequence, after which the host inserts the archive summary row.
//!
//! # Pieces
//!
//! - [`state`]: discrete states, debounce guard, and the state machine.
//! - [`keyframes`]: immutable shape descriptors for the box animation.
//! - [`paths`]: pure path builders for every shape layer.
//! - [`sequencer`]: plays the keyframes in order, one step at a time.
//! - [`layers`]: the retained layer tree a renderer draws.
//! - [`control`]: [`PullToArchive`], wiring it all to host input.
//! - [`config`]: metrics, colors and texts.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use pullbox_core::clock::ManualClock;
//! use pullbox_widgets::pull_archive::{InteractionState, PullConfig, PullToArchive};
//!
//! let clock = ManualClock::new();
//! let mut control = PullToArchive::build(PullConfig::default(), clock.clone());
//! control.set_width(375.0);
//!
//! clock.advance(Duration::from_millis(600));
//! control.on_scroll_offset_changed(95.0);
//! assert_eq!(control.state(), InteractionState::CanRelease);
//!
//! assert!(control.on_drag_ended());
//! while control.tick(Duration::from_millis(16)) {}
//! assert_eq!(control.state(), InteractionState::Done);
//! ```

pub mod config;
pub mod control;
pub mod keyframes;
pub mod layers;
pub mod paths;
pub mod sequencer;
pub mod state;

pub use config::{ArrowMetrics, PullConfig, PullMetrics};
pub use control::{ControlGeometry, PullToArchive};
pub use keyframes::{CIRCLE, FrameBudget, KeyframeCatalog, RELEASE_KEYFRAMES, ShapeDescriptor};
pub use layers::{GradientLayer, LabelLayer, LayerTree, ShapeLayer};
pub use sequencer::{
    AnimationSession, KeyframeStep, ReleaseSequencer, SequencerPhase, StepGeometry, StepOutcome,
};
pub use state::{InteractionState, PullStateMachine, StateChange, TransitionGuard};
