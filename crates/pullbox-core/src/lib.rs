#![forbid(unsafe_code)]

//! Core: animation primitives, clocks, and vector geometry.
//!
//! # Role in pullbox
//! `pullbox-core` is the toolkit-independent foundation the pull-to-archive
//! control is built on. Nothing in here knows about states, keyframes, or
//! archive cells; it only provides the vocabulary those pieces are written in.
//!
//! # Primary responsibilities
//! - **Animation**: the [`animation::Animation`] trait, easing curves,
//!   duration-based [`animation::Tween`]s and physically based
//!   [`animation::Spring`]s.
//! - **Clock**: an injectable [`clock::Clock`] capability so time-window
//!   logic can be driven deterministically in tests.
//! - **Geometry**: points, sizes, rectangles, and closed vector [`path::Path`]s
//!   made of lines and circular arcs.
//! - **Logging**: `tracing` macros re-exported behind the `tracing` feature,
//!   no-op otherwise.

pub mod animation;
pub mod clock;
pub mod geometry;
pub mod logging;
pub mod path;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
