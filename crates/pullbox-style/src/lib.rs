#![forbid(unsafe_code)]

//! Color and gradient types for pullbox.
//!
//! # Role in pullbox
//! `pullbox-style` is the shared vocabulary for colors. The pull-to-archive
//! control tweens stroke colors between its pulling and release palettes and
//! paints two radial gradient backgrounds; both go through these types so the
//! layer tree stays renderer-agnostic.

/// RGBA colors with hex helpers.
pub mod color;
/// Two-stop gradients.
pub mod gradient;

pub use color::Rgba;
pub use gradient::{Gradient, GradientKind};
