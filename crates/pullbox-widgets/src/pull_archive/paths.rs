#![forbid(unsafe_code)]

//! Path geometry for the pull-to-archive layers.
//!
//! Every function here is pure. Box, cap and stripe paths are expressed in
//! the circle layer's local space: the origin is the top-left corner of the
//! circle's bounding square, `radius` is the circle radius, and the box
//! bottom sits on `y = 2 * radius + vertical_shift`. Arrow and connector
//! paths are relative to the circle center.
//!
//! All box-like paths share one verb sequence (four rounded corners joined by
//! straight edges), so any two of them interpolate smoothly.
//!
//! # Invariants
//!
//! - `f(d, s)` equals `f(d, 0).translated(0, s)` for every path builder.
//! - Square top corners are arcs of radius zero, not missing verbs.

use std::f64::consts::{FRAC_PI_2, PI};

use pullbox_core::geometry::Point;
use pullbox_core::path::Path;

use super::config::{ArrowMetrics, PullMetrics};
use super::keyframes::ShapeDescriptor;
use super::state::InteractionState;

const LEFT: f64 = PI;
const UP: f64 = 3.0 * FRAC_PI_2;
const RIGHT: f64 = 0.0;
const DOWN: f64 = FRAC_PI_2;

/// Rounded rectangle standing on the circle's bottom edge.
///
/// With `top_caps` the two top corners are square.
#[must_use]
pub fn box_path(d: &ShapeDescriptor, vertical_shift: f64, radius: f64) -> Path {
    let top = if d.top_caps { 0.0 } else { d.corner_radius };
    rounded_box(d.width, d.height, d.corner_radius, top, vertical_shift, radius)
}

/// The stripe trailing above the circle while pulling.
///
/// Uses the descriptor's width and corner radius; its height is the circle
/// diameter plus `height_override`.
#[must_use]
pub fn stripe_path(
    d: &ShapeDescriptor,
    height_override: Option<f64>,
    vertical_shift: f64,
    radius: f64,
) -> Path {
    let height = radius * 2.0 + height_override.unwrap_or(0.0);
    rounded_box(
        d.width,
        height,
        d.corner_radius,
        d.corner_radius,
        vertical_shift,
        radius,
    )
}

/// The box lid: rounded top corners, flat bottom.
///
/// Floats `cap_offset` above the box top.
#[must_use]
pub fn box_cap_path(d: &ShapeDescriptor, vertical_shift: f64, radius: f64) -> Path {
    let (w, h, cr) = (d.cap_width, d.cap_height, d.cap_corner);
    let sx = radius;
    let sy = radius * 2.0 - d.height - d.cap_offset + h + vertical_shift;

    let mut path = Path::new();
    path.move_to(Point::new(sx - w / 2.0, sy))
        .line_to(Point::new(sx - w / 2.0, sy - (h - cr)))
        .arc(Point::new(sx - w / 2.0 + cr, sy - (h - cr)), cr, LEFT, UP, true)
        .line_to(Point::new(sx + w / 2.0 - cr, sy - h))
        .arc(Point::new(sx + w / 2.0 - cr, sy - (h - cr)), cr, UP, RIGHT, true)
        .line_to(Point::new(sx + w / 2.0, sy))
        .line_to(Point::new(sx - w / 2.0, sy))
        .close();
    path
}

/// Horizontal line left where the arrow was, relative to the circle center.
#[must_use]
pub fn connector_path(d: &ShapeDescriptor, vertical_shift: f64, base_offset: f64) -> Path {
    let y = base_offset + d.line_shift + vertical_shift;
    let half = d.line_width / 2.0;
    Path::line(Point::new(-half, y), Point::new(half, y))
}

/// Radius of the blue gradient mask for `state`.
///
/// `Pulling` shows a dot the size of the circle; `CanRelease` covers
/// `full_width`; the release states settle on a fixed mid-size circle.
#[must_use]
pub fn mask_radius(state: InteractionState, metrics: &PullMetrics, full_width: f64) -> f64 {
    match state {
        InteractionState::Pulling => metrics.arrow_circle_radius,
        InteractionState::CanRelease => full_width,
        InteractionState::Releasing | InteractionState::Done => metrics.blue_circle_size,
    }
}

/// Circular mask revealing the blue gradient, centered on `center` moved
/// down by `vertical_shift`.
#[must_use]
pub fn release_mask_path(
    center: Point,
    state: InteractionState,
    vertical_shift: f64,
    metrics: &PullMetrics,
    full_width: f64,
) -> Path {
    Path::circle(
        center.offset(0.0, vertical_shift),
        mask_radius(state, metrics, full_width),
    )
}

/// Chevron of the arrow, tip up. Rotated by the layer to point down.
#[must_use]
pub fn arrow_head_path(arrow: &ArrowMetrics) -> Path {
    let s = arrow.vertical_shift;
    let (hw, hh) = (arrow.head_half_width, arrow.head_half_height);
    let mut path = Path::new();
    path.move_to(Point::new(-hw, hh + s))
        .line_to(Point::new(0.0, -hh + s))
        .line_to(Point::new(hw, hh + s));
    path
}

/// Arrow shaft, from below the chevron up to its tip.
#[must_use]
pub fn arrow_shaft_path(arrow: &ArrowMetrics) -> Path {
    let s = arrow.vertical_shift;
    Path::line(
        Point::new(0.0, arrow.shaft_length + s),
        Point::new(0.0, -arrow.head_half_height + s),
    )
}

/// Flat bar the chevron turns into on release.
#[must_use]
pub fn release_bar_path(arrow: &ArrowMetrics) -> Path {
    let s = arrow.vertical_shift;
    Path::line(
        Point::new(-arrow.bar_half_width, s),
        Point::new(arrow.bar_half_width, s),
    )
}

fn rounded_box(
    w: f64,
    h: f64,
    cr: f64,
    top: f64,
    vertical_shift: f64,
    radius: f64,
) -> Path {
    let sx = radius;
    let sy = radius * 2.0 + vertical_shift;
    let (left, right) = (sx - w / 2.0, sx + w / 2.0);

    let mut path = Path::new();
    path.move_to(Point::new(left, sy - cr))
        .line_to(Point::new(left, sy - (h - cr)))
        .arc(Point::new(left + top, sy - (h - top)), top, LEFT, UP, true)
        .line_to(Point::new(right - cr, sy - h))
        .arc(Point::new(right - top, sy - (h - top)), top, UP, RIGHT, true)
        .line_to(Point::new(right, sy - cr))
        .arc(Point::new(right - cr, sy - cr), cr, RIGHT, DOWN, true)
        .line_to(Point::new(left + cr, sy))
        .arc(Point::new(left + cr, sy - cr), cr, DOWN, LEFT, true)
        .close();
    path
}
