#![forbid(unsafe_code)]

//! Vector paths made of lines and circular arcs.
//!
//! A [`Path`] is an ordered list of [`PathVerb`]s. Arcs carry their center,
//! radius, start/end angle and direction explicitly instead of being
//! flattened to curves, so two paths with the same verb sequence can be
//! interpolated parameter by parameter (corner radii morph smoothly).
//!
//! # Arc semantics
//!
//! Angles are in radians, 0 pointing right and π/2 pointing down (screen
//! space). `clockwise == true` sweeps toward increasing angles. As on an HTML
//! canvas, an arc is joined to the current point by a straight line from the
//! current point to the arc's start.
//!
//! # Invariants
//!
//! 1. `translated(dx, dy)` moves every point, arc center included, and leaves
//!    radii and angles untouched.
//! 2. `interpolate` at `t == 0` returns `self` and at `t == 1` returns `to`.
//! 3. Paths with different verb structure do not blend: the source is shown
//!    until `t` reaches 1, then the target.

use std::f64::consts::{FRAC_PI_2, TAU};

use smallvec::SmallVec;

use crate::animation::Interpolate;
use crate::geometry::{Point, Rect};

/// A circular arc segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

impl Arc {
    /// Signed sweep in radians (positive when clockwise).
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let delta = self.end_angle - self.start_angle;
        if self.clockwise {
            if delta >= TAU { TAU } else { delta.rem_euclid(TAU) }
        } else if -delta >= TAU {
            -TAU
        } else {
            -(-delta).rem_euclid(TAU)
        }
    }

    /// First point of the arc.
    #[inline]
    #[must_use]
    pub fn start_point(&self) -> Point {
        self.center.polar(self.radius, self.start_angle)
    }

    /// Last point of the arc.
    #[inline]
    #[must_use]
    pub fn end_point(&self) -> Point {
        self.center.polar(self.radius, self.start_angle + self.sweep())
    }

    /// Points that bound the arc: both ends plus every axis extreme the
    /// sweep passes through.
    fn extremes(&self) -> SmallVec<[Point; 6]> {
        let mut out = SmallVec::new();
        out.push(self.start_point());
        out.push(self.end_point());
        let sweep = self.sweep().abs();
        for k in 0..4 {
            let angle = f64::from(k) * FRAC_PI_2;
            let offset = if self.clockwise {
                (angle - self.start_angle).rem_euclid(TAU)
            } else {
                (self.start_angle - angle).rem_euclid(TAU)
            };
            if offset <= sweep {
                out.push(self.center.polar(self.radius, angle));
            }
        }
        out
    }

    fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            center: self.center.offset(dx, dy),
            ..*self
        }
    }
}

impl Interpolate for Arc {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            center: self.center.interpolate(&to.center, t),
            radius: self.radius.interpolate(&to.radius, t),
            start_angle: self.start_angle.interpolate(&to.start_angle, t),
            end_angle: self.end_angle.interpolate(&to.end_angle, t),
            clockwise: if t < 1.0 { self.clockwise } else { to.clockwise },
        }
    }
}

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathVerb {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Circular arc, joined to the current point by a line.
    Arc(Arc),
    /// Close the current subpath.
    Close,
}

impl PathVerb {
    fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A vector path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    verbs: SmallVec<[PathVerb; 12]>,
}

impl Path {
    /// An empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A full circle, starting at angle 0 and closed.
    #[must_use]
    pub fn circle(center: Point, radius: f64) -> Self {
        let mut path = Self::new();
        path.move_to(center.polar(radius, 0.0))
            .arc(center, radius, 0.0, TAU, true)
            .close();
        path
    }

    /// A single straight segment (open).
    #[must_use]
    pub fn line(from: Point, to: Point) -> Self {
        let mut path = Self::new();
        path.move_to(from).line_to(to);
        path
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.verbs.push(PathVerb::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.verbs.push(PathVerb::LineTo(p));
        self
    }

    /// Append an arc around `center`.
    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> &mut Self {
        self.verbs.push(PathVerb::Arc(Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.verbs.push(PathVerb::Close);
        self
    }

    /// The drawing commands in order.
    #[inline]
    #[must_use]
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Whether the last command closes the path.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.verbs.last(), Some(PathVerb::Close))
    }

    /// Whether `other` has the same verb sequence (and so can be blended).
    #[must_use]
    pub fn same_structure(&self, other: &Path) -> bool {
        self.verbs.len() == other.verbs.len()
            && self
                .verbs
                .iter()
                .zip(other.verbs.iter())
                .all(|(a, b)| a.same_kind(b))
    }

    /// This path moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Path {
        let verbs = self
            .verbs
            .iter()
            .map(|verb| match *verb {
                PathVerb::MoveTo(p) => PathVerb::MoveTo(p.offset(dx, dy)),
                PathVerb::LineTo(p) => PathVerb::LineTo(p.offset(dx, dy)),
                PathVerb::Arc(arc) => PathVerb::Arc(arc.translated(dx, dy)),
                PathVerb::Close => PathVerb::Close,
            })
            .collect();
        Path { verbs }
    }

    /// End points of every segment, in drawing order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.verbs.iter().filter_map(|verb| match verb {
            PathVerb::MoveTo(p) | PathVerb::LineTo(p) => Some(*p),
            PathVerb::Arc(arc) => Some(arc.end_point()),
            PathVerb::Close => None,
        })
    }

    /// Tight bounding box, accounting for arc bulges.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.verbs.iter().flat_map(|verb| {
            let mut pts: SmallVec<[Point; 6]> = SmallVec::new();
            match verb {
                PathVerb::MoveTo(p) | PathVerb::LineTo(p) => pts.push(*p),
                PathVerb::Arc(arc) => pts.extend(arc.extremes()),
                PathVerb::Close => {}
            }
            pts
        }))
    }

    /// Structural equality with every coordinate within `eps`.
    #[must_use]
    pub fn approx_eq(&self, other: &Path, eps: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= eps;
        let close_pt = |a: Point, b: Point| close(a.x, b.x) && close(a.y, b.y);
        self.same_structure(other)
            && self.verbs.iter().zip(other.verbs.iter()).all(|pair| match pair {
                (PathVerb::MoveTo(a), PathVerb::MoveTo(b))
                | (PathVerb::LineTo(a), PathVerb::LineTo(b)) => close_pt(*a, *b),
                (PathVerb::Arc(a), PathVerb::Arc(b)) => {
                    close_pt(a.center, b.center)
                        && close(a.radius, b.radius)
                        && close(a.start_angle, b.start_angle)
                        && close(a.end_angle, b.end_angle)
                        && a.clockwise == b.clockwise
                }
                (PathVerb::Close, PathVerb::Close) => true,
                _ => false,
            })
    }
}

impl Interpolate for Path {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 || !self.same_structure(to) {
            return if t >= 1.0 { to.clone() } else { self.clone() };
        }
        let verbs = self
            .verbs
            .iter()
            .zip(to.verbs.iter())
            .map(|pair| match pair {
                (PathVerb::MoveTo(a), PathVerb::MoveTo(b)) => {
                    PathVerb::MoveTo(a.interpolate(b, t))
                }
                (PathVerb::LineTo(a), PathVerb::LineTo(b)) => {
                    PathVerb::LineTo(a.interpolate(b, t))
                }
                (PathVerb::Arc(a), PathVerb::Arc(b)) => PathVerb::Arc(a.interpolate(b, t)),
                (verb, _) => *verb,
            })
            .collect();
        Path { verbs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn rounded_corner() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 10.0))
            .line_to(Point::new(0.0, 5.0))
            .arc(Point::new(5.0, 5.0), 5.0, PI, 3.0 * PI / 2.0, true)
            .line_to(Point::new(10.0, 0.0))
            .close();
        path
    }

    #[test]
    fn clockwise_quarter_arc_sweeps_positive() {
        let arc = Arc {
            center: Point::ZERO,
            radius: 1.0,
            start_angle: PI,
            end_angle: 3.0 * PI / 2.0,
            clockwise: true,
        };
        assert!((arc.sweep() - FRAC_PI_2).abs() < 1e-12);
        let end = arc.end_point();
        assert!(end.x.abs() < 1e-12 && (end.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrapping_clockwise_arc() {
        let arc = Arc {
            center: Point::ZERO,
            radius: 2.0,
            start_angle: 3.0 * PI / 2.0,
            end_angle: 0.0,
            clockwise: true,
        };
        assert!((arc.sweep() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn full_circle_sweep() {
        let circle = Path::circle(Point::new(1.0, 1.0), 3.0);
        let PathVerb::Arc(arc) = circle.verbs()[1] else {
            panic!("expected arc");
        };
        assert!((arc.sweep() - TAU).abs() < 1e-12);
        assert!(circle.is_closed());
    }

    #[test]
    fn circle_bounds_cover_diameter() {
        let b = Path::circle(Point::new(10.0, 20.0), 5.0).bounds().unwrap();
        assert!((b.x - 5.0).abs() < 1e-9);
        assert!((b.y - 15.0).abs() < 1e-9);
        assert!((b.width - 10.0).abs() < 1e-9);
        assert!((b.height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn translation_moves_arc_centers() {
        let path = rounded_corner();
        let moved = path.translated(0.0, 7.0);
        let PathVerb::Arc(arc) = moved.verbs()[2] else {
            panic!("expected arc");
        };
        assert_eq!(arc.center, Point::new(5.0, 12.0));
        assert_eq!(arc.radius, 5.0);
        assert!(moved.approx_eq(&path.translated(0.0, 7.0), 0.0));
    }

    #[test]
    fn interpolation_blends_matching_structure() {
        let a = Path::circle(Point::ZERO, 10.0);
        let b = Path::circle(Point::new(10.0, 0.0), 30.0);
        let mid = a.interpolate(&b, 0.5);
        let PathVerb::Arc(arc) = mid.verbs()[1] else {
            panic!("expected arc");
        };
        assert!((arc.radius - 20.0).abs() < 1e-12);
        assert!((arc.center.x - 5.0).abs() < 1e-12);
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
    }

    #[test]
    fn mismatched_structure_switches_at_end() {
        let a = Path::circle(Point::ZERO, 10.0);
        let b = Path::line(Point::ZERO, Point::new(1.0, 1.0));
        assert!(!a.same_structure(&b));
        assert_eq!(a.interpolate(&b, 0.99), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
    }

    #[test]
    fn points_skip_close() {
        let pts: Vec<_> = rounded_corner().points().collect();
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[3], Point::new(10.0, 0.0));
    }
}
