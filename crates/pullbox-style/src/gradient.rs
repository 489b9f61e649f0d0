#![forbid(unsafe_code)]

//! Two-stop gradients.

use pullbox_core::animation::Interpolate;
use pullbox_core::geometry::Point;

use crate::color::Rgba;

/// How colors spread between the start and end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GradientKind {
    Linear,
    /// Circles centered on `start`, reaching the end color at `end`.
    #[default]
    Radial,
}

/// A two-stop gradient in unit coordinates of the painted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gradient {
    pub kind: GradientKind,
    pub from: Rgba,
    pub to: Rgba,
    /// Unit-space start point (0,0 is the top-left of the frame).
    #[cfg_attr(feature = "serde", serde(skip, default = "origin"))]
    pub start: Point,
    /// Unit-space end point.
    #[cfg_attr(feature = "serde", serde(skip, default = "unit_corner"))]
    pub end: Point,
}

#[cfg(feature = "serde")]
fn origin() -> Point {
    Point::ZERO
}

#[cfg(feature = "serde")]
fn unit_corner() -> Point {
    Point::new(1.0, 1.0)
}

impl Gradient {
    /// Radial gradient from the top-left corner to the bottom-right corner.
    #[must_use]
    pub const fn radial(from: Rgba, to: Rgba) -> Self {
        Self {
            kind: GradientKind::Radial,
            from,
            to,
            start: Point::ZERO,
            end: Point::new(1.0, 1.0),
        }
    }

    /// Color at normalized position `t` along the gradient.
    #[must_use]
    pub fn color_at(&self, t: f64) -> Rgba {
        self.from.interpolate(&self.to, t.clamp(0.0, 1.0))
    }

    /// Color at a unit-space point of the frame.
    #[must_use]
    pub fn sample(&self, p: Point) -> Rgba {
        let span = self.start.distance(self.end);
        if span <= f64::EPSILON {
            return self.to;
        }
        let t = match self.kind {
            GradientKind::Radial => self.start.distance(p) / span,
            GradientKind::Linear => {
                let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
                ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / (span * span)
            }
        };
        self.color_at(t)
    }

    /// Both stops scaled by `opacity`.
    #[must_use]
    pub fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            from: self.from.with_alpha(self.from.alpha() * opacity),
            to: self.to.with_alpha(self.to.alpha() * opacity),
            ..*self
        }
    }
}
