#![forbid(unsafe_code)]

//! Retained layer tree of the pull-to-archive control.
//!
//! Layers are plain values: a renderer reads positions, paths, colors and
//! opacities each frame and draws them however it likes. Every animatable
//! property is a [`Tween`] (or a [`Spring`] for the label slides) advanced by
//! [`LayerTree::tick`].

use std::time::Duration;

use pullbox_core::animation::{Animation, Easing, Spring, Tween};
use pullbox_core::geometry::{Point, Rect};
use pullbox_core::path::Path;
use pullbox_style::{Gradient, Rgba};

// ============================================================================
// Shape layer
// ============================================================================

/// A filled and/or stroked path placed at `position`.
#[derive(Debug, Clone)]
pub struct ShapeLayer {
    name: &'static str,
    position: Point,
    path: Tween<Path>,
    fill: Rgba,
    stroke: Tween<Rgba>,
    line_width: f64,
    opacity: Tween<f64>,
    rotation: Tween<f64>,
}

impl ShapeLayer {
    /// An empty, fully opaque layer with no fill or stroke.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            position: Point::ZERO,
            path: Tween::settled(Path::new()),
            fill: Rgba::TRANSPARENT,
            stroke: Tween::settled(Rgba::TRANSPARENT),
            line_width: 0.0,
            opacity: Tween::settled(1.0),
            rotation: Tween::settled(0.0),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: Path) -> Self {
        self.path.snap(path);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Rgba) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Rgba, line_width: f64) -> Self {
        self.stroke.snap(stroke);
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity.snap(opacity);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation.snap(radians);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Path as currently displayed.
    pub fn path(&self) -> Path {
        self.path.current()
    }

    /// Path the layer is animating toward.
    pub fn target_path(&self) -> &Path {
        self.path.target()
    }

    pub fn set_path(&mut self, path: Path) {
        self.path.snap(path);
    }

    /// Animate the path. A zero duration applies it immediately.
    pub fn animate_path(&mut self, path: Path, duration: Duration, easing: Easing) {
        self.path.animate_to(path, duration, easing);
    }

    #[inline]
    pub fn fill(&self) -> Rgba {
        self.fill
    }

    pub fn stroke(&self) -> Rgba {
        self.stroke.current()
    }

    pub fn animate_stroke(&mut self, stroke: Rgba, duration: Duration, easing: Easing) {
        self.stroke.animate_to(stroke, duration, easing);
    }

    #[inline]
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.current().clamp(0.0, 1.0)
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity.snap(opacity);
    }

    pub fn animate_opacity(&mut self, opacity: f64, duration: Duration, easing: Easing) {
        self.opacity.animate_to(opacity, duration, easing);
    }

    /// Rotation in radians about `position`.
    pub fn rotation(&self) -> f64 {
        self.rotation.current()
    }

    pub fn animate_rotation(&mut self, radians: f64, duration: Duration, easing: Easing) {
        self.rotation.animate_to(radians, duration, easing);
    }

    /// Whether anything would be drawn.
    pub fn is_drawn(&self) -> bool {
        self.opacity() > 0.0
            && !self.path.target().is_empty()
            && (!self.fill.is_transparent() || !self.stroke().is_transparent())
    }

    pub fn tick(&mut self, dt: Duration) {
        self.path.tick(dt);
        self.stroke.tick(dt);
        self.opacity.tick(dt);
        self.rotation.tick(dt);
    }

    /// Whether every property has reached its target.
    pub fn is_settled(&self) -> bool {
        self.path.is_complete()
            && self.stroke.is_complete()
            && self.opacity.is_complete()
            && self.rotation.is_complete()
    }
}

// ============================================================================
// Label layer
// ============================================================================

/// A single-line centered text label that slides horizontally.
///
/// `x` and `alpha` are spring-driven. The label may sit inside a clip
/// rectangle; its `x` is then relative to the clip's left edge.
#[derive(Debug, Clone)]
pub struct LabelLayer {
    text: String,
    color: Rgba,
    frame: Rect,
    clip: Option<Rect>,
    x: Spring,
    alpha: Spring,
}

impl LabelLayer {
    pub fn new(
        text: impl Into<String>,
        color: Rgba,
        height: f64,
        settle: Duration,
        damping: f64,
    ) -> Self {
        Self {
            text: text.into(),
            color,
            frame: Rect::new(0.0, 0.0, 0.0, height),
            clip: None,
            x: Spring::at(0.0).with_response(settle, damping),
            alpha: Spring::at(1.0).with_response(settle, damping),
        }
    }

    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Label frame with the current slide offset applied.
    pub fn frame(&self) -> Rect {
        Rect {
            x: self.x.position(),
            ..self.frame
        }
    }

    #[inline]
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = Some(clip);
    }

    /// Place the label vertically and size it to `width`.
    pub fn place(&mut self, y: f64, width: f64) {
        self.frame.y = y;
        self.frame.width = width;
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x.position()
    }

    /// Opacity in [0.0, 1.0].
    pub fn alpha(&self) -> f64 {
        self.alpha.position().clamp(0.0, 1.0)
    }

    /// Spring toward a new offset and opacity.
    pub fn slide_to(&mut self, x: f64, alpha: f64) {
        self.x.set_target(x);
        self.alpha.set_target(alpha);
    }

    /// Jump to an offset and opacity.
    pub fn snap(&mut self, x: f64, alpha: f64) {
        self.x.snap_to(x);
        self.alpha.snap_to(alpha);
    }

    pub fn tick(&mut self, dt: Duration) {
        self.x.tick(dt);
        self.alpha.tick(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_at_rest() && self.alpha.is_at_rest()
    }
}

// ============================================================================
// Gradient layer
// ============================================================================

/// A gradient-filled rectangle.
#[derive(Debug, Clone)]
pub struct GradientLayer {
    gradient: Gradient,
    frame: Rect,
    opacity: Tween<f64>,
}

impl GradientLayer {
    pub fn new(gradient: Gradient) -> Self {
        Self {
            gradient,
            frame: Rect::default(),
            opacity: Tween::settled(1.0),
        }
    }

    #[inline]
    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.current().clamp(0.0, 1.0)
    }

    pub fn animate_opacity(&mut self, opacity: f64, duration: Duration, easing: Easing) {
        self.opacity.animate_to(opacity, duration, easing);
    }

    /// Color at a point in the layer's own coordinates, opacity applied.
    pub fn color_at(&self, p: Point) -> Rgba {
        if self.frame.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let unit = Point::new(
            (p.x - self.frame.x) / self.frame.width,
            (p.y - self.frame.y) / self.frame.height,
        );
        let color = self.gradient.sample(unit);
        color.with_alpha(color.alpha() * self.opacity())
    }

    pub fn tick(&mut self, dt: Duration) {
        self.opacity.tick(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.opacity.is_complete()
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Every layer of the control, in paint order (back to front).
#[derive(Debug, Clone)]
pub struct LayerTree {
    pub idle_background: GradientLayer,
    pub release_background: GradientLayer,
    /// Mask over `release_background`, positioned at the circle center.
    pub release_mask: ShapeLayer,
    pub swipe_label: LabelLayer,
    pub release_label: LabelLayer,
    pub stripe: ShapeLayer,
    /// The white circle that morphs into the box body.
    pub body: ShapeLayer,
    pub box_cap: ShapeLayer,
    /// Chevron, later the flat bar and the connector line.
    pub arrow_head: ShapeLayer,
    pub arrow_shaft: ShapeLayer,
}

impl LayerTree {
    /// Shape layers in paint order.
    pub fn shapes(&self) -> [&ShapeLayer; 6] {
        [
            &self.release_mask,
            &self.stripe,
            &self.body,
            &self.box_cap,
            &self.arrow_head,
            &self.arrow_shaft,
        ]
    }

    fn shapes_mut(&mut self) -> [&mut ShapeLayer; 6] {
        [
            &mut self.release_mask,
            &mut self.stripe,
            &mut self.body,
            &mut self.box_cap,
            &mut self.arrow_head,
            &mut self.arrow_shaft,
        ]
    }

    pub fn tick(&mut self, dt: Duration) {
        self.idle_background.tick(dt);
        self.release_background.tick(dt);
        self.swipe_label.tick(dt);
        self.release_label.tick(dt);
        for shape in self.shapes_mut() {
            shape.tick(dt);
        }
    }

    /// Whether every tween has finished. Label springs are not included.
    pub fn tweens_settled(&self) -> bool {
        self.idle_background.is_settled()
            && self.release_background.is_settled()
            && self.shapes().iter().all(|s| s.is_settled())
    }

    /// Whether tweens and springs have all come to rest.
    pub fn is_settled(&self) -> bool {
        self.tweens_settled()
            && self.swipe_label.is_settled()
            && self.release_label.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn shape_path_animates_and_settles() {
        let from = Path::circle(Point::ZERO, 10.0);
        let to = Path::circle(Point::ZERO, 30.0);
        let mut layer = ShapeLayer::new("mask").with_path(from.clone());
        layer.animate_path(to.clone(), Duration::from_millis(200), Easing::EaseOut);
        assert!(!layer.is_settled());
        assert_eq!(layer.path(), from);

        layer.tick(Duration::from_millis(100));
        let mid = layer.path().bounds().expect("bounds");
        assert!(mid.width > 20.0 && mid.width < 60.0);

        layer.tick(Duration::from_millis(100));
        assert!(layer.is_settled());
        assert_eq!(layer.path(), to);
    }

    #[test]
    fn zero_duration_applies_immediately() {
        let mut layer = ShapeLayer::new("body");
        layer.animate_opacity(0.0, Duration::ZERO, Easing::EaseOut);
        assert!(layer.is_settled());
        assert_eq!(layer.opacity(), 0.0);
    }

    #[test]
    fn drawn_requires_paint_and_path() {
        let layer = ShapeLayer::new("empty").with_fill(Rgba::WHITE);
        assert!(!layer.is_drawn());
        let layer = layer.with_path(Path::circle(Point::ZERO, 1.0));
        assert!(layer.is_drawn());
        assert!(!layer.with_opacity(0.0).is_drawn());
    }

    #[test]
    fn label_springs_to_target() {
        let mut label =
            LabelLayer::new("Release", Rgba::WHITE, 44.0, Duration::from_millis(500), 0.7);
        label.snap(-320.0, 0.0);
        label.slide_to(-40.0, 1.0);
        for _ in 0..120 {
            label.tick(FRAME);
        }
        assert!(label.is_settled());
        assert_eq!(label.x(), -40.0);
        assert_eq!(label.alpha(), 1.0);
    }

    #[test]
    fn label_alpha_is_clamped_during_overshoot() {
        let mut label =
            LabelLayer::new("Swipe", Rgba::WHITE, 44.0, Duration::from_millis(500), 0.2);
        label.snap(0.0, 0.0);
        label.slide_to(0.0, 1.0);
        for _ in 0..60 {
            label.tick(FRAME);
            assert!((0.0..=1.0).contains(&label.alpha()));
        }
    }

    #[test]
    fn gradient_color_respects_opacity() {
        let mut layer = GradientLayer::new(Gradient::radial(Rgba::BLACK, Rgba::WHITE));
        layer.set_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(layer.color_at(Point::ZERO), Rgba::BLACK);
        layer.animate_opacity(0.0, Duration::from_millis(10), Easing::Linear);
        layer.tick(Duration::from_millis(10));
        assert!(layer.color_at(Point::ZERO).is_transparent());
    }
}
