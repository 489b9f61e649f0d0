#![forbid(unsafe_code)]

//! The pull-to-archive control surface.
//!
//! [`PullToArchive`] glues the state machine, the sequencer and the layer
//! tree together and exposes the host-facing inputs:
//!
//! - [`on_scroll_offset_changed`](PullToArchive::on_scroll_offset_changed)
//!   on every scroll position update,
//! - [`on_drag_ended`](PullToArchive::on_drag_ended) when the finger lifts,
//! - [`tick`](PullToArchive::tick) once per rendered frame.
//!
//! Construction is two-phase: [`PullToArchive::build`] allocates every layer
//! once, and [`PullToArchive::layout`] only repositions them.

use std::fmt;
use std::time::Duration;

use pullbox_core::animation::Easing;
use pullbox_core::clock::{Clock, SystemClock};
use pullbox_core::geometry::{Point, Rect, Size};
use pullbox_style::Rgba;

use super::config::{PullConfig, PullMetrics};
use super::keyframes::{FrameBudget, KeyframeCatalog};
use super::layers::{GradientLayer, LabelLayer, LayerTree, ShapeLayer};
use super::paths;
use super::sequencer::{KeyframeStep, ReleaseSequencer, StepOutcome};
use super::state::{InteractionState, PullStateMachine, StateChange};
use crate::archive_cell::ArchiveCell;

const EASING: Easing = Easing::EaseOut;

// ============================================================================
// Geometry
// ============================================================================

/// Positions derived from the current bounds, metrics and state.
///
/// Recomputed on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGeometry {
    pub bounds: Rect,
    /// Top-left corner of the circle's bounding square.
    pub circle_origin: Point,
    pub circle_center: Point,
    /// Pivot of the arrow glyph.
    pub arrow_position: Point,
    /// Top edge of both labels.
    pub label_y: f64,
    /// How far the stripe extends above the circle. May be negative.
    pub stripe_extension: f64,
    /// Square frame shared by both gradients.
    pub gradient_frame: Rect,
    /// Clip rectangle of the release label.
    pub release_clip: Rect,
    pub mask_radius: f64,
    /// Whether the control is at least `min_height` tall.
    pub fully_revealed: bool,
}

impl ControlGeometry {
    pub fn compute(size: Size, metrics: &PullMetrics, state: InteractionState) -> Self {
        let r = metrics.arrow_circle_radius;
        let circle_origin = Point::new(
            metrics.left_padding,
            size.height - metrics.bottom_padding - metrics.circle_diameter(),
        );
        let circle_center = circle_origin.offset(r, r);
        let clip_x = metrics.left_padding + r;
        Self {
            bounds: Rect::from_size(size),
            circle_origin,
            circle_center,
            arrow_position: circle_center,
            label_y: circle_center.y - metrics.label_height / 2.0,
            stripe_extension: size.height
                - metrics.bottom_padding * 2.0
                - metrics.circle_diameter(),
            gradient_frame: Rect::new(0.0, 0.0, size.width, size.width),
            release_clip: Rect::new(clip_x, 0.0, size.width, size.height),
            mask_radius: paths::mask_radius(state, metrics, size.width),
            fully_revealed: size.height >= metrics.min_height,
        }
    }
}

// ============================================================================
// Control
// ============================================================================

type Callback = Box<dyn FnMut()>;

/// The pull-to-archive header control.
pub struct PullToArchive<C: Clock = SystemClock> {
    config: PullConfig,
    machine: PullStateMachine<C>,
    sequencer: ReleaseSequencer,
    layers: LayerTree,
    size: Size,
    visible: bool,
    summary_attached: bool,
    placeholder: Option<ArchiveCell>,
    pending_step: Option<usize>,
    on_release_completed: Option<Callback>,
}

impl PullToArchive<SystemClock> {
    /// Build with the system clock.
    pub fn new(config: PullConfig) -> Self {
        Self::build(config, SystemClock)
    }
}

impl<C: Clock> PullToArchive<C> {
    /// Allocate every layer and start in `Pulling`.
    pub fn build(config: PullConfig, clock: C) -> Self {
        Self::build_with_catalog(config, clock, KeyframeCatalog::standard())
    }

    /// Like [`build`](Self::build) with a custom keyframe sequence.
    pub fn build_with_catalog(
        config: PullConfig,
        clock: C,
        catalog: KeyframeCatalog,
    ) -> Self {
        let metrics = config.metrics;
        let machine = PullStateMachine::new(
            clock,
            metrics.action_release_threshold,
            metrics.debounce_window,
        );
        let sequencer = ReleaseSequencer::new(
            catalog,
            FrameBudget::with_scale(config.slow_motion),
            &metrics,
        );
        let layers = Self::build_layers(&config, sequencer.catalog());
        Self {
            config,
            machine,
            sequencer,
            layers,
            size: Size::ZERO,
            visible: false,
            summary_attached: false,
            placeholder: None,
            pending_step: None,
            on_release_completed: None,
        }
    }

    fn build_layers(config: &PullConfig, catalog: &KeyframeCatalog) -> LayerTree {
        let m = &config.metrics;
        let r = m.arrow_circle_radius;
        let arrow = &m.arrow;
        let initial = catalog.initial();
        let first_cap = catalog
            .get(0)
            .filter(|d| d.has_cap())
            .map(|d| paths::box_cap_path(d, 0.0, r))
            .unwrap_or_default();
        let label = |text: &str| {
            LabelLayer::new(
                text,
                config.label_color,
                m.label_height,
                m.label_settle,
                m.label_damping_ratio,
            )
        };
        let mut release_label = label(&config.release_text);
        release_label.snap(0.0, 0.0);

        LayerTree {
            idle_background: GradientLayer::new(config.idle_gradient),
            release_background: GradientLayer::new(config.release_gradient),
            release_mask: ShapeLayer::new("release_mask")
                .with_fill(Rgba::BLACK)
                .with_path(paths::release_mask_path(
                    Point::ZERO,
                    InteractionState::Pulling,
                    0.0,
                    m,
                    0.0,
                )),
            swipe_label: label(&config.swipe_text),
            release_label,
            stripe: ShapeLayer::new("stripe")
                .with_fill(config.indicator_color)
                .with_opacity(m.stripe_opacity)
                .with_path(paths::stripe_path(initial, None, 0.0, r)),
            body: ShapeLayer::new("body")
                .with_fill(config.indicator_color)
                .with_path(paths::box_path(initial, 0.0, r)),
            box_cap: ShapeLayer::new("box_cap")
                .with_fill(config.indicator_color)
                .with_opacity(0.0)
                .with_path(first_cap),
            arrow_head: ShapeLayer::new("arrow_head")
                .with_stroke(config.pulling_color, arrow.line_width)
                .with_rotation(arrow.pulling_rotation)
                .with_path(paths::arrow_head_path(arrow)),
            arrow_shaft: ShapeLayer::new("arrow_shaft")
                .with_stroke(config.pulling_color, arrow.line_width)
                .with_rotation(arrow.pulling_rotation)
                .with_path(paths::arrow_shaft_path(arrow)),
        }
    }

    /// Register the terminal callback, replacing any previous one.
    pub fn on_release_completed(&mut self, callback: impl FnMut() + 'static) {
        self.on_release_completed = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.machine.state()
    }

    #[inline]
    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    #[inline]
    pub fn layers(&self) -> &LayerTree {
        &self.layers
    }

    #[inline]
    pub fn sequencer(&self) -> &ReleaseSequencer {
        &self.sequencer
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The transient card shown between release and completion.
    #[inline]
    pub fn placeholder(&self) -> Option<&ArchiveCell> {
        self.placeholder.as_ref()
    }

    /// Geometry for the current size, or `None` while the size is degenerate.
    pub fn geometry(&self) -> Option<ControlGeometry> {
        (!self.size.is_empty())
            .then(|| ControlGeometry::compute(self.size, &self.config.metrics, self.state()))
    }

    /// Whether any tween, spring or sequencer step is still running.
    pub fn is_animating(&self) -> bool {
        self.pending_step.is_some() || !self.layers.is_settled()
    }

    /// Tell the control whether the host already shows the summary row.
    pub fn set_summary_attached(&mut self, attached: bool) {
        self.summary_attached = attached;
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn set_width(&mut self, width: f64) {
        if (self.size.width - width).abs() > f64::EPSILON {
            self.layout(Size::new(width, self.size.height));
        }
    }

    /// Reposition every layer for `size`.
    ///
    /// A degenerate size records the size but skips the geometry update.
    pub fn layout(&mut self, size: Size) {
        self.size = size;
        let Some(geo) = self.geometry() else {
            pullbox_core::trace!(
                width = size.width,
                height = size.height,
                "layout skipped for empty bounds"
            );
            return;
        };
        let m = self.config.metrics;
        let r = m.arrow_circle_radius;
        let state = self.machine.state();
        let layers = &mut self.layers;

        layers.idle_background.set_frame(geo.gradient_frame);
        layers.release_background.set_frame(geo.gradient_frame);
        layers.release_mask.set_position(geo.circle_center);
        let mask_shift = if state.is_dragging() { 0.0 } else { m.box_shift() };
        let mask = paths::release_mask_path(Point::ZERO, state, mask_shift, &m, size.width);
        if layers.release_mask.target_path() != &mask {
            if layers.release_mask.is_settled() {
                layers.release_mask.set_path(mask);
            } else {
                layers.release_mask.animate_path(mask, m.mask_duration, EASING);
            }
        }

        layers.swipe_label.place(geo.label_y, size.width);
        layers.release_label.place(geo.label_y, size.width);
        layers.release_label.set_clip(geo.release_clip);
        if state == InteractionState::Pulling && layers.release_label.is_settled() {
            layers.release_label.snap(-size.width, 0.0);
        }

        layers.body.set_position(geo.circle_origin);
        layers.box_cap.set_position(geo.circle_origin);
        layers.stripe.set_position(geo.circle_origin);
        layers.arrow_head.set_position(geo.arrow_position);
        layers.arrow_shaft.set_position(geo.arrow_position);

        if state.is_dragging() {
            let initial = self.sequencer.catalog().initial();
            let extension = (geo.stripe_extension > 0.0).then_some(geo.stripe_extension);
            layers
                .stripe
                .set_path(paths::stripe_path(initial, extension, 0.0, r));
        }

        if let Some(card) = self.placeholder.as_mut() {
            card.layout(size);
        }
    }

    // ------------------------------------------------------------------
    // Host inputs
    // ------------------------------------------------------------------

    /// Continuous scroll input. `offset` is how far the list is pulled.
    ///
    /// Non-positive offsets hide the control and roll `CanRelease` back to
    /// `Pulling`, still subject to the debounce window.
    pub fn on_scroll_offset_changed(&mut self, offset: f64) {
        if offset.is_nan() || offset <= 0.0 {
            if self.visible {
                pullbox_core::trace!(offset, "pull control hidden");
            }
            self.visible = false;
            self.size = Size::new(self.size.width, 0.0);
            if let Some(change) = self.machine.update(0.0) {
                self.enter_state(change);
            }
            return;
        }
        self.visible = true;
        let height = if self.summary_attached {
            offset + self.config.metrics.released_height
        } else {
            offset
        };
        self.layout(Size::new(self.size.width, height));
        if let Some(change) = self.machine.update(offset) {
            self.enter_state(change);
        }
    }

    /// The finger lifted. Returns whether the release was accepted.
    pub fn on_drag_ended(&mut self) -> bool {
        let from = self.machine.state();
        if !self.machine.try_release() {
            return false;
        }
        pullbox_core::info!(
            summary_attached = self.summary_attached,
            "archive release accepted"
        );
        if !self.summary_attached {
            let mut card = ArchiveCell::new(self.config.placeholder.clone());
            card.layout(self.size);
            self.placeholder = Some(card);
        }
        self.enter_state(StateChange {
            from,
            to: InteractionState::Releasing,
        });
        true
    }

    /// Advance animations by `dt`. Returns whether anything is still moving.
    ///
    /// Delivers the sequencer's step-finished signal once the current step's
    /// tweens have all completed; zero-length steps chain within one call.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.layers.tick(dt);
        while let Some(index) = self.pending_step {
            if !self.layers.tweens_settled() {
                break;
            }
            self.pending_step = None;
            let outcome = self.sequencer.step_finished(index);
            self.handle_outcome(outcome);
        }
        self.is_animating()
    }

    /// The host is detaching the control.
    ///
    /// An in-flight release is aborted and its completion callback never
    /// fires.
    pub fn teardown(&mut self) {
        if self.sequencer.abort() {
            pullbox_core::info!(state = %self.state(), "pull control torn down mid-release");
        }
        self.pending_step = None;
        self.placeholder = None;
        self.visible = false;
    }

    // ------------------------------------------------------------------
    // State entry
    // ------------------------------------------------------------------

    fn enter_state(&mut self, change: StateChange) {
        let to = change.to;
        let m = self.config.metrics;
        let duration = m.transition_duration(to);
        let width = self.size.width;
        let mask_shift = if to.is_dragging() { 0.0 } else { m.box_shift() };
        let layers = &mut self.layers;

        layers.release_mask.animate_path(
            paths::release_mask_path(Point::ZERO, to, mask_shift, &m, width),
            m.mask_duration,
            EASING,
        );

        match to {
            InteractionState::Pulling => {
                self.point_arrow(self.config.pulling_color, m.arrow.pulling_rotation, duration);
                self.layers.release_label.slide_to(-width, 0.0);
                self.layers.swipe_label.slide_to(0.0, 1.0);
            }
            InteractionState::CanRelease => {
                self.point_arrow(self.config.release_color, m.arrow.release_rotation, duration);
                let shown = -(m.left_padding + m.arrow_circle_radius);
                self.layers.release_label.slide_to(shown, 1.0);
                self.layers.swipe_label.slide_to(width, 0.0);
            }
            InteractionState::Releasing => {
                let layers = &mut self.layers;
                layers
                    .arrow_head
                    .set_path(paths::release_bar_path(&m.arrow));
                layers
                    .arrow_head
                    .animate_stroke(self.config.release_color, duration, EASING);
                layers
                    .arrow_head
                    .animate_rotation(m.arrow.release_rotation, duration, EASING);
                layers
                    .arrow_shaft
                    .animate_stroke(Rgba::TRANSPARENT, duration, EASING);
                layers
                    .arrow_shaft
                    .animate_rotation(m.arrow.release_rotation, duration, EASING);
                layers
                    .release_label
                    .snap(-(m.left_padding + m.arrow_circle_radius), 0.0);
                layers.idle_background.animate_opacity(0.0, duration, EASING);

                let outcome = self.sequencer.play();
                self.handle_outcome(outcome);
            }
            InteractionState::Done => {}
        }
    }

    fn point_arrow(&mut self, color: Rgba, rotation: f64, duration: Duration) {
        for layer in [&mut self.layers.arrow_head, &mut self.layers.arrow_shaft] {
            layer.animate_stroke(color, duration, EASING);
            layer.animate_rotation(rotation, duration, EASING);
        }
    }

    // ------------------------------------------------------------------
    // Sequencer
    // ------------------------------------------------------------------

    fn handle_outcome(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Next(step) => {
                self.apply_step(&step);
                self.pending_step = Some(step.index);
            }
            StepOutcome::Completed => self.complete_release(),
            StepOutcome::Ignored => {}
        }
    }

    fn apply_step(&mut self, step: &KeyframeStep) {
        let d = step.duration;
        let geometry = &step.geometry;
        let layers = &mut self.layers;

        layers.body.animate_path(geometry.body.clone(), d, EASING);
        layers.stripe.animate_path(geometry.stripe.clone(), d, EASING);
        if step.index > 0 {
            layers.stripe.animate_opacity(0.0, d, EASING);
        }
        layers
            .arrow_head
            .animate_path(geometry.connector.clone(), d, EASING);
        if let Some(cap) = &geometry.cap {
            if step.index == 0 {
                layers.box_cap.set_opacity(1.0);
            }
            layers.box_cap.animate_path(cap.clone(), d, EASING);
        }
    }

    fn complete_release(&mut self) {
        self.placeholder = None;
        self.machine.finish_release();
        pullbox_core::info!("archive release completed");
        if let Some(callback) = self.on_release_completed.as_mut() {
            callback();
        }
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for PullToArchive<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullToArchive")
            .field("state", &self.machine.state())
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("summary_attached", &self.summary_attached)
            .field("sequencer", &self.sequencer.phase())
            .field("pending_step", &self.pending_step)
            .finish_non_exhaustive()
    }
}
