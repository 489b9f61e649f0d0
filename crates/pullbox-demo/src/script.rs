//! Scripted drag gesture against an [`ArchiveList`].
//!
//! The script drags the list down linearly, holds it past the debounce
//! window, lifts the finger, then renders frames until everything settles.
//! Time comes from a [`ManualClock`] advanced one frame at a time, so a run
//! is fully deterministic.

use std::time::Duration;

use pullbox_core::clock::ManualClock;
use pullbox_widgets::{ArchiveList, PullConfig};
use serde::Serialize;

use crate::error::{DemoError, Result};

const MAX_SETTLE_FRAMES: usize = 5_000;

/// Shape of one scripted gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptOptions {
    pub width: f64,
    pub frame: Duration,
    /// Deepest pulled offset reached by the drag.
    pub pull_to: f64,
    pub drag_time: Duration,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            width: 375.0,
            frame: Duration::from_millis(16),
            pull_to: 120.0,
            drag_time: Duration::from_millis(600),
        }
    }
}

impl ScriptOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(DemoError::invalid(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if self.frame.is_zero() {
            return Err(DemoError::invalid("frame interval must be non-zero"));
        }
        if !(self.pull_to.is_finite() && self.pull_to > 0.0) {
            return Err(DemoError::invalid(format!(
                "pull depth must be positive, got {}",
                self.pull_to
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Drag,
    Hold,
    Release,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Hold => "hold",
            Self::Release => "release",
        }
    }
}

/// Snapshot of the scene after one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub t_ms: u64,
    pub phase: Phase,
    pub offset: f64,
    pub state: &'static str,
    pub visible: bool,
    pub height: f64,
    /// Keyframe index while the release sequence plays.
    pub step: Option<usize>,
    /// Body outline bounds as `[x, y, width, height]`, layer-local.
    pub body: Option<[f64; 4]>,
    pub rows: usize,
    pub inset: f64,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: usize,
    pub released: bool,
    pub completed: bool,
    pub rows: usize,
    pub final_state: &'static str,
}

/// Runs the gesture and collects every frame.
#[derive(Debug)]
pub struct GestureScript {
    options: ScriptOptions,
    clock: ManualClock,
    list: ArchiveList<ManualClock>,
    frames: Vec<FrameRecord>,
    offset: f64,
}

impl GestureScript {
    pub fn new(config: PullConfig, options: ScriptOptions) -> Result<Self> {
        options.validate()?;
        let clock = ManualClock::new();
        let list = ArchiveList::new(options.width, config, clock.clone());
        Ok(Self {
            options,
            clock,
            list,
            frames: Vec::new(),
            offset: 0.0,
        })
    }

    #[inline]
    pub fn list(&self) -> &ArchiveList<ManualClock> {
        &self.list
    }

    #[inline]
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Play the whole gesture.
    pub fn run(&mut self) -> RunSummary {
        let _span = pullbox_core::info_span!(
            "gesture",
            width = self.options.width,
            pull_to = self.options.pull_to
        )
        .entered();
        let rows_before = self.list.row_count();

        let drag_frames = self.frames_in(self.options.drag_time).max(1);
        for i in 1..=drag_frames {
            self.feed(self.options.pull_to * i as f64 / drag_frames as f64);
            self.advance(Phase::Drag);
        }

        let window = self.list.control().config().metrics.debounce_window;
        for _ in 0..self.frames_in(window) + 2 {
            self.feed(self.options.pull_to);
            self.advance(Phase::Hold);
        }

        let released = self.list.end_dragging();
        pullbox_core::info!(released, offset = self.offset, "finger lifted");
        if !released {
            self.feed(0.0);
        }

        let mut settled = false;
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.advance(Phase::Release) {
                settled = true;
                break;
            }
        }
        if !settled {
            pullbox_core::warn!(frames = MAX_SETTLE_FRAMES, "scene did not settle");
        }
        // The list scrolls back once the summary row is in place.
        if self.offset > 0.0 {
            self.feed(0.0);
            self.advance(Phase::Release);
        }

        let rows = self.list.row_count();
        let summary = RunSummary {
            frames: self.frames.len(),
            released,
            completed: rows > rows_before,
            rows,
            final_state: self.list.state().as_str(),
        };
        pullbox_core::info!(
            frames = summary.frames,
            completed = summary.completed,
            rows = summary.rows,
            "gesture finished"
        );
        summary
    }

    fn frames_in(&self, span: Duration) -> usize {
        (span.as_secs_f64() / self.options.frame.as_secs_f64()).ceil() as usize
    }

    fn feed(&mut self, offset: f64) {
        self.list.scroll_to(-offset);
        self.offset = offset;
    }

    /// Render one frame and record it. Returns whether anything still moves.
    fn advance(&mut self, phase: Phase) -> bool {
        let dt = self.options.frame;
        self.clock.advance(dt);
        let animating = self.list.tick(dt);
        self.record(phase);
        animating
    }

    fn record(&mut self, phase: Phase) {
        let control = self.list.control();
        let body = control
            .layers()
            .body
            .path()
            .bounds()
            .map(|r| [r.x, r.y, r.width, r.height]);
        let record = FrameRecord {
            frame: self.frames.len(),
            t_ms: self.clock.elapsed().as_millis() as u64,
            phase,
            offset: self.offset,
            state: control.state().as_str(),
            visible: control.is_visible(),
            height: control.size().height,
            step: control.sequencer().session().map(|s| s.current_index()),
            body,
            rows: self.list.row_count(),
            inset: self.list.content_inset_top(),
        };
        pullbox_core::trace!(frame = record.frame, state = record.state, "frame");
        self.frames.push(record);
    }
}
