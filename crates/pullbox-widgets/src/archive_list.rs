#![forbid(unsafe_code)]

//! A headless list that hosts the pull-to-archive control.
//!
//! [`ArchiveList`] plays the scroll container's part: it turns scroll
//! positions into pulled offsets, holds the content inset while the release
//! animation plays, and inserts the summary row when the control reports
//! completion.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use pullbox_core::clock::Clock;

use crate::archive_cell::ArchiveCellInfo;
use crate::pull_archive::{InteractionState, PullConfig, PullToArchive};

/// An ordinary chat row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub title: String,
    pub subtitle: String,
}

impl ListRow {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// The two rows shown by the demo.
    pub fn samples() -> Vec<Self> {
        vec![
            Self::new("John", "Everything is ok"),
            Self::new("Sara", "Looking for something"),
        ]
    }
}

/// List host owning one pull-to-archive control at a time.
#[derive(Debug)]
pub struct ArchiveList<C: Clock + Clone> {
    rows: Vec<ListRow>,
    summary: Option<ArchiveCellInfo>,
    content_inset_top: f64,
    width: f64,
    config: PullConfig,
    clock: C,
    control: PullToArchive<C>,
    completed: Rc<Cell<bool>>,
}

impl<C: Clock + Clone> ArchiveList<C> {
    pub fn new(width: f64, config: PullConfig, clock: C) -> Self {
        let completed = Rc::new(Cell::new(false));
        let control = Self::fresh_control(&config, &clock, width, &completed, false);
        Self {
            rows: ListRow::samples(),
            summary: None,
            content_inset_top: 0.0,
            width,
            config,
            clock,
            control,
            completed,
        }
    }

    #[must_use]
    pub fn with_rows(mut self, rows: Vec<ListRow>) -> Self {
        self.rows = rows;
        self
    }

    fn fresh_control(
        config: &PullConfig,
        clock: &C,
        width: f64,
        completed: &Rc<Cell<bool>>,
        summary_attached: bool,
    ) -> PullToArchive<C> {
        let mut control = PullToArchive::build(config.clone(), clock.clone());
        control.set_width(width);
        control.set_summary_attached(summary_attached);
        let flag = Rc::clone(completed);
        control.on_release_completed(move || flag.set(true));
        control
    }

    #[inline]
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    /// The inserted summary row, once an archive gesture has completed.
    #[inline]
    pub fn summary(&self) -> Option<&ArchiveCellInfo> {
        self.summary.as_ref()
    }

    /// Rows including the summary row.
    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(self.summary.is_some())
    }

    #[inline]
    pub fn content_inset_top(&self) -> f64 {
        self.content_inset_top
    }

    #[inline]
    pub fn control(&self) -> &PullToArchive<C> {
        &self.control
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.control.state()
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.control.set_width(width);
    }

    /// Scroll to `origin_y`. Negative values pull the list down.
    pub fn scroll_to(&mut self, origin_y: f64) {
        if origin_y > 0.0 {
            self.control.on_scroll_offset_changed(0.0);
            return;
        }
        self.control.on_scroll_offset_changed(-origin_y);
    }

    /// The drag ended. Holds the inset open if the release was accepted.
    pub fn end_dragging(&mut self) -> bool {
        let released = self.control.on_drag_ended();
        if released {
            self.content_inset_top = self.config.metrics.released_height;
        }
        released
    }

    /// Advance the control. Returns whether it is still animating.
    ///
    /// On completion the summary row is inserted, the inset cleared, and a
    /// fresh control takes over for the next gesture.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let animating = self.control.tick(dt);
        if self.completed.replace(false) {
            self.summary = Some(self.config.placeholder.clone());
            self.content_inset_top = 0.0;
            self.control =
                Self::fresh_control(&self.config, &self.clock, self.width, &self.completed, true);
            pullbox_core::debug!(rows = self.row_count(), "summary row inserted");
            return false;
        }
        animating
    }
}
