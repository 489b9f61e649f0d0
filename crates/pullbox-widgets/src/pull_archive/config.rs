#![forbid(unsafe_code)]

//! Construction-time configuration for the pull-to-archive control.
//!
//! Every number the layout and path code needs lives here under a name;
//! geometry functions take these structs and read no implicit constants.

use std::time::Duration;

use pullbox_style::{Gradient, Rgba};

use super::state::InteractionState;
use crate::archive_cell::ArchiveCellInfo;

/// Arrow glyph dimensions, relative to the circle center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrowMetrics {
    /// Half the chevron's width.
    pub head_half_width: f64,
    /// Half the chevron's height.
    pub head_half_height: f64,
    /// Shaft end below the chevron tip's baseline.
    pub shaft_length: f64,
    /// Vertical shift applied to every arrow point.
    pub vertical_shift: f64,
    /// Stroke width of chevron and shaft.
    pub line_width: f64,
    /// Half the width of the flat bar shown once released.
    pub bar_half_width: f64,
    /// Rotation while pulling (arrow points down).
    pub pulling_rotation: f64,
    /// Rotation once release is possible. Slightly off zero so rotating
    /// back from -π always turns the same way.
    pub release_rotation: f64,
}

impl Default for ArrowMetrics {
    fn default() -> Self {
        Self {
            head_half_width: 4.5,
            head_half_height: 2.5,
            shaft_length: 7.0,
            vertical_shift: -2.0,
            line_width: 2.0,
            bar_half_width: 5.0,
            pulling_rotation: -std::f64::consts::PI,
            release_rotation: 0.001,
        }
    }
}

/// Layout and timing metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PullMetrics {
    /// Height at which the indicator is fully revealed.
    pub min_height: f64,
    /// Pulled offset at which releasing becomes possible.
    pub action_release_threshold: f64,
    /// Height of the inserted summary row and of the held inset while releasing.
    pub released_height: f64,
    /// Mask radius while releasing and done.
    pub blue_circle_size: f64,
    pub arrow_circle_radius: f64,
    pub left_padding: f64,
    pub bottom_padding: f64,
    /// Transition duration for drag-class states.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub pull_duration: Duration,
    /// Transition duration for release-class states.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub release_duration: Duration,
    /// Gradient mask radius transition.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub mask_duration: Duration,
    /// Settle time of the label slide springs.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub label_settle: Duration,
    pub label_damping_ratio: f64,
    /// Minimum spacing between two offset-driven state changes.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub debounce_window: Duration,
    /// Typical box height used to center the box in the released row.
    pub mean_box_height: f64,
    /// Extra downward nudge of the box while it is animating.
    pub box_settle_offset: f64,
    /// Vertical offset of the connector line from the circle center.
    pub connector_base_offset: f64,
    pub label_height: f64,
    pub stripe_opacity: f64,
    pub arrow: ArrowMetrics,
}

impl Default for PullMetrics {
    fn default() -> Self {
        Self {
            min_height: 36.0,
            action_release_threshold: 80.0,
            released_height: 80.0,
            blue_circle_size: 30.5,
            arrow_circle_radius: 10.0,
            left_padding: 30.0,
            bottom_padding: 8.0,
            pull_duration: Duration::from_millis(200),
            release_duration: Duration::from_millis(300),
            mask_duration: Duration::from_millis(200),
            label_settle: Duration::from_millis(500),
            label_damping_ratio: 0.7,
            debounce_window: Duration::from_millis(500),
            mean_box_height: 25.0,
            box_settle_offset: 2.0,
            connector_base_offset: -5.0,
            label_height: 44.0,
            stripe_opacity: 0.35,
            arrow: ArrowMetrics::default(),
        }
    }
}

impl PullMetrics {
    /// Vertical shift that centers the box inside the released row.
    #[must_use]
    pub fn box_shift(&self) -> f64 {
        -((self.released_height - self.mean_box_height) / 2.0 - self.bottom_padding)
    }

    /// Shift applied to every keyframe while the release sequence plays.
    #[must_use]
    pub fn sequence_shift(&self) -> f64 {
        self.box_shift() + self.box_settle_offset
    }

    #[inline]
    #[must_use]
    pub fn circle_diameter(&self) -> f64 {
        self.arrow_circle_radius * 2.0
    }

    /// Duration of the entry animation for `state`.
    #[must_use]
    pub fn transition_duration(&self, state: InteractionState) -> Duration {
        if state.is_dragging() {
            self.pull_duration
        } else {
            self.release_duration
        }
    }
}

/// Full control configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PullConfig {
    pub swipe_text: String,
    pub release_text: String,
    pub metrics: PullMetrics,
    /// Arrow stroke while pulling.
    pub pulling_color: Rgba,
    /// Arrow stroke once release is possible.
    pub release_color: Rgba,
    /// Fill of the circle, box, cap and stripe.
    pub indicator_color: Rgba,
    pub label_color: Rgba,
    pub idle_gradient: Gradient,
    pub release_gradient: Gradient,
    /// Slow-motion multiplier for the release keyframes (1, 5 or 10).
    pub slow_motion: f64,
    /// Content of the transient card attached while releasing.
    pub placeholder: ArchiveCellInfo,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            swipe_text: "Swipe down for archive".to_owned(),
            release_text: "Release for archive".to_owned(),
            metrics: PullMetrics::default(),
            pulling_color: Rgba::from_hex(0xb0b0b0),
            release_color: Rgba::from_hex(0x0d8cfe),
            indicator_color: Rgba::WHITE,
            label_color: Rgba::WHITE,
            idle_gradient: Gradient::radial(Rgba::from_hex(0xb4b9c0), Rgba::from_hex(0xdadada)),
            release_gradient: Gradient::radial(
                Rgba::from_hex(0x0885f2),
                Rgba::from_hex(0x75c5fd),
            ),
            slow_motion: 1.0,
            placeholder: ArchiveCellInfo::default(),
        }
    }
}

impl PullConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swipe_text(mut self, text: impl Into<String>) -> Self {
        self.swipe_text = text.into();
        self
    }

    pub fn with_release_text(mut self, text: impl Into<String>) -> Self {
        self.release_text = text.into();
        self
    }

    pub fn with_metrics(mut self, metrics: PullMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_colors(mut self, pulling: Rgba, release: Rgba) -> Self {
        self.pulling_color = pulling;
        self.release_color = release;
        self
    }

    pub fn with_arrow_circle_radius(mut self, radius: f64) -> Self {
        self.metrics.arrow_circle_radius = radius;
        self
    }

    pub fn with_padding(mut self, left: f64, bottom: f64) -> Self {
        self.metrics.left_padding = left;
        self.metrics.bottom_padding = bottom;
        self
    }

    pub fn with_durations(mut self, pull: Duration, release: Duration) -> Self {
        self.metrics.pull_duration = pull;
        self.metrics.release_duration = release;
        self
    }

    /// Set the slow-motion multiplier. Non-finite or non-positive values
    /// fall back to 1.
    pub fn with_slow_motion(mut self, scale: f64) -> Self {
        self.slow_motion = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self
    }
}

/// Durations as integer milliseconds.
#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
