#![forbid(unsafe_code)]

//! The "Archived Chats" summary row.
//!
//! A static cell: a bold title, a two-line subtitle listing archived chat
//! names, and an unread-count badge in the bottom-right corner. Text is not
//! measured; lines have a fixed height from [`ArchiveCellMetrics`].

use pullbox_core::geometry::{Rect, Size};
use pullbox_style::Rgba;

/// Content of the summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArchiveCellInfo {
    pub title: String,
    /// Leading chat names, comma separated.
    pub subtitle: String,
    /// Trailing name appended after `subtitle`.
    pub more: String,
    pub count: u32,
}

impl Default for ArchiveCellInfo {
    fn default() -> Self {
        Self {
            title: "Archived Chats".to_owned(),
            subtitle: "Morton Robbins, Jordan Conner, Richard Mitchel, ".to_owned(),
            more: "Dane Blake".to_owned(),
            count: 34,
        }
    }
}

impl ArchiveCellInfo {
    /// Full subtitle line as displayed.
    pub fn subtitle_text(&self) -> String {
        format!("{}{}", self.subtitle, self.more)
    }
}

/// Fixed layout numbers of the summary row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveCellMetrics {
    /// Text column starts here, leaving room for the avatar.
    pub left_shift: f64,
    pub right_padding: f64,
    pub title_top: f64,
    pub line_height: f64,
    pub subtitle_lines: u8,
    /// Gap between title and subtitle.
    pub spacing: f64,
    pub badge_size: Size,
    /// Distance of the badge's top-left corner from the right and bottom edges.
    pub badge_inset: f64,
    pub badge_color: Rgba,
}

impl Default for ArchiveCellMetrics {
    fn default() -> Self {
        Self {
            left_shift: 80.0,
            right_padding: 50.0,
            title_top: 8.0,
            line_height: 20.0,
            subtitle_lines: 2,
            spacing: 3.0,
            badge_size: Size::new(28.0, 20.0),
            badge_inset: 36.0,
            badge_color: Rgba::from_hex(0xaaaaaa).with_alpha(0.8),
        }
    }
}

/// Frames of the row's parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveCellLayout {
    pub title: Rect,
    pub subtitle: Rect,
    pub badge: Rect,
    pub badge_corner: f64,
}

/// A laid-out summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveCell {
    info: ArchiveCellInfo,
    metrics: ArchiveCellMetrics,
    layout: Option<ArchiveCellLayout>,
}

impl ArchiveCell {
    pub fn new(info: ArchiveCellInfo) -> Self {
        Self {
            info,
            metrics: ArchiveCellMetrics::default(),
            layout: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: ArchiveCellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[inline]
    pub fn info(&self) -> &ArchiveCellInfo {
        &self.info
    }

    /// Replace the content. The layout is kept; text is not measured.
    pub fn set_info(&mut self, info: ArchiveCellInfo) {
        self.info = info;
    }

    #[inline]
    pub fn metrics(&self) -> &ArchiveCellMetrics {
        &self.metrics
    }

    /// Last computed layout, if any.
    #[inline]
    pub fn frames(&self) -> Option<&ArchiveCellLayout> {
        self.layout.as_ref()
    }

    /// Lay the row out in `size`. The text column never goes negative.
    pub fn layout(&mut self, size: Size) -> ArchiveCellLayout {
        let m = &self.metrics;
        let column = (size.width - m.left_shift - m.right_padding).max(0.0);
        let title = Rect::new(m.left_shift, m.title_top, column, m.line_height);
        let subtitle = Rect::new(
            m.left_shift,
            title.max_y() + m.spacing,
            column,
            m.line_height * f64::from(m.subtitle_lines),
        );
        let badge = Rect::new(
            size.width - m.badge_inset,
            size.height - m.badge_inset,
            m.badge_size.width,
            m.badge_size.height,
        );
        let layout = ArchiveCellLayout {
            title,
            subtitle,
            badge,
            badge_corner: m.badge_size.height / 2.0,
        };
        self.layout = Some(layout);
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content() {
        let info = ArchiveCellInfo::default();
        assert_eq!(info.title, "Archived Chats");
        assert_eq!(info.count, 34);
        assert!(info.subtitle_text().ends_with(", Dane Blake"));
    }

    #[test]
    fn layout_in_released_row() {
        let mut cell = ArchiveCell::new(ArchiveCellInfo::default());
        assert!(cell.frames().is_none());
        let layout = cell.layout(Size::new(375.0, 80.0));
        assert_eq!(layout.title, Rect::new(80.0, 8.0, 245.0, 20.0));
        assert_eq!(layout.subtitle, Rect::new(80.0, 31.0, 245.0, 40.0));
        assert_eq!(layout.badge, Rect::new(339.0, 44.0, 28.0, 20.0));
        assert_eq!(layout.badge_corner, 10.0);
        assert_eq!(cell.frames(), Some(&layout));
    }

    #[test]
    fn narrow_row_clamps_text_column() {
        let mut cell = ArchiveCell::new(ArchiveCellInfo::default());
        let layout = cell.layout(Size::new(100.0, 80.0));
        assert_eq!(layout.title.width, 0.0);
    }
}
