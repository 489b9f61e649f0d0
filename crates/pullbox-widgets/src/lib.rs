#![forbid(unsafe_code)]

//! Widgets for pullbox.
//!
//! # Role in pullbox
//! `pullbox-widgets` hosts the pull-to-archive control and the two small
//! collaborators it talks to: the archive summary cell it inserts on
//! completion, and a list host that models the scroll container feeding it.
//!
//! # This crate provides
//! - [`pull_archive`]: state machine, keyframe catalog, path geometry,
//!   release sequencer, and the [`PullToArchive`] control surface.
//! - [`archive_cell`]: the "Archived Chats" summary row and its layout.
//! - [`archive_list`]: a headless list that drives the control from scroll
//!   positions and inserts the summary row when the animation finishes.

pub mod archive_cell;
pub mod archive_list;
pub mod pull_archive;

pub use archive_cell::{ArchiveCell, ArchiveCellInfo};
pub use archive_list::{ArchiveList, ListRow};
pub use pull_archive::{InteractionState, PullConfig, PullMetrics, PullToArchive};
