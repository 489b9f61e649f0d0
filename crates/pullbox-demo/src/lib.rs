#![forbid(unsafe_code)]

//! Scripted gesture runner for the pull-to-archive control.
//!
//! Drives an [`pullbox_widgets::ArchiveList`] through one drag-hold-release
//! cycle on a manual clock and prints the scene frame by frame, as text or
//! JSON lines.

pub mod cli;
pub mod error;
pub mod script;

pub use cli::{DemoArgs, run, run_from_env};
pub use error::{DemoError, Result};
pub use script::{FrameRecord, GestureScript, Phase, RunSummary, ScriptOptions};

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
