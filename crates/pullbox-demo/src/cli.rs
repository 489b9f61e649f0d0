use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pullbox_widgets::PullConfig;

use crate::error::{DemoError, Result};
use crate::script::{FrameRecord, GestureScript, RunSummary, ScriptOptions};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pullbox-demo",
    about = "Play a scripted pull-to-archive gesture and log every frame",
    version
)]
pub struct DemoArgs {
    /// JSON file with a (partial) control configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Multiply keyframe durations by this factor.
    #[arg(long, value_name = "SCALE")]
    pub slow_motion: Option<f64>,

    /// Width of the list in points.
    #[arg(long, default_value_t = 375.0)]
    pub width: f64,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Deepest pulled offset reached by the drag.
    #[arg(long, default_value_t = 120.0)]
    pub pull_to: f64,

    /// Duration of the drag in milliseconds.
    #[arg(long, default_value_t = 600)]
    pub drag_ms: u64,

    /// Emit one JSON object per frame instead of text.
    #[arg(long)]
    pub json: bool,

    /// Only print the final summary.
    #[arg(long)]
    pub quiet: bool,
}

impl DemoArgs {
    pub fn script_options(&self) -> ScriptOptions {
        ScriptOptions {
            width: self.width,
            frame: Duration::from_millis(self.frame_ms),
            pull_to: self.pull_to,
            drag_time: Duration::from_millis(self.drag_ms),
        }
    }

    /// Defaults, overlaid with `--config`, then `--slow-motion`.
    pub fn load_config(&self) -> Result<PullConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|source| DemoError::Config {
                        path: path.clone(),
                        source,
                    })?;
                let config: PullConfig = serde_json::from_str(&text)?;
                check_slow_motion(config.slow_motion)?;
                config
            }
            None => PullConfig::default(),
        };
        if let Some(scale) = self.slow_motion {
            check_slow_motion(scale)?;
            config = config.with_slow_motion(scale);
        }
        Ok(config)
    }
}

/// Largest slow-motion factor the demo accepts.
const MAX_SLOW_MOTION: f64 = 1_000.0;

fn check_slow_motion(scale: f64) -> Result<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(DemoError::invalid(format!(
            "slow motion must be positive, got {scale}"
        )));
    }
    if scale > MAX_SLOW_MOTION {
        return Err(DemoError::invalid(format!(
            "slow motion must be at most {MAX_SLOW_MOTION}, got {scale}"
        )));
    }
    Ok(())
}

pub fn run_from_env() -> Result<()> {
    let args = DemoArgs::parse();
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

pub fn run(args: &DemoArgs, out: &mut impl Write) -> Result<()> {
    let config = args.load_config()?;
    let mut script = GestureScript::new(config, args.script_options())?;
    let summary = script.run();
    if !args.quiet {
        for frame in script.frames() {
            if args.json {
                writeln!(out, "{}", serde_json::to_string(frame)?)?;
            } else {
                writeln!(out, "{}", format_frame(frame))?;
            }
        }
    }
    if args.json {
        writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    } else {
        writeln!(out, "{}", format_summary(&summary))?;
    }
    Ok(())
}

fn format_frame(frame: &FrameRecord) -> String {
    let step = frame
        .step
        .map_or_else(|| "-".to_owned(), |s| s.to_string());
    format!(
        "{:>5} {:>6}ms {:<7} offset={:>6.1} height={:>6.1} \
         state={:<11} step={} rows={} inset={}",
        frame.frame,
        frame.t_ms,
        frame.phase.as_str(),
        frame.offset,
        frame.height,
        frame.state,
        step,
        frame.rows,
        frame.inset,
    )
}

fn format_summary(summary: &RunSummary) -> String {
    format!(
        "frames={} released={} archived={} rows={} state={}",
        summary.frames, summary.released, summary.completed, summary.rows, summary.final_state
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{DemoArgs, run};

    fn parse(args: &[&str]) -> DemoArgs {
        DemoArgs::try_parse_from(std::iter::once("pullbox-demo").chain(args.iter().copied()))
            .expect("parse")
    }

    #[test]
    fn defaults_parse() {
        let args = parse(&[]);
        assert_eq!(args.width, 375.0);
        assert_eq!(args.frame_ms, 16);
        assert_eq!(args.pull_to, 120.0);
        assert!(!args.json);
        assert!(args.config.is_none());
    }

    #[test]
    fn flags_parse() {
        let args = parse(&["--width", "320", "--slow-motion", "4", "--json", "--quiet"]);
        assert_eq!(args.width, 320.0);
        assert_eq!(args.slow_motion, Some(4.0));
        assert!(args.json && args.quiet);
        assert_eq!(args.load_config().expect("config").slow_motion, 4.0);
    }

    #[test]
    fn bad_slow_motion_is_rejected() {
        let args = parse(&["--slow-motion", "0"]);
        let err = args.load_config().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn oversized_slow_motion_flag_is_rejected() {
        let args = parse(&["--slow-motion", "1e30"]);
        let err = args.load_config().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("at most"), "{err}");
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = parse(&["--config", "/definitely/not/here.json"]);
        let err = args.load_config().unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn quiet_text_run_prints_summary_only() {
        let args = parse(&["--quiet"]);
        let mut out = Vec::new();
        run(&args, &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("released=true archived=true rows=3"));
    }

    #[test]
    fn json_run_emits_parseable_lines() {
        let args = parse(&["--json", "--pull-to", "40"]);
        let mut out = Vec::new();
        run(&args, &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");
        let last = text.lines().last().expect("summary line");
        let summary: serde_json::Value = serde_json::from_str(last).expect("json");
        assert_eq!(summary["released"], false);
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            assert!(value.is_object());
        }
    }
}
