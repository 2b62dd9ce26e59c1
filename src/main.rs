//! Trace replay tool for the proctoring violation tracker.
//!
//! Replays a text trace of per-frame geometry measurements through the
//! tracker and prints the verdict for each frame, standing in for the
//! exam-session HTTP layer. Each trace line is `face_count[,pitch,yaw]`;
//! blank lines and `#` comments are skipped.

use anyhow::{bail, Context, Result};
use clap::Parser;
use exam_proctoring::config::ProctoringConfig;
use exam_proctoring::geometry::HeadPose;
use exam_proctoring::tracker::ViolationTracker;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trace file of per-frame measurements (face_count[,pitch,yaw])
    trace: String,

    /// User id to attribute the session to
    #[arg(short, long, default_value = "1")]
    user: u64,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// One trace line: a face count and, for single-face frames, the fitted pose
fn parse_trace_line(line: &str) -> Result<Option<(usize, Option<HeadPose>)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let face_count: usize = fields[0]
        .parse()
        .with_context(|| format!("invalid face count: {:?}", fields[0]))?;

    let head_pose = match fields.len() {
        1 => None,
        3 => {
            let pitch: f64 = fields[1]
                .parse()
                .with_context(|| format!("invalid pitch: {:?}", fields[1]))?;
            let yaw: f64 = fields[2]
                .parse()
                .with_context(|| format!("invalid yaw: {:?}", fields[2]))?;
            Some(HeadPose::new(pitch, yaw))
        }
        n => bail!("expected 1 or 3 fields, got {n}: {line:?}"),
    };

    Ok(Some((face_count, head_pose)))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        let config = ProctoringConfig::from_file(config_path)?;
        config.validate()?;
        config
    } else {
        ProctoringConfig::default()
    };

    let tracker = ViolationTracker::new(config);
    tracker.initialize(args.user);

    let trace = std::fs::read_to_string(&args.trace).with_context(|| format!("reading trace {:?}", args.trace))?;

    let mut frame = 0usize;
    let mut violations = 0usize;
    for (line_no, line) in trace.lines().enumerate() {
        let Some((face_count, head_pose)) =
            parse_trace_line(line).with_context(|| format!("trace line {}", line_no + 1))?
        else {
            continue;
        };

        frame += 1;
        let verdict = tracker.analyze(args.user, face_count, head_pose)?;
        if verdict.cheating_detected {
            violations += 1;
        }
        println!(
            "frame {frame:4}  faces={face_count}  score={:.3}  {}",
            verdict.suspicion_score,
            if verdict.cheating_detected {
                format!("VIOLATION: {}", verdict.reason)
            } else {
                verdict.reason
            }
        );
    }

    tracker.clear(args.user);
    println!("{frame} frames analyzed, {violations} with a cheating verdict");

    Ok(())
}
