//! Gesture control replay driver.
//!
//! Replays a recorded observation trace through a capture session and
//! reports every action that would have been dispatched. Live camera
//! capture and the landmark model sit outside this crate; a trace stands
//! in for them here.

use anyhow::{bail, Result};
use clap::Parser;
use gesture_control::config::Config;
use gesture_control::dispatch::{ActionDispatcher, ConsoleDispatcher, NullDispatcher};
use gesture_control::landmarks::{FrameObservations, LandmarkProvider, TraceProvider};
use gesture_control::session::GestureSession;
use log::{debug, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded observation trace to replay (JSON)
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Override the session log location
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Disable the session log
    #[arg(long)]
    no_log: bool,

    /// Drop actions instead of reporting key chords
    #[arg(long)]
    dry_run: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{}", gesture_control::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    info!("Gesture Control - trace replay");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(log_path) = args.log {
        config.log.path = log_path;
    }
    if args.no_log {
        config.log.enabled = false;
    }

    let Some(trace_path) = args.trace else {
        bail!("a trace file is required (see --help)");
    };

    let mut provider = TraceProvider::from_file(&trace_path)?;
    info!("Loaded {} frames from {}", provider.len(), trace_path.display());

    let summary = if args.dry_run {
        replay(&config, &mut provider, NullDispatcher)?
    } else {
        replay(&config, &mut provider, ConsoleDispatcher)?
    };

    println!(
        "{} frames, {} actions dispatched, {} dispatch failures",
        summary.frames, summary.dispatched, summary.failed
    );

    Ok(())
}

struct ReplaySummary {
    frames: usize,
    dispatched: usize,
    failed: usize,
}

/// Feed every trace frame through a session at the trace's own timestamps
fn replay<D: ActionDispatcher>(
    config: &Config,
    provider: &mut TraceProvider,
    dispatcher: D,
) -> Result<ReplaySummary> {
    let mut session = GestureSession::new(config, dispatcher)?;
    session.start()?;

    let base = Instant::now();
    let mut dispatched = 0;
    let mut failed = 0;

    for index in 0..provider.len() {
        let observations = FrameObservations {
            hands: provider.detect_hands(&index)?,
            face: provider.detect_face(&index)?,
        };
        let offset = provider.time_of(index).unwrap_or(0.0).max(0.0);
        let now = base + Duration::from_secs_f64(offset);

        let report = session.process_frame(&observations, now)?;
        debug!("frame {index} @ {offset:.3}s: {}", report.hud_line());

        for item in &report.dispatched {
            if item.outcome.is_dispatched() {
                dispatched += 1;
                println!("[{offset:7.3}s] {}: {} -> {}", item.source.as_str(), item.label, item.action);
            } else {
                failed += 1;
            }
        }
    }

    session.stop();
    Ok(ReplaySummary {
        frames: provider.len(),
        dispatched,
        failed,
    })
}
