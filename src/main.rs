//! # Morph Clock Application Entry Point
//!
//! Terminal host for the morphing clock face. It loads the configuration, builds the
//! clock and either prints one settled frame (`--stdout`) or keeps the face animating
//! in place until Ctrl-C.
//!
//! ```text
//! morph-clock [--stdout] [--demo] [--config PATH] [--frames N]
//! ```


use std::{env, time::Duration};

use anyhow::{bail, Context};
use morph_clock_lib::{
    config::Config,
    driver::{Driver, LocalTime, ScaledTime, TimeSource},
    renderer::{draw_ascii, TerminalSink},
    Clock, TimeFields, TimeUnits,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulated seconds per real second in `--demo` mode: one minute every tick.
const DEMO_TIME_SCALE: u32 = 60;

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    stdout: bool,
    demo: bool,
    config: Option<String>,
    frames: Option<u64>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => parsed.stdout = true,
            "--demo" => parsed.demo = true,
            "--config" => {
                parsed.config = Some(args.next().context("--config needs a path")?);
            }
            "--frames" => {
                let n = args.next().context("--frames needs a number")?;
                parsed.frames = Some(n.parse().with_context(|| format!("bad frame count {n:?}"))?);
            }
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(parsed)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with frames on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(env::args().skip(1))?;
    let mut config = match &args.config {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => Config::load(),
    };
    if args.demo {
        config.animation.time_scale = DEMO_TIME_SCALE;
    }

    let mut clock = Clock::new(config.face());

    // Development mode: one settled frame, no animation
    if args.stdout {
        let now = TimeFields::from_datetime(&LocalTime.now());
        clock.set_time(&now, TimeUnits::ALL, false);
        draw_ascii(&mut clock, &config);
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let frame_interval = Duration::from_millis(config.animation.frame_interval_ms);
    let sink = TerminalSink::new(config.clone());

    let presented = rt.block_on(async {
        if config.animation.time_scale > 1 {
            info!(scale = config.animation.time_scale, "running on accelerated time");
            let time = ScaledTime::new(LocalTime.now(), config.animation.time_scale);
            let mut driver = Driver::new(clock, time, sink, frame_interval);
            driver.run(args.frames).await
        } else {
            let mut driver = Driver::new(clock, LocalTime, sink, frame_interval);
            driver.run(args.frames).await
        }
    })?;

    info!(presented, "animation frames presented");
    Ok(())
}
