//! `nexus` binary: cube-field demo over the nexus ECS.

use anyhow::Context;
use clap::Parser;
use nexus_app::{run_headless, SceneConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nexus", version, about = "Cube-field ECS demo")]
struct Args {
    /// Scene configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 100)]
    frames: u32,

    /// Override the configured entity count
    #[arg(long)]
    entities: Option<u32>,

    /// Open a window and render the scene
    #[cfg(feature = "windowed")]
    #[arg(long)]
    windowed: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config from {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(count) = args.entities {
        config.count = count;
    }

    #[cfg(feature = "windowed")]
    if args.windowed {
        nexus_app::run_windowed(&config).context("windowed demo failed")?;
        return Ok(());
    }

    let report = run_headless(&config, args.frames).context("headless demo failed")?;
    println!(
        "simulated {} entities for {} frames ({:.2}s of scene time)",
        report.entities,
        report.frames,
        report.simulated.as_secs_f32()
    );

    Ok(())
}
