//! Settlers scenario runner.
//!
//! Usage: `settlers-sim [config.json] <scenario.json>`
//!
//! The config path may also come from `SETTLERS_CONFIG`, in which case the
//! only argument is the scenario. Without a config the base game is used.
//! The report is printed to stdout as JSON; logs go to stderr.

use anyhow::Context;
use settlers_engine::GameConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod dice;
mod runner;
mod scenario;

use runner::Simulation;
use scenario::Scenario;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = std::env::var("SETTLERS_CONFIG").ok().or_else(|| {
        if args.len() > 1 {
            args.next()
        } else {
            None
        }
    });
    let scenario_path = args
        .next()
        .context("usage: settlers-sim [config.json] <scenario.json>")?;

    let config = match config_path {
        Some(path) => GameConfig::from_path(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => GameConfig::default(),
    };
    let scenario = Scenario::from_path(&scenario_path)
        .with_context(|| format!("loading scenario from {scenario_path}"))?;

    info!("Running scenario {scenario_path}...");

    let mut sim = Simulation::new(config, &scenario)?;
    sim.run(&scenario.steps)?;
    let report = sim.finish();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
