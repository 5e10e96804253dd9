//! Squid Screensaver Entry Point
//!
//! Shows the event logo, schedule and swimming squids until `q`, Ctrl+C,
//! SIGINT or SIGTERM. Every one of those exits with success.
//!
//! Usage:
//!   squid-screensaver [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>  Event configuration (default: config.json)
//!   --seed <N>           Seed the random source for a reproducible run

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use squid_screensaver::config::load_config_from_path;
use squid_screensaver::terminal::{
    install_panic_hook, register_interrupt_signals, CrosstermKeys, TerminalGuard,
};
use squid_screensaver::{App, Canvas};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "squid-screensaver")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Event configuration file (JSON)
    #[arg(
        short = 'c',
        long,
        env = "SCREENSAVER_CONFIG",
        value_name = "FILE",
        default_value = "config.json"
    )]
    config: PathBuf,

    /// Seed for the random source
    #[arg(long, env = "SCREENSAVER_SEED", value_name = "N")]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; redirect it (2>log.txt) to keep the screen clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Config problems surface before the terminal is touched
    let config = load_config_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("squid-screensaver requires a terminal (TTY) on stdin and stdout");
    }

    let rng = match args.seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut app = App::new(config, Canvas::new(), rng);
    register_interrupt_signals(&app.interrupt_flag())
        .context("Failed to register signal handlers")?;

    install_panic_hook();
    let guard = TerminalGuard::enter().context("Failed to initialize terminal")?;

    let result = app.run(&mut io::stdout().lock(), &mut CrosstermKeys);

    // Restore before anything is reported
    drop(guard);

    let reason = result?;
    tracing::info!(?reason, "Screensaver stopped");
    Ok(())
}
