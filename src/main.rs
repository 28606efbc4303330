mod config;
mod monitor;
mod probe;
mod tracker;

use clap::Parser;
use config::MonitorConfig;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Launch a child process and report changes in its resident memory until it
/// exits: spawn, sample RSS once per tick, print a line only when the value
/// moved.
#[derive(Parser, Debug)]
#[command(name = "memwatch", version, about)]
pub struct Cli {
    /// Interval in seconds forwarded to the child as its second argument
    #[arg(value_name = "INTERVAL", default_value = "5")]
    interval: String,

    /// Config file path forwarded to the child as its first argument
    #[arg(value_name = "CONFIG", default_value = "price_feed_tally.json")]
    config: String,

    /// Child executable to launch
    #[arg(long, default_value = "./mem-test")]
    command: String,

    /// Sampling cadence of the monitor loop itself, in seconds
    #[arg(long, default_value_t = 1)]
    tick_secs: u64,

    /// Extra logging (per-tick probe results)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
    tracing::debug!(?cli, "parsed CLI arguments");

    if let Err(msg) = config::parse_interval(&cli.interval) {
        eprintln!("memwatch: {msg}");
        std::process::exit(2);
    }
    if cli.tick_secs == 0 {
        eprintln!("memwatch: --tick-secs must be positive");
        std::process::exit(2);
    }

    let config = MonitorConfig {
        command: cli.command,
        config_arg: cli.config,
        interval_arg: cli.interval,
        tick: Duration::from_secs(cli.tick_secs),
    };

    println!(
        "Running {} every {} seconds",
        config.child_name(),
        config.interval_arg
    );

    match monitor::run(&config, &probe::PsProbe, |event| println!("{event}")).await {
        Ok(outcome) => {
            tracing::debug!(
                ticks = outcome.ticks,
                last_rss_kb = ?outcome.last_rss_kb,
                "monitor loop finished"
            );
        }
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    }
}
