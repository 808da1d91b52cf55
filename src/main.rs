//! Longrun main entry point
//!
//! This is the command-line interface for the Longrun world-record finder.

use clap::Parser;
use longrun::config::{parse_config_file, validate, Config};
use longrun::ReportDriver;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Longrun: find games with long Any% world records
///
/// Longrun walks the speedrun.com catalog for one platform and prints every
/// game whose fastest verified Any% run is longer than the given threshold.
/// Rate-limit responses are waited out, so large platforms can take hours.
#[derive(Parser, Debug)]
#[command(name = "longrun")]
#[command(version)]
#[command(about = "Find games with long Any% world records", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Platform name, matched exactly (e.g. "GameCube")
    #[arg(short, long)]
    platform: Option<String>,

    /// Minimum record length, hours part
    #[arg(long)]
    hours: Option<u32>,

    /// Minimum record length, minutes part
    #[arg(long)]
    minutes: Option<u32>,

    /// Only keep games with this genre (repeatable)
    #[arg(long = "include-genre", value_name = "GENRE")]
    include_genres: Vec<String>,

    /// Drop games with this genre (repeatable)
    #[arg(long = "exclude-genre", value_name = "GENRE")]
    exclude_genres: Vec<String>,

    /// Only keep games released on this platform alone
    #[arg(long)]
    exclusive: bool,

    /// Seconds to wait after a rate-limit response
    #[arg(long, value_name = "SECS")]
    cooldown_secs: Option<u64>,

    /// Do not warn on every rate-limit wait
    #[arg(long)]
    quiet_throttle: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be searched without making requests
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(platform) = &self.platform {
            config.search.platform = platform.clone();
        }
        if let Some(hours) = self.hours {
            config.search.min_hours = hours;
        }
        if let Some(minutes) = self.minutes {
            config.search.min_minutes = minutes;
        }
        if !self.include_genres.is_empty() {
            config.search.include_genres = self.include_genres.clone();
        }
        if !self.exclude_genres.is_empty() {
            config.search.exclude_genres = self.exclude_genres.clone();
        }
        if self.exclusive {
            config.search.platform_exclusive = true;
        }
        if let Some(secs) = self.cooldown_secs {
            config.api.rate_limit_cooldown_ms = secs.saturating_mul(1000);
        }
        if self.quiet_throttle {
            config.api.log_throttle = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_report(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only report lines.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("longrun=info,warn"),
            1 => EnvFilter::new("longrun=debug,info"),
            2 => EnvFilter::new("longrun=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies overrides, then validates
fn load_effective_config(cli: &Cli) -> Result<Config, longrun::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            parse_config_file(path)?
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Longrun Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!(
        "  Rate-limit cooldown: {}ms on {:?}",
        config.api.rate_limit_cooldown_ms, config.api.rate_limit_statuses
    );
    match config.api.page_size {
        Some(size) => println!("  Page size: {}", size),
        None => println!("  Page size: service default"),
    }

    println!("\nSearch:");
    println!("  Platform: {}", config.search.platform);
    println!(
        "  Longer than: {}h {:02}m",
        config.search.min_hours, config.search.min_minutes
    );
    println!("  Include genres: {:?}", config.search.include_genres);
    println!("  Exclude genres: {:?}", config.search.exclude_genres);
    println!("  Platform exclusive: {}", config.search.platform_exclusive);

    println!("\n✓ Configuration is valid");
}

/// Handles the main report run
async fn handle_report(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let driver = ReportDriver::new(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match driver.run(&mut out).await {
        Ok(summary) => {
            tracing::info!(
                "Done: {} listed, {} scanned, {} with Any% records, {} reported",
                summary.games_listed,
                summary.games_scanned,
                summary.records_found,
                summary.games_reported
            );
            tracing::info!(
                "{} requests, {} rate-limit waits",
                summary.requests,
                summary.throttle_waits
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Report failed: {}", e);
            Err(e.into())
        }
    }
}
