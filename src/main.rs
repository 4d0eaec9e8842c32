use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use didyoufeelit::Event;
use didyoufeelit::config::{
    FileConfig, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS, Overrides, Settings,
};
use didyoufeelit::display::{OutputFormat, render_json, render_text};
use didyoufeelit::spawn_load;

/// Show the perceived strength of an earthquake from "Did You Feel It?" reports
///
/// Fetches earthquakes from the USGS event service and shows the first one:
/// its title, how many people reported feeling it, and the perceived strength.
///
/// Examples:
///   # The default query (early 2016, M5+, at least 50 reports)
///   didyoufeelit
///
///   # A different time window and threshold
///   didyoufeelit --start 2023-02-01 --end 2023-03-01 --min-felt 500
///
///   # Machine-readable output
///   didyoufeelit --format json
#[derive(Parser, Debug)]
#[command(name = "didyoufeelit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches didyoufeelit.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Full request URL, replacing the built USGS query
    #[arg(long)]
    url: Option<String>,

    /// Start of the time window (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// End of the time window (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,

    /// Minimum number of felt reports
    #[arg(long)]
    min_felt: Option<u32>,

    /// Minimum magnitude
    #[arg(long, allow_hyphen_values = true)]
    min_magnitude: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS))]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            start_time: self.start.clone(),
            end_time: self.end.clone(),
            min_felt: self.min_felt,
            min_magnitude: self.min_magnitude,
            timeout_secs: self.timeout,
            format: self.format,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_config = match args.config {
        Some(ref config_path) => Some(FileConfig::from_path(config_path)?),
        None => FileConfig::load(),
    };
    let settings = Settings::resolve(file_config.as_ref(), &args.overrides());

    let start = Instant::now();
    let event = match settings.request_url() {
        Ok(url) => {
            let spinner = (settings.format == OutputFormat::Text)
                .then(|| create_spinner("Fetching earthquake data..."));
            let pending = spawn_load(url, settings.fetch);
            pending.on_complete(|event| {
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
                event
            })
        }
        Err(e) => {
            warn!(error = %e, "could not build request url");
            Event::default()
        }
    };
    info!(
        elapsed_secs = start.elapsed().as_secs_f32(),
        found = !event.is_empty(),
        "load finished"
    );

    match settings.format {
        OutputFormat::Text => println!("{}", render_text(&event)),
        OutputFormat::Json => {
            println!(
                "{}",
                render_json(&event).context("Failed to serialize event")?
            )
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("didyoufeelit={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
