use analytics::{AnalyticsEngine, NumberLocale};
use anyhow::{Context, Result};
use api_client::{CachedProvider, FreshnessPolicy, SheetsClient};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{Config, ConfigArgs};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

mod dashboard;
mod format;
mod render;

use dashboard::{Dashboard, Tabs};

/// The main entry point for the Meridian report.
#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; it only supplies MERIDIAN__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Report(args) => &args.config.config,
        Commands::Series(args) => &args.config.config,
    };
    let config = configuration::load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let locale = &config.locale;
    let engine = AnalyticsEngine::new(NumberLocale::new(
        locale.decimal_separator,
        locale.thousands_separator,
        locale.currency_marker.clone(),
        locale.percent_marker.clone(),
    )?);
    let provider = CachedProvider::new(
        SheetsClient::new(&config.source)?,
        FreshnessPolicy::new(config.cache.ttl),
    );

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config, &engine, &provider).await,
        Commands::Series(_) => handle_series(&config, &engine, &provider).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Fund performance and allocation report built from a shared spreadsheet.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the performance, allocation and asset sections.
    Report(ReportArgs),
    /// Write the NAV, AUM and benchmark series as CSV to stdout.
    Series(SeriesArgs),
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Number of most recent series points shown in table output.
    #[arg(long, default_value_t = 12)]
    history_rows: usize,
}

#[derive(Parser)]
struct SeriesArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Downloads all tabs behind a spinner.
async fn fetch_with_progress(config: &Config, provider: &CachedProvider<SheetsClient>) -> Result<Tabs> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Fetching spreadsheet tabs...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let tabs = dashboard::fetch_tabs(provider, config).await;

    spinner.finish_and_clear();
    Ok(tabs)
}

async fn handle_report(
    args: ReportArgs,
    config: &Config,
    engine: &AnalyticsEngine,
    provider: &CachedProvider<SheetsClient>,
) -> Result<()> {
    let tabs = fetch_with_progress(config, provider).await?;
    let dashboard = Dashboard::assemble(&tabs, config, engine);

    match args.format {
        OutputFormat::Table => print!("{}", render::render_dashboard(&dashboard, args.history_rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
    }

    Ok(())
}

async fn handle_series(
    config: &Config,
    engine: &AnalyticsEngine,
    provider: &CachedProvider<SheetsClient>,
) -> Result<()> {
    let tabs = fetch_with_progress(config, provider).await?;
    let dashboard = Dashboard::assemble(&tabs, config, engine);

    for warning in &dashboard.warnings {
        eprintln!("warning: {}", warning);
    }

    let stdout = io::stdout();
    render::write_series_csv(stdout.lock(), &dashboard.series)?;
    Ok(())
}
