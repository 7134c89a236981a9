use anyhow::Result;
use clap::{Parser, Subcommand};
use pbrates::core::log::init_logging;

/// Fetch EUR and USD exchange rates from the PrivatBank archive for the past few days
#[derive(Parser)]
#[command(version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Number of days to fetch, counting back from yesterday (up to 10)
    #[arg(default_value_t = pbrates::DEFAULT_DAYS)]
    days: u32,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = if cli.json {
        pbrates::OutputFormat::Json
    } else {
        pbrates::OutputFormat::Table
    };

    let result = match cli.command {
        Some(Commands::Setup) => pbrates::cli::setup::setup(),
        None => pbrates::run(cli.days, format, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
