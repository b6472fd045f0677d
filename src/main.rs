use anyhow::Result;
use clap::{Parser, Subcommand};

/// lunchboard - school cafeteria menu API and widget
#[derive(Parser)]
#[command(name = "lunchboard")]
#[command(about = "Fetches, normalizes, and serves a school cafeteria's weekly menu", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = lunchboard::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    lunchboard::observability::init_observability(
        "lunchboard",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => lunchboard::cli::server::serve(config, host, port).await,
    }
}
