//! CLI application for statement/receipt ingestion.

mod commands;
mod store;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, import, parse, receipt};

/// fintake - Turn bank statements and receipts into clean transactions
#[derive(Parser)]
#[command(name = "fintake")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement into candidate records without importing
    Parse(parse::ParseArgs),

    /// Parse a statement and import its records into the ledger
    Import(import::ImportArgs),

    /// Import a single receipt from OCR text
    Receipt(receipt::ReceiptArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()).await,
        Commands::Import(args) => import::run(args, cli.config.as_deref()).await,
        Commands::Receipt(args) => receipt::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
