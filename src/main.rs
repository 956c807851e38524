use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use stockview::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for stockview::AppCommand {
    fn from(cmd: Commands) -> stockview::AppCommand {
        match cmd {
            Commands::Quote { symbol, json } => stockview::AppCommand::Quote { symbol, json },
            Commands::History {
                symbol,
                range,
                json,
            } => stockview::AppCommand::History {
                symbol,
                range,
                json,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the current price and percent change for a symbol
    Quote {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Chart recent daily closing prices for a symbol
    History {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
        /// Window to show: 30d, 3m or 6m (unrecognised values use 6m)
        #[arg(short, long)]
        range: Option<String>,
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => stockview::cli::setup::setup(),
        Some(cmd) => stockview::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
