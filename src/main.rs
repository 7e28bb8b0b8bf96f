use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxform::core::Currency;
use fxform::core::log::init_logging;

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert a single amount
    Convert {
        /// Amount to convert
        amount: String,
        /// Source currency (EUR, USD, CZK)
        #[arg(short, long)]
        from: Option<Currency>,
        /// Target currency (EUR, USD, CZK)
        #[arg(short, long)]
        to: Option<Currency>,
    },
    /// Open the conversion form
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxform::cli::setup::setup(),
        Some(Commands::Convert { amount, from, to }) => {
            fxform::run_command(
                fxform::AppCommand::Convert { amount, from, to },
                cli.config_path.as_deref(),
            )
            .await
        }
        Some(Commands::Interactive) => {
            fxform::run_command(fxform::AppCommand::Interactive, cli.config_path.as_deref()).await
        }
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
