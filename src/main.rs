use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use yenconv::core::log::init_logging;

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

impl From<Commands> for yenconv::AppCommand {
    fn from(cmd: Commands) -> yenconv::AppCommand {
        match cmd {
            Commands::Rate { reverse } => yenconv::AppCommand::Rate { reverse },
            Commands::Convert { amount, reverse } => {
                yenconv::AppCommand::Convert { amount, reverse }
            }
            Commands::Interactive { reverse } => yenconv::AppCommand::Interactive { reverse },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the current exchange rate
    Rate {
        /// Use the opposite of the configured direction
        #[arg(short, long)]
        reverse: bool,
    },
    /// Convert an amount
    Convert {
        /// Amount in the source currency, e.g. 1000 or 25.50
        amount: String,
        /// Use the opposite of the configured direction
        #[arg(short, long)]
        reverse: bool,
    },
    /// Convert amounts interactively
    Interactive {
        /// Start with the opposite of the configured direction
        #[arg(short, long)]
        reverse: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => yenconv::cli::setup::setup(),
        Some(cmd) => yenconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
