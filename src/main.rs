//! Fridgify - track what is in the fridge and when it expires.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fridgify::cli::{
    AppContext, CategoryArgs, CliResult, ConfigArgs, ExitCode, ExportArgs, ImportArgs, ItemArgs,
};
#[cfg(feature = "ratatui")]
use fridgify::cli::BrowseArgs;
#[cfg(feature = "web")]
use fridgify::cli::ServeArgs;
use fridgify::branding::{APP_BINARY_NAME, APP_DESCRIPTION};
use fridgify::logging;

#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about = APP_DESCRIPTION, long_about = None)]
struct Cli {
    /// Inventory data directory (overrides the config file)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage categories
    Category(CategoryArgs),
    /// Manage items
    Item(ItemArgs),
    /// Export the inventory to a JSON file
    Export(ExportArgs),
    /// Replace the inventory from a JSON file
    Import(ImportArgs),
    /// Show or change configuration
    Config(ConfigArgs),
    /// Browse the inventory in a terminal UI
    #[cfg(feature = "ratatui")]
    Browse(BrowseArgs),
    /// Serve the REST API
    #[cfg(feature = "web")]
    Serve(ServeArgs),
}

async fn run(cli: Cli) -> CliResult<()> {
    if let Command::Config(args) = &cli.command {
        return args.execute();
    }

    let ctx = AppContext::load(cli.data_dir)?;

    match &cli.command {
        Command::Category(args) => args.execute(&ctx),
        Command::Item(args) => args.execute(&ctx).await,
        Command::Export(args) => args.execute(&ctx),
        Command::Import(args) => args.execute(&ctx),
        Command::Config(args) => args.execute(),
        #[cfg(feature = "ratatui")]
        Command::Browse(args) => args.execute(&ctx),
        #[cfg(feature = "web")]
        Command::Serve(args) => args.execute(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too and go to stdout
            let code = if err.use_stderr() {
                ExitCode::Validation.code()
            } else {
                ExitCode::Success.code()
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    logging::init(cli.verbose);

    let code = match run(cli).await {
        Ok(()) => ExitCode::Success.code(),
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    };

    std::process::exit(code);
}
