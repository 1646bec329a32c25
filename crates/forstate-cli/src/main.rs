//! # forstate CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use forstate_cli::config::CliConfig;

/// forstate: state-conditioned method dispatch demo.
///
/// Runs methods on a demo turnstile whose behavior depends on its current
/// state, and describes the dispatch tables behind them.
#[derive(Parser, Debug)]
#[command(name = "forstate", version, about)]
struct Cli {
    /// YAML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log declaration-time events at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Invoke methods on a demo turnstile.
    Run(forstate_cli::run::RunArgs),
    /// Describe the demo class.
    Describe(forstate_cli::describe::DescribeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => {
            forstate_cli::run::execute_with(&args, &config, |step| println!("{step}"))?;
        }
        Commands::Describe(args) => {
            let out = forstate_cli::describe::render(&args, &config)?;
            println!("{}", out.trim_end());
        }
    }

    Ok(())
}
