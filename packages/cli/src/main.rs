mod commands;
mod config;
mod params;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check_model, resolve, CheckModelArgs, ResolveArgs};
use tracing_subscriber::EnvFilter;

/// Typepath CLI - infer the data types reached by search parameter expressions
#[derive(Parser, Debug)]
#[command(name = "typepath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every visited node and resolved path
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the types of search parameter expressions
    Resolve(ResolveArgs),

    /// Load and validate a model definition file
    CheckModel(CheckModelArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Resolve(args) => resolve(args, &cwd),
                Command::CheckModel(args) => check_model(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
