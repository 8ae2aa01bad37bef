mod commands;
mod output;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sunslice", about = "Time-distance slices through solar image sequences")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the frames and path described by a slice config
    Info(commands::info::InfoArgs),
    /// Compute a time-distance slice
    Run(commands::run::RunArgs),
    /// Print or save a default slice config
    Config(commands::config::ConfigArgs),
    /// Rasterize a line between two pixels
    Line(commands::line::LineArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Line(args) => commands::line::run(args),
    }
}
