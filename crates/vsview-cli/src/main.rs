mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vsview-tool", about = "Headless VapourSynth image pipeline tool")]
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
    /// Decode an image through the filter chain and show its properties
    Info(commands::info::InfoArgs),
    /// Print the composed script without running it
    Script(commands::script::ScriptArgs),
    /// Decode an image through the filter chain and save the result
    Export(commands::export::ExportArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
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
        Commands::Script(args) => commands::script::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
