use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    config::{self, ConfigArgs},
    simulate::{self, SimulateArgs},
    sweep::{self, SweepArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "odmr-sim", about = "NV-centre ODMR spectrum simulator")]
struct Cli {
    /// Log pipeline stages at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize one spectrum and print it.
    Simulate(SimulateArgs),
    /// Synthesize a grid of bias fields and angles in parallel.
    Sweep(SweepArgs),
    /// Print the default simulation config as YAML.
    Config(ConfigArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "odmr_spec=debug,odmr_sim=debug"
    } else {
        "odmr_spec=info,odmr_sim=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Simulate(args) => simulate::run(&args),
        Command::Sweep(args) => sweep::run(&args),
        Command::Config(args) => config::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
