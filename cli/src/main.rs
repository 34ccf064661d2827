mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{inspect, stitch};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Stitch(args) => stitch::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
