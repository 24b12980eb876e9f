//! AstGraph CLI - PHP syntax tree diagrams

use anyhow::Result;
use astgraph_cli::{commands, logging, Cli, Commands};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Commands::Generate {
            file,
            options,
            destination,
        } => {
            commands::generate::run(&file, &options, &destination)?;
        }
        Commands::Batch {
            inputs,
            options,
            out_dir,
        } => {
            commands::batch::run(&inputs, &options, &out_dir)?;
        }
        Commands::Init { path } => {
            commands::init::run(path.as_deref())?;
        }
    }

    Ok(())
}
