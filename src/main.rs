use clap::Parser;
use ndu::cli::{Cli, Commands};
use ndu::config::RunConfig;
use ndu::{logger, workflow};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        logger::error(&e.to_string());
        process::exit(1);
    }
}

fn run(cli: Cli) -> ndu::Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let config = RunConfig::resolve(&args.inputs)?;
            if config.debug {
                logger::enable_debug();
            }
            workflow::execute_run(&config, args.dry_run)?;
        }
        Commands::Validate(args) => {
            let config = RunConfig::resolve_preflight(&args)?;
            if config.debug {
                logger::enable_debug();
            }
            workflow::execute_validate(&config)?;
        }
    }
    Ok(())
}
