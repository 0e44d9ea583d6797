use anyhow::Result;
use clap::Parser;

use reperto::{
    app::{load_config, load_config_from},
    cli::{handle_command, Cli, Commands},
    runtime::report_error,
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let command = cli.command.unwrap_or(Commands::Shell { profile: None });
    if let Err(e) = handle_command(command, config).await {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
