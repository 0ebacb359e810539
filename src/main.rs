//! Stocklens CLI entry point.

use clap::Parser;

use stocklens::cli::{commands, Cli, Commands};
use stocklens::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration decides the log format, so it loads first.
    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => stocklens::cli::handle_error(&err, cli.json),
    };

    logging::init(&config.logging);

    let result = match cli.command {
        Commands::Trend => commands::trend::execute(&config, cli.json).await,
        Commands::Metrics => commands::metrics::execute(&config, cli.json).await,
        Commands::Product(args) => commands::product::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        stocklens::cli::handle_error(&err, cli.json);
    }
}
