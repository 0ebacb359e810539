//! Command-line interface
//!
//! clap-based commands over the analytics service: aggregate trend,
//! per-item metrics, and per-product trend, rendered as tables or raw
//! JSON.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Inspect inventory analytics from the terminal
#[derive(Debug, Parser)]
#[command(name = "stocklens", version, about)]
pub struct Cli {
    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of stocklens.yaml + env
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the aggregate inventory stock trend
    Trend,
    /// Show per-item inventory health metrics
    Metrics,
    /// Show the stock trend for one product
    Product(commands::product::ProductArgs),
}

/// Print a command error and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
