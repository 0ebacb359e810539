use anyhow::Result;
use clap::Args;

use crate::cli::output::TableFormatter;
use crate::domain::models::Config;
use crate::services::QueryOptions;

/// Arguments for the `product` command.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product identifier, embedded in the request path
    pub product_id: String,
}

/// Handle the `product` command.
pub async fn execute(args: ProductArgs, config: &Config, json: bool) -> Result<()> {
    let service = super::build_service(config)?;
    let handle = service
        .product_trend(&args.product_id, QueryOptions::default())
        .await;

    // An empty identifier disables the query rather than erroring.
    if handle.is_idle() {
        println!("Nothing to fetch: product id is empty.");
        return Ok(());
    }

    let message = format!("Fetching trend for {}", args.product_id);
    let state = super::settle_with_spinner(handle, &message).await;
    let points = super::settled_data(state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else if points.is_empty() {
        println!("No trend data for {}.", args.product_id);
    } else {
        println!("{}", TableFormatter::new().format_trend(&points));
        println!(
            "\n{} point{} for {}",
            points.len(),
            if points.len() == 1 { "" } else { "s" },
            args.product_id
        );
    }

    Ok(())
}
