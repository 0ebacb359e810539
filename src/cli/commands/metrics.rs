use anyhow::Result;

use crate::cli::output::TableFormatter;
use crate::domain::models::Config;

/// Handle the `metrics` command.
pub async fn execute(config: &Config, json: bool) -> Result<()> {
    let service = super::build_service(config)?;
    let handle = service.inventory_metrics().await;
    let state = super::settle_with_spinner(handle, "Fetching inventory metrics").await;
    let metrics = super::settled_data(state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    if metrics.is_empty() {
        println!("No metrics.");
        return Ok(());
    }

    println!("{}", TableFormatter::new().format_metrics(&metrics));

    let low = metrics.iter().filter(|m| m.is_low_stock()).count();
    if low > 0 {
        println!(
            "\n{} item{} below minimum stock",
            low,
            if low == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
