use anyhow::Result;

use crate::cli::output::TableFormatter;
use crate::domain::models::Config;

/// Handle the `trend` command.
pub async fn execute(config: &Config, json: bool) -> Result<()> {
    let service = super::build_service(config)?;
    let handle = service.inventory_trend().await;
    let state = super::settle_with_spinner(handle, "Fetching inventory trend").await;
    let points = super::settled_data(state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else if points.is_empty() {
        println!("No trend data.");
    } else {
        println!("{}", TableFormatter::new().format_trend(&points));
        println!(
            "\n{} point{}",
            points.len(),
            if points.len() == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
