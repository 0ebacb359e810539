//! Table output formatting for CLI commands
//!
//! Formatted table output for trend points and inventory metrics using
//! comfy-table. Supports color-coded cells and automatic column sizing.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{InventoryMetric, TrendPoint};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    /// Create a formatter that detects terminal color support.
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Create a formatter with color use pinned (for tests).
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format a stock trend as a date/stock table, in delivered order.
    pub fn format_trend(&self, points: &[TrendPoint]) -> String {
        let mut table = Self::create_base_table();

        table.set_header(vec![
            Cell::new("Date").add_attribute(Attribute::Bold),
            Cell::new("Stock").add_attribute(Attribute::Bold),
        ]);

        for point in points {
            table.add_row(vec![
                Cell::new(point.date.format("%Y-%m-%d").to_string()),
                Cell::new(point.stock.to_string()),
            ]);
        }

        table.to_string()
    }

    /// Format inventory metrics; stock counts below the configured
    /// minimum are shown in red when colors are available.
    pub fn format_metrics(&self, metrics: &[InventoryMetric]) -> String {
        let mut table = Self::create_base_table();

        table.set_header(vec![
            Cell::new("SKU").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Stock").add_attribute(Attribute::Bold),
            Cell::new("Min").add_attribute(Attribute::Bold),
            Cell::new("Max").add_attribute(Attribute::Bold),
            Cell::new("Change").add_attribute(Attribute::Bold),
            Cell::new("Change %").add_attribute(Attribute::Bold),
        ]);

        for metric in metrics {
            let stock_cell = if metric.is_low_stock() && self.use_colors {
                Cell::new(metric.current_stock.to_string()).fg(Color::Red)
            } else {
                Cell::new(metric.current_stock.to_string())
            };

            table.add_row(vec![
                Cell::new(&metric.sku),
                Cell::new(&metric.name),
                stock_cell,
                Cell::new(metric.min_stock.to_string()),
                Cell::new(metric.max_stock.to_string()),
                Cell::new(format_signed(metric.change_amount)),
                Cell::new(format!("{:+.1}%", metric.change_percent)),
            ]);
        }

        table.to_string()
    }

    fn create_base_table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_signed(amount: i64) -> String {
    if amount > 0 {
        format!("+{amount}")
    } else {
        amount.to_string()
    }
}

/// Whether the terminal supports colored output.
fn supports_color() -> bool {
    env::var("NO_COLOR").is_err() && console::Term::stdout().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn trend_table_lists_points_in_order() {
        let points = vec![
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                stock: 95,
            },
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                stock: 120,
            },
        ];

        let rendered = TableFormatter::with_colors(false).format_trend(&points);
        let first = rendered.find("2024-01-02").unwrap();
        let second = rendered.find("2024-01-01").unwrap();
        // Delivered order is preserved, even when not chronological.
        assert!(first < second);
    }

    #[test]
    fn metrics_table_formats_signed_change() {
        let metrics = vec![InventoryMetric {
            id: 1,
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            current_stock: 5,
            min_stock: 10,
            max_stock: 50,
            change_amount: 3,
            change_percent: 12.5,
        }];

        let rendered = TableFormatter::with_colors(false).format_metrics(&metrics);
        assert!(rendered.contains("+3"));
        assert!(rendered.contains("+12.5%"));
    }

    #[test]
    fn format_signed_keeps_negative_sign() {
        assert_eq!(format_signed(-4), "-4");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(4), "+4");
    }
}
