//! Analytics wire records.
//!
//! Read-only projections of server state. Each value is replaced
//! wholesale on refetch, never mutated locally. Field names on the wire
//! are camelCase; trend sequences keep server-delivered order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One time-stamped stock-level sample.
///
/// Used for both the aggregate inventory trend and per-product trends.
/// The product scope is carried by the query key, not by the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar date of the sample (`YYYY-MM-DD` on the wire).
    pub date: NaiveDate,

    /// Stock count on that date.
    pub stock: i64,
}

/// One tracked item's stock-health snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMetric {
    /// Server-assigned item identifier.
    pub id: i64,

    /// Display name of the item.
    pub name: String,

    /// Stock-keeping unit code.
    pub sku: String,

    /// Current stock level.
    pub current_stock: i64,

    /// Configured minimum stock level.
    pub min_stock: i64,

    /// Configured maximum stock level.
    pub max_stock: i64,

    /// Signed stock change over the server's reporting window.
    pub change_amount: i64,

    /// Percentage change over the same window.
    ///
    /// The server emits either a JSON number or a numeric string for
    /// this field; both forms decode to `f64`. Formatting is left to
    /// render time.
    #[serde(with = "change_percent")]
    pub change_percent: f64,
}

impl InventoryMetric {
    /// Whether the item is below its configured minimum stock level.
    pub const fn is_low_stock(&self) -> bool {
        self.current_stock < self.min_stock
    }
}

mod change_percent {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Number(f64),
            Text(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Number(n) => Ok(n),
            Helper::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                serde::de::Error::custom(format!("invalid changePercent value: {s:?}"))
            }),
        }
    }
}
