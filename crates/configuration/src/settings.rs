use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The root configuration structure for the dashboard application.
///
/// Every section has defaults, so `salesboard.toml` only needs to override
/// what differs from the stock setup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub dashboard: Dashboard,
}

/// Where the web server binds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Where the sales data lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    /// Path to the sales CSV file.
    pub sales_file: PathBuf,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            sales_file: PathBuf::from("data/sales_data.csv"),
        }
    }
}

/// Presentation settings consumed by the dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    /// Chart palette, keyed by role (primary, secondary, ...). BTreeMap so
    /// the serialized order is stable.
    pub colors: BTreeMap<String, String>,
    /// Display labels for the ranking metrics.
    pub metric_labels: BTreeMap<String, String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        let colors = [
            ("primary", "#1f77b4"),
            ("secondary", "#ff7f0e"),
            ("success", "#2ca02c"),
            ("warning", "#d62728"),
            ("info", "#9467bd"),
        ];
        let metric_labels = [
            ("revenue", "Revenue"),
            ("profit", "Profit"),
            ("margin", "Margin"),
            ("quantity", "Quantity"),
            ("orders", "Orders"),
        ];
        Self {
            title: "Sales Analytics Dashboard".to_string(),
            colors: colors
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            metric_labels: metric_labels
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
