// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

/// CSS selector for each field cell inside an event row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CellSelectors {
    pub date: String,
    pub time: String,
    pub currency: String,
    pub impact: String,
    pub title: String,
    pub actual: String,
    pub forecast: String,
    pub previous: String,
    pub detail: String,
}

impl Default for CellSelectors {
    fn default() -> Self {
        Self {
            date: "td.calendar__date".into(),
            time: "td.calendar__time".into(),
            currency: "td.calendar__currency".into(),
            impact: "td.calendar__impact".into(),
            title: "td.calendar__event".into(),
            actual: "td.calendar__actual".into(),
            forecast: "td.calendar__forecast".into(),
            previous: "td.calendar__previous".into(),
            detail: "td.calendar__detail".into(),
        }
    }
}

/// All the tables that drive classification, extraction and filtering.
/// Every field has a default describing the Forex Factory calendar, so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CalendarConfig {
    pub base_url: String,
    pub user_agent: String,

    pub table_selector: String,
    pub row_selector: String,

    /// Row class tokens marking a date separator.
    pub date_header_classes: Vec<String>,
    /// Row class tokens that are never events (ads, sub-headers, spacers).
    pub excluded_classes: Vec<String>,
    /// Row class token marking an event.
    pub event_row_class: String,

    pub cells: CellSelectors,
    pub impact_span_selector: String,

    /// Impact icon class token → severity label.
    pub impact_colors: BTreeMap<String, String>,
    pub allowed_currencies: BTreeSet<String>,
    pub allowed_impacts: BTreeSet<String>,
    /// Characters stripped from actual/forecast/previous.
    pub value_decorations: String,
    /// Event detail link. `{month}` is the lowercase month name, `{mon}`
    /// its 3-letter form, `{year}` the year and `{id}` the row's event id.
    pub detail_url: String,
}

pub const UNKNOWN_IMPACT: &str = "unknown";

impl Default for CalendarConfig {
    fn default() -> Self {
        let impact_colors = [
            ("icon--ff-impact-red", "High"),
            ("icon--ff-impact-ora", "Medium"),
            ("icon--ff-impact-yel", "Low"),
            ("icon--ff-impact-gra", "Holiday"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            base_url: "https://www.forexfactory.com/calendar".into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
            table_selector: "table.calendar__table".into(),
            row_selector: "tr".into(),
            date_header_classes: vec!["calendar__row--day-breaker".into()],
            excluded_classes: vec![
                "calendar__row--no-event".into(),
                "calendar__expand".into(),
                "subhead".into(),
            ],
            event_row_class: "calendar__row".into(),
            cells: CellSelectors::default(),
            impact_span_selector: "span".into(),
            impact_colors,
            allowed_currencies: ["AUD", "CAD", "CHF", "CNY", "EUR", "GBP", "JPY", "NZD", "USD"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_impacts: ["High", "Medium", "Low", "Holiday"]
                .into_iter()
                .map(String::from)
                .collect(),
            value_decorations: "$€£¥%,".into(),
            detail_url: "https://www.forexfactory.com/calendar?month={month}.{year}#detail={id}"
                .into(),
        }
    }
}

impl CalendarConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("parsing JSON config {}", path.display())),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing YAML config {}", path.display())),
            _ => anyhow::bail!(
                "unsupported config extension for {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }
    }
}
