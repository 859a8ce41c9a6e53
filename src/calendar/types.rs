// src/calendar/types.rs

use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a single `<tr>` of the calendar table turned out to be.
#[derive(Debug, Clone)]
pub enum ClassifiedRow<'a> {
    /// Date separator, carrying its display text (e.g. "Mon Jan 1").
    DateHeader(String),
    /// An event; cells are read later by the extractor.
    EventRow(ElementRef<'a>),
    Ignored,
}

/// Cell text as found on the page. `None` means the cell was missing,
/// `Some("")` means it was present but blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub date: Option<String>,
    pub time: Option<String>,
    pub currency: Option<String>,
    /// Class attribute of the impact icon, not yet a label.
    pub impact: Option<String>,
    pub title: Option<String>,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
    /// `data-event-id` of a row that has a detail cell.
    pub event_id: Option<String>,
}

/// Fields that passed the allow-lists. The date cell is not here: the
/// assembler reads it before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    pub time: Option<String>,
    pub currency: String,
    pub impact: String,
    pub title: Option<String>,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
    pub event_id: Option<String>,
}

/// Why an event row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no currency")]
    MissingCurrency,
    #[error("currency {0:?} not allowed")]
    CurrencyNotAllowed(String),
    #[error("impact {0:?} not allowed")]
    ImpactNotAllowed(String),
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Impact")]
    pub impact: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Actual")]
    pub actual: String,
    #[serde(rename = "Forecast")]
    pub forecast: String,
    #[serde(rename = "Previous")]
    pub previous: String,
    /// Link to the event's detail panel; empty when the row has no id.
    #[serde(rename = "Detail")]
    pub detail: String,
}

pub const CSV_HEADERS: [&str; 9] = [
    "Date", "Time", "Currency", "Impact", "Event", "Actual", "Forecast", "Previous", "Detail",
];
