// src/calendar/mod.rs

pub mod assemble;
pub mod classify;
pub mod extract;
pub mod normalize;
pub mod types;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

pub use assemble::{assemble, Assembler};
pub use classify::Classifier;
pub use extract::Extractor;
pub use normalize::Normalizer;
pub use types::{ClassifiedRow, EventRecord, NormalizedFields, RawFields, Rejection, CSV_HEADERS};

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::months::MonthToken;

/// Nearest enclosing `<table>` of a row is the calendar table itself, not
/// one nested inside an expanded row.
fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .find(|n| n.value().as_element().map_or(false, |e| e.name() == "table"))
        .map(|n| n.id())
        == Some(table.id())
}

/// Classifier, extractor and normalizer built once from config and
/// reused for every month.
#[derive(Debug, Clone)]
pub struct EventPipeline {
    table: Selector,
    rows: Selector,
    classifier: Classifier,
    extractor: Extractor,
    normalizer: Normalizer,
}

impl EventPipeline {
    pub fn new(cfg: &CalendarConfig) -> Result<Self, CalendarError> {
        Ok(Self {
            table: extract::compile("table", &cfg.table_selector)?,
            rows: extract::compile("row", &cfg.row_selector)?,
            classifier: Classifier::new(cfg),
            extractor: Extractor::new(cfg)?,
            normalizer: Normalizer::new(cfg),
        })
    }

    /// Turn one loaded calendar page of `month` into its event records.
    /// Fails only when the page has no calendar table at all.
    pub fn extract_page(&self, html: &str, month: MonthToken) -> Result<Vec<EventRecord>> {
        let doc = Html::parse_document(html);
        let table = doc
            .select(&self.table)
            .next()
            .ok_or_else(|| anyhow!("page has no calendar table"))?;

        let rows = table
            .select(&self.rows)
            .filter(|r| belongs_to(*r, table))
            .map(|r| self.classifier.classify(r));
        Ok(assemble(rows, month, &self.extractor, &self.normalizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn jan() -> MonthToken {
        MonthToken::new(2007, 1).unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn row(id: &str, time: &str, currency: &str, color: &str, title: &str, a: &str, f: &str, p: &str) -> String {
        format!(
            r##"<tr class="calendar__row" data-event-id="{id}">
                <td class="calendar__cell calendar__date"></td>
                <td class="calendar__cell calendar__time">{time}</td>
                <td class="calendar__cell calendar__currency">{currency}</td>
                <td class="calendar__cell calendar__impact"><span class="icon icon--ff-impact-{color}"></span></td>
                <td class="calendar__cell calendar__event"><span class="calendar__event-title">{title}</span></td>
                <td class="calendar__cell calendar__detail"><a href="#">detail</a></td>
                <td class="calendar__cell calendar__actual">{a}</td>
                <td class="calendar__cell calendar__forecast">{f}</td>
                <td class="calendar__cell calendar__previous">{p}</td>
                <td class="calendar__cell calendar__graph"></td>
            </tr>"##
        )
    }

    fn sample_page() -> String {
        format!(
            r#"<html><body>
            <table class="calendar__table">
              <thead><tr class="calendar__header"><th>Date</th><th>Time</th></tr></thead>
              <tbody>
                <tr class="calendar__row calendar__row--day-breaker"><td colspan="10"><span>Mon</span> <span>Jan 1</span></td></tr>
                {}
                {}
                <tr class="subhead"><td>sponsored</td></tr>
                <tr class="calendar__row">
                    <td class="calendar__cell calendar__currency">XXX</td>
                    <td class="calendar__cell calendar__impact"><span class="icon icon--ff-impact-red"></span></td>
                    <td class="calendar__cell calendar__event">Unsupported</td>
                </tr>
              </tbody>
            </table></body></html>"#,
            row("130452", "8:30am", "USD", "red", "Nonfarm Payrolls", "150K", "180K", "140K"),
            row("", "", "USD", "ora", "Trade Balance", "", "-50B", "-48B"),
        )
    }

    #[test]
    fn test_end_to_end_sample_page() {
        let mut cfg = CalendarConfig::default();
        cfg.allowed_currencies = BTreeSet::from(["USD".to_string()]);
        cfg.allowed_impacts = BTreeSet::from(["High".to_string(), "Medium".to_string()]);
        let pipeline = EventPipeline::new(&cfg).unwrap();

        let records = pipeline.extract_page(&sample_page(), jan()).unwrap();

        assert_eq!(
            records,
            vec![
                EventRecord {
                    date: "Mon Jan 1".into(),
                    time: "8:30am".into(),
                    currency: "USD".into(),
                    impact: "High".into(),
                    event: "Nonfarm Payrolls".into(),
                    actual: "150K".into(),
                    forecast: "180K".into(),
                    previous: "140K".into(),
                    detail: "https://www.forexfactory.com/calendar?month=january.2007#detail=130452"
                        .into(),
                },
                EventRecord {
                    date: "Mon Jan 1".into(),
                    time: "8:30am".into(),
                    currency: "USD".into(),
                    impact: "Medium".into(),
                    event: "Trade Balance".into(),
                    actual: "".into(),
                    forecast: "-50B".into(),
                    previous: "-48B".into(),
                    detail: "".into(),
                },
            ]
        );
    }

    #[test]
    fn test_page_without_table_is_an_error() {
        let pipeline = EventPipeline::new(&CalendarConfig::default()).unwrap();
        assert!(pipeline
            .extract_page("<html><body><p>Just a moment...</p></body></html>", jan())
            .is_err());
    }

    #[test]
    fn test_empty_table_yields_no_records() {
        let pipeline = EventPipeline::new(&CalendarConfig::default()).unwrap();
        let records = pipeline
            .extract_page(
                r#"<table class="calendar__table"><tr class="calendar__row--no-event"><td>Sat</td></tr></table>"#,
                jan(),
            )
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_rows_of_nested_tables_are_skipped() {
        let page = r#"<table class="calendar__table"><tbody>
            <tr class="calendar__row calendar__row--day-breaker"><td>Mon Jan 1</td></tr>
            <tr class="calendar__row calendar__expand"><td>
                <table class="calendar__specs"><tbody>
                    <tr class="calendar__row">
                        <td class="calendar__currency">USD</td>
                        <td class="calendar__impact"><span class="icon icon--ff-impact-red"></span></td>
                        <td class="calendar__event">Nested</td>
                    </tr>
                </tbody></table>
            </td></tr>
            <tr class="calendar__row">
                <td class="calendar__time">8:30am</td>
                <td class="calendar__currency">USD</td>
                <td class="calendar__impact"><span class="icon icon--ff-impact-red"></span></td>
                <td class="calendar__event">Top level</td>
            </tr>
        </tbody></table>"#;
        let pipeline = EventPipeline::new(&CalendarConfig::default()).unwrap();
        let records = pipeline.extract_page(page, jan()).unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.event.as_str()).collect();
        assert_eq!(titles, vec!["Top level"]);
    }
}
