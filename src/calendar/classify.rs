// src/calendar/classify.rs

use scraper::ElementRef;

use super::extract::element_text;
use super::types::ClassifiedRow;
use crate::config::CalendarConfig;

/// Decides a row's role from its class tokens. Unknown rows are ignored,
/// never an error.
#[derive(Debug, Clone)]
pub struct Classifier {
    date_header_classes: Vec<String>,
    excluded_classes: Vec<String>,
    event_row_class: String,
}

impl Classifier {
    pub fn new(cfg: &CalendarConfig) -> Self {
        Self {
            date_header_classes: cfg.date_header_classes.clone(),
            excluded_classes: cfg.excluded_classes.clone(),
            event_row_class: cfg.event_row_class.clone(),
        }
    }

    pub fn classify<'a>(&self, row: ElementRef<'a>) -> ClassifiedRow<'a> {
        let marker: Vec<&str> = row
            .value()
            .attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        let has = |class: &str| marker.iter().any(|m| *m == class);

        if self.date_header_classes.iter().any(|c| has(c.as_str())) {
            ClassifiedRow::DateHeader(element_text(row))
        } else if self.excluded_classes.iter().any(|c| has(c.as_str())) {
            ClassifiedRow::Ignored
        } else if has(self.event_row_class.as_str()) {
            ClassifiedRow::EventRow(row)
        } else {
            ClassifiedRow::Ignored
        }
    }
}
