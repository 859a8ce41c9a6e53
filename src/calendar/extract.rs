// src/calendar/extract.rs

use scraper::{ElementRef, Selector};

use super::types::RawFields;
use crate::config::CalendarConfig;
use crate::error::CalendarError;

/// Text content of an element with whitespace runs collapsed to one space.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn compile(field: &'static str, selector: &str) -> Result<Selector, CalendarError> {
    Selector::parse(selector).map_err(|_| CalendarError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// Reads the field cells of an event row. A missing cell becomes `None`.
#[derive(Debug, Clone)]
pub struct Extractor {
    date: Selector,
    time: Selector,
    currency: Selector,
    impact: Selector,
    impact_span: Selector,
    title: Selector,
    actual: Selector,
    forecast: Selector,
    previous: Selector,
    detail: Selector,
}

impl Extractor {
    pub fn new(cfg: &CalendarConfig) -> Result<Self, CalendarError> {
        let c = &cfg.cells;
        Ok(Self {
            date: compile("date", &c.date)?,
            time: compile("time", &c.time)?,
            currency: compile("currency", &c.currency)?,
            impact: compile("impact", &c.impact)?,
            impact_span: compile("impact_span", &cfg.impact_span_selector)?,
            title: compile("title", &c.title)?,
            actual: compile("actual", &c.actual)?,
            forecast: compile("forecast", &c.forecast)?,
            previous: compile("previous", &c.previous)?,
            detail: compile("detail", &c.detail)?,
        })
    }

    pub fn extract(&self, row: ElementRef<'_>) -> RawFields {
        let cell = |sel: &Selector| row.select(sel).next().map(element_text);

        // the last icon span in the cell holds the colour class
        let impact = row.select(&self.impact).next().and_then(|cell| {
            cell.select(&self.impact_span)
                .filter_map(|span| span.value().attr("class"))
                .last()
                .map(str::to_string)
        });

        // only rows with a detail cell link anywhere
        let event_id = row
            .select(&self.detail)
            .next()
            .and(row.value().attr("data-event-id"))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        RawFields {
            date: cell(&self.date),
            time: cell(&self.time),
            currency: cell(&self.currency),
            impact,
            title: cell(&self.title),
            actual: cell(&self.actual),
            forecast: cell(&self.forecast),
            previous: cell(&self.previous),
            event_id,
        }
    }
}
