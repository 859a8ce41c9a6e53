// src/calendar/normalize.rs

use std::collections::{BTreeMap, BTreeSet};

use super::types::{NormalizedFields, RawFields, Rejection};
use crate::config::{CalendarConfig, UNKNOWN_IMPACT};
use crate::months::MonthToken;

/// Trim and collapse inner whitespace runs.
pub fn clean_str(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans raw cell text and applies the allow-lists. Holds only tables
/// taken from config; there is no filtering logic outside them.
#[derive(Debug, Clone)]
pub struct Normalizer {
    impact_colors: BTreeMap<String, String>,
    allowed_currencies: BTreeSet<String>,
    allowed_impacts: BTreeSet<String>,
    decorations: Vec<char>,
    detail_url: String,
}

impl Normalizer {
    pub fn new(cfg: &CalendarConfig) -> Self {
        Self {
            impact_colors: cfg.impact_colors.clone(),
            allowed_currencies: cfg.allowed_currencies.clone(),
            allowed_impacts: cfg.allowed_impacts.clone(),
            decorations: cfg.value_decorations.chars().collect(),
            detail_url: cfg.detail_url.clone(),
        }
    }

    /// Fill the detail link template for one event of `month`.
    pub fn detail_link(&self, month: MonthToken, id: &str) -> String {
        self.detail_url
            .replace("{month}", &month.name().to_ascii_lowercase())
            .replace("{mon}", &month.abbrev())
            .replace("{year}", &month.year().to_string())
            .replace("{id}", id)
    }

    /// Strip currency symbols, percent signs and thousands separators.
    /// Sign, decimal point, unit letters and qualifiers stay as text.
    pub fn strip_decoration(&self, raw: &str) -> String {
        let kept: String = raw.chars().filter(|c| !self.decorations.contains(c)).collect();
        clean_str(&kept)
    }

    /// Label for an impact icon class. The whole attribute is tried first,
    /// then each class token.
    pub fn impact_label(&self, token: Option<&str>) -> String {
        let Some(token) = token.map(str::trim) else {
            return UNKNOWN_IMPACT.to_string();
        };
        self.impact_colors
            .get(token)
            .or_else(|| {
                token
                    .split_whitespace()
                    .find_map(|t| self.impact_colors.get(t))
            })
            .cloned()
            .unwrap_or_else(|| UNKNOWN_IMPACT.to_string())
    }

    pub fn normalize(&self, raw: RawFields) -> Result<NormalizedFields, Rejection> {
        let currency = raw
            .currency
            .as_deref()
            .map(clean_str)
            .filter(|c| !c.is_empty())
            .ok_or(Rejection::MissingCurrency)?;
        if !self.allowed_currencies.contains(&currency) {
            return Err(Rejection::CurrencyNotAllowed(currency));
        }

        let impact = self.impact_label(raw.impact.as_deref());
        if !self.allowed_impacts.contains(&impact) {
            return Err(Rejection::ImpactNotAllowed(impact));
        }

        let value = |v: Option<String>| v.map(|s| self.strip_decoration(&s));
        Ok(NormalizedFields {
            time: raw.time.as_deref().map(clean_str),
            currency,
            impact,
            title: raw.title.as_deref().map(clean_str),
            actual: value(raw.actual),
            forecast: value(raw.forecast),
            previous: value(raw.previous),
            event_id: raw.event_id,
        })
    }
}
