// src/months.rs

use chrono::{Datelike, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{4})$").expect("month-year regex should compile"));

/// One calendar month to scrape. Field order gives chronological `Ord`.
/// Only built through `new`/`from_date`, so `month` is always 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthToken {
    year: i32,
    month: u32,
}

impl MonthToken {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { month: self.month + 1, ..self }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { month: self.month - 1, ..self }
        }
    }

    fn chrono_month(self) -> Month {
        const MONTHS: [Month; 12] = [
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ];
        MONTHS[(self.month - 1) as usize]
    }

    /// Full English name, e.g. "January".
    pub fn name(self) -> &'static str {
        self.chrono_month().name()
    }

    /// Lowercase three-letter name as used in calendar URLs, e.g. "jan".
    pub fn abbrev(self) -> String {
        self.name()[..3].to_ascii_lowercase()
    }

    /// `JANUARY_2007_news.csv`
    pub fn csv_file_name(self) -> String {
        format!("{}_{}_news.csv", self.name().to_uppercase(), self.year)
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthRequest {
    /// Individual tokens: `this`, `next`, `prev`/`previous` or "<month> <year>".
    List(Vec<String>),
    /// Inclusive range between two "<month> <year>" strings.
    Range { start: String, end: String },
}

/// Parse "jan 2007", "January 2007", "JAN 2007" and so on.
pub fn parse_month_year(s: &str) -> Result<MonthToken, CalendarError> {
    let invalid = || CalendarError::InvalidMonthToken(s.to_string());
    let caps = MONTH_YEAR_RE.captures(s.trim()).ok_or_else(invalid)?;

    // chrono accepts either the 3-letter or the full name, any case
    let month = Month::from_str(&caps[1]).map_err(|_| invalid())?;
    let year: i32 = caps[2].parse().map_err(|_| invalid())?;

    MonthToken::new(year, month.number_from_month()).ok_or_else(invalid)
}

/// Parse one `--months` token relative to `today`.
pub fn parse_month_token(token: &str, today: NaiveDate) -> Result<MonthToken, CalendarError> {
    let current = MonthToken::from_date(today);
    match token.trim().to_lowercase().as_str() {
        "this" => Ok(current),
        "next" => Ok(current.next()),
        "prev" | "previous" => Ok(current.prev()),
        _ => parse_month_year(token),
    }
}

/// Every month from `start` to `end` inclusive. Empty when `start > end`.
pub fn month_range(start: MonthToken, end: MonthToken) -> Vec<MonthToken> {
    let mut out = Vec::new();
    let mut cur = start;
    while cur <= end {
        out.push(cur);
        cur = cur.next();
    }
    out
}

/// Turn a request into a non-empty, ascending, duplicate-free month list.
pub fn resolve(request: &MonthRequest, today: NaiveDate) -> Result<Vec<MonthToken>, CalendarError> {
    match request {
        MonthRequest::List(tokens) if tokens.is_empty() => {
            Ok(vec![MonthToken::from_date(today)])
        }
        MonthRequest::List(tokens) => {
            let mut months = tokens
                .iter()
                .map(|t| parse_month_token(t, today))
                .collect::<Result<Vec<_>, _>>()?;
            months.sort_unstable();
            months.dedup();
            Ok(months)
        }
        MonthRequest::Range { start, end } => {
            let start = parse_month_year(start)?;
            let end = parse_month_year(end)?;
            if start > end {
                return Err(CalendarError::ReversedRange { start, end });
            }
            Ok(month_range(start, end))
        }
    }
}
