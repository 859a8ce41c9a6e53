// src/error.rs

use thiserror::Error;

use crate::months::MonthToken;

/// Failures that end a run. Row-level problems (missing cells, rejected
/// records) never reach this type; they are absorbed by the pipeline.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid month token {0:?}: use this/next/prev or e.g. 'jan 2007', 'january 2007'")]
    InvalidMonthToken(String),

    #[error("start month {start} is after end month {end}")]
    ReversedRange { start: MonthToken, end: MonthToken },

    #[error("failed to load calendar page for {month}")]
    PageLoadFailure {
        month: MonthToken,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid CSS selector {selector:?} for {field}")]
    InvalidSelector { field: &'static str, selector: String },
}
