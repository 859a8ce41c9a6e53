// src/fetch/mod.rs

pub mod http;
pub mod snapshot;

use anyhow::Result;

pub use http::HttpPageSource;
pub use snapshot::SnapshotDirSource;

use crate::months::MonthToken;

/// The HTML of one fully loaded calendar month.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub month: MonthToken,
    pub html: String,
}

/// Something that can bring up the calendar view for a month and hand back
/// its rendered rows. One source is reused for every month of a run.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn navigate(&mut self, month: MonthToken) -> Result<PageSnapshot>;
}
