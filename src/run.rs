// src/run.rs

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::calendar::EventPipeline;
use crate::error::CalendarError;
use crate::fetch::PageSource;
use crate::months::MonthToken;
use crate::output::write_month_csv;

/// One month's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: MonthToken,
    pub records: usize,
    pub path: PathBuf,
}

/// Load, extract and write one month. A page that cannot be loaded, or
/// that has no calendar table, is a `PageLoadFailure`.
#[tracing::instrument(level = "info", skip_all, fields(month = %month))]
pub async fn run_month<S: PageSource>(
    source: &mut S,
    pipeline: &EventPipeline,
    month: MonthToken,
    out_dir: &Path,
) -> Result<MonthSummary> {
    let failed = |source: anyhow::Error| CalendarError::PageLoadFailure { month, source };

    let snapshot = source.navigate(month).await.map_err(failed)?;
    let records = pipeline.extract_page(&snapshot.html, month).map_err(failed)?;

    if records.is_empty() {
        warn!("no events extracted");
    }
    let path = write_month_csv(out_dir, month, &records)?;
    info!(records = records.len(), path = %path.display(), "wrote month");

    Ok(MonthSummary {
        month,
        records: records.len(),
        path,
    })
}

/// Process `months` in order with one reused page source. Stops at the
/// first month whose page fails to load; files already written stay.
pub async fn run_months<S: PageSource>(
    source: &mut S,
    pipeline: &EventPipeline,
    months: &[MonthToken],
    out_dir: &Path,
) -> Result<Vec<MonthSummary>> {
    let mut done = Vec::with_capacity(months.len());
    for &month in months {
        done.push(run_month(source, pipeline, month, out_dir).await?);
    }
    info!(
        months = done.len(),
        records = done.iter().map(|s| s.records).sum::<usize>(),
        "all done"
    );
    Ok(done)
}
