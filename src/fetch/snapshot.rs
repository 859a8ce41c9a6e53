// src/fetch/snapshot.rs

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::{PageSnapshot, PageSource};
use crate::months::MonthToken;

/// Serves pages that were already rendered and saved by a browser, one
/// `<mon>.<year>.html` file per month (e.g. `jan.2007.html`).
pub struct SnapshotDirSource {
    dir: PathBuf,
}

impl SnapshotDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, month: MonthToken) -> PathBuf {
        self.dir
            .join(format!("{}.{}.html", month.abbrev(), month.year()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PageSource for SnapshotDirSource {
    async fn navigate(&mut self, month: MonthToken) -> Result<PageSnapshot> {
        let path = self.path_for(month);
        info!(path = %path.display(), "reading saved page");
        let html = fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        Ok(PageSnapshot { month, html })
    }
}
