// src/output.rs

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::calendar::{EventRecord, CSV_HEADERS};
use crate::months::MonthToken;

/// Write `records` to `<out_dir>/<MONTH>_<YEAR>_news.csv`, replacing any
/// previous file for that month. The header is written even when there are
/// no records.
///
/// - writes to a hidden tmp file first, then renames over the target
/// - returns the final path
pub fn write_month_csv<P: AsRef<Path>>(
    out_dir: P,
    month: MonthToken,
    records: &[EventRecord],
) -> Result<PathBuf> {
    let dir = out_dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))?;

    let file_name = month.csv_file_name();
    let path = dir.join(&file_name);
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        writer.write_record(CSV_HEADERS)?;
        for record in records {
            writer
                .serialize(record)
                .with_context(|| format!("writing row to {:?}", tmp_path))?;
        }
        writer.flush()?;
    }

    fs::rename(&tmp_path, &path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;

    Ok(path)
}
