//! CSV export of aggregated views.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Write `rows` with a header row, creating parent directories as needed.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent:?}"))?;
    }
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("create {path:?}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote csv export");
    Ok(())
}
