use std::path::{Path, PathBuf};

use shared_types::{export_filename, to_csv, AppError, ExportRecord};

/// Render `rows` as CSV and save them as `<label>.csv` inside `dir`.
///
/// Returns the written path. An empty row set is refused with the
/// "No data to export" error and nothing is written.
pub fn write_csv<R: ExportRecord>(dir: &Path, label: &str, rows: &[R]) -> Result<PathBuf, AppError> {
    let csv = to_csv(rows)?;
    let path = dir.join(export_filename(label));
    std::fs::write(&path, csv)
        .map_err(|e| AppError::internal(format!("Failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "csv export written");
    Ok(path)
}
