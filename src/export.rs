use std::{fs, path::Path};

use error_stack::{Result, ResultExt};
use serde::Serialize;

use crate::error::ApplicationError;

/// Writes `value` as pretty-printed JSON to `path`, replacing any existing file.
///
/// # Errors
/// - If `value` cannot be serialized
/// - If the file cannot be written
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ApplicationError> {
    let contents =
        serde_json::to_string_pretty(value).change_context(ApplicationError::ExportError {})?;

    fs::write(path, contents)
        .change_context(ApplicationError::ExportError {})
        .attach_printable_lazy(|| format!("when writing {}", path.display()))?;

    tracing::debug!(path = %path.display(), "exported JSON");
    Ok(())
}

/// Writes a header row followed by `rows` as CSV to `path`.
///
/// # Errors
/// If the file cannot be created or written.
pub fn write_csv<I>(path: &Path, header: &[&str], rows: I) -> Result<(), ApplicationError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let attach_path = || format!("when writing {}", path.display());
    let mut writer = csv::Writer::from_path(path)
        .change_context(ApplicationError::ExportError {})
        .attach_printable_lazy(attach_path)?;

    writer
        .write_record(header)
        .change_context(ApplicationError::ExportError {})?;
    let mut count = 0_usize;
    for row in rows {
        writer
            .write_record(&row)
            .change_context(ApplicationError::ExportError {})?;
        count += 1;
    }
    writer
        .flush()
        .change_context(ApplicationError::ExportError {})
        .attach_printable_lazy(attach_path)?;

    tracing::debug!(path = %path.display(), rows = count, "exported CSV");
    Ok(())
}
