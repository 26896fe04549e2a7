use std::fs;
use std::path::Path;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::record::ExchangeRateRecord;

/// Writes `record` to `path` as indented JSON, replacing any existing file.
///
/// Missing parent directories are created first. The write is not atomic.
pub fn write_record(path: &Path, record: &ExchangeRateRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Saved exchange rate record");
    Ok(())
}
