use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("report directory missing or not writable: {0}")]
    ReportDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the report directory exists and accepts new files.
pub fn ensure_report_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::ReportDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::ReportDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::ReportDir(e.to_string()))?;
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::ReportDir(e.to_string()))?;
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file and rename, so an
/// interrupted write never leaves a half-finished report behind.
pub fn write_report_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
    ensure_report_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Same topic, same filename: replace the previous copy.
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target)
}
