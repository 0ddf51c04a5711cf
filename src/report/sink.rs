use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::error::ReportError;
use crate::report::junit;
use crate::report::model::Document;

/// Target of report flushes.
///
/// Each write receives the complete document and replaces whatever was written before.
pub trait Sink: Send {
    fn write(&mut self, document: &Document) -> Result<(), ReportError>;

    /// Human readable location, used in log lines.
    fn describe(&self) -> String;
}

/// Writes JUnit XML snapshots to a single file.
///
/// The snapshot is staged next to the target and renamed over it, so a reader polling
/// the path sees either the previous snapshot or the new one.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => {
                let mut staged = OsString::from(".");
                staged.push(name);
                staged.push(".tmp");
                self.path.with_file_name(staged)
            }
            None => self.path.with_extension("tmp"),
        }
    }

    fn ensure_parent_dir(&self) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
            }
        }
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&mut self, document: &Document) -> Result<(), ReportError> {
        let snapshot = junit::render(document)?;
        self.ensure_parent_dir()?;

        let staged = self.staging_path();
        fs::write(&staged, snapshot).map_err(|e| ReportError::io(&staged, e))?;
        if let Err(e) = fs::rename(&staged, &self.path) {
            let _ = fs::remove_file(&staged);
            return Err(ReportError::io(&self.path, e));
        }
        trace!("Report snapshot written to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{FileSink, Sink};
    use crate::report::model::Document;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("run").join("report.xml");
        let mut sink = FileSink::new(&path);

        sink.write(&Document::new("nightly")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("testsuites"));
        assert!(content.contains("nightly"));
    }

    #[test]
    fn test_write_overwrites_previous_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.xml");
        fs::write(&path, "stale content that is longer than the new snapshot ".repeat(100))
            .unwrap();
        let mut sink = FileSink::new(&path);

        sink.write(&Document::new("fresh")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("fresh"));
        assert!(!temp.path().join(".report.xml.tmp").exists());
    }

    #[test]
    fn test_write_into_directory_fails() {
        let temp = TempDir::new().unwrap();
        let mut sink = FileSink::new(temp.path());

        assert!(sink.write(&Document::default()).is_err());
    }
}
