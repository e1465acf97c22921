//! Locked load, typed read and merge-write entry points

use chrono::{NaiveDate, NaiveDateTime};
use lineconf_format::{Document, MergeReport, TargetType, TypedValue, parse};

use crate::io::{self, LineEnding};
use crate::{ConfPath, Error, Result, StoreConfig, lock};

/// Entry point for configuration file access.
///
/// Every public method holds the process-wide [`StoreGuard`](crate::StoreGuard)
/// for its whole duration and parses the file fresh; nothing is cached
/// between calls.
#[derive(Debug, Default, Clone)]
pub struct ConfStore {
    config: StoreConfig,
}

impl ConfStore {
    /// Create a new ConfStore with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ConfStore with custom settings.
    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Check whether the file exists.
    pub fn exists(&self, path: &ConfPath) -> bool {
        let _guard = lock::acquire();
        path.exists()
    }

    /// Load and parse a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the file is absent and
    /// [`Error::Parse`] when a line is malformed.
    pub fn load(&self, path: &ConfPath) -> Result<Document> {
        let _guard = lock::acquire();
        self.load_unlocked(path)
    }

    fn load_unlocked(&self, path: &ConfPath) -> Result<Document> {
        let lines = io::read_lines(path)?;
        let doc = parse(&lines).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path, entries = doc.len(), "loaded document");
        Ok(doc)
    }

    fn read<T>(
        &self,
        path: &ConfPath,
        read: impl FnOnce(&Document) -> lineconf_format::Result<T>,
    ) -> Result<T> {
        let doc = self.load(path)?;
        Ok(read(&doc)?)
    }

    pub fn get_str(&self, path: &ConfPath, key: &str) -> Result<String> {
        self.read(path, |doc| doc.get_str(key).map(str::to_string))
    }

    pub fn get_int(&self, path: &ConfPath, key: &str) -> Result<i64> {
        self.read(path, |doc| doc.get_int(key))
    }

    pub fn get_float(&self, path: &ConfPath, key: &str) -> Result<f64> {
        self.read(path, |doc| doc.get_float(key))
    }

    pub fn get_bool(&self, path: &ConfPath, key: &str) -> Result<bool> {
        self.read(path, |doc| doc.get_bool(key))
    }

    pub fn get_date(&self, path: &ConfPath, key: &str) -> Result<NaiveDate> {
        self.read(path, |doc| doc.get_date(key))
    }

    pub fn get_datetime(&self, path: &ConfPath, key: &str) -> Result<NaiveDateTime> {
        self.read(path, |doc| doc.get_datetime(key))
    }

    pub fn get_list(&self, path: &ConfPath, key: &str) -> Result<Vec<String>> {
        self.read(path, |doc| doc.get_list(key))
    }

    pub fn get_as(&self, path: &ConfPath, key: &str, target: TargetType) -> Result<TypedValue> {
        self.read(path, |doc| doc.get_as(key, target))
    }

    /// Merge-write `pending` into the file.
    ///
    /// Existing lines are kept verbatim; only keys not already present are
    /// appended, using the file's own line terminator. A missing file is
    /// created. Nothing is written when every pending key is already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] wrapping
    /// [`Unwritable`](lineconf_format::Error::Unwritable) when an entry would
    /// not read back unchanged; the file is left untouched.
    pub fn write(&self, path: &ConfPath, pending: &Document) -> Result<MergeReport> {
        let _guard = lock::acquire();
        self.write_unlocked(path, pending)
    }

    fn write_unlocked(&self, path: &ConfPath, pending: &Document) -> Result<MergeReport> {
        let (existing, ending) = match io::read_lines_with_ending(path) {
            Ok((lines, ending)) => (Some(lines), ending),
            Err(Error::NotFound { .. }) => (None, LineEnding::default()),
            Err(e) => return Err(e),
        };

        let (lines, report) =
            lineconf_format::merge(existing.as_deref().unwrap_or_default(), pending)?;

        if !report.skipped.is_empty() {
            tracing::info!(
                path = %path,
                skipped = ?report.skipped,
                "keys already present, values left unchanged"
            );
        }

        if report.is_unchanged() && existing.is_some() {
            tracing::debug!(path = %path, "nothing to append");
            return Ok(report);
        }

        io::write_lines(path, &lines, ending, self.config)?;
        tracing::debug!(path = %path, appended = ?report.appended, "merged document");
        Ok(report)
    }

    /// Read-modify-write under a single guard.
    ///
    /// `build` receives the current document (empty when the file does not
    /// exist yet) and returns the entries to merge-write.
    pub fn update<F>(&self, path: &ConfPath, build: F) -> Result<MergeReport>
    where
        F: FnOnce(&Document) -> Document,
    {
        let _guard = lock::acquire();
        let current = match self.load_unlocked(path) {
            Ok(doc) => doc,
            Err(Error::NotFound { .. }) => Document::new(),
            Err(e) => return Err(e),
        };
        let pending = build(&current);
        self.write_unlocked(path, &pending)
    }
}
