//! Suffix-checked configuration file paths

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Extension every configuration file must carry
pub const CONF_EXTENSION: &str = "lconf";

/// A path known to name a `.lconf` file.
///
/// The check is purely lexical; the file itself may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfPath {
    inner: PathBuf,
}

impl ConfPath {
    /// Validate the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedExtension`] when the file name does not
    /// end in `.lconf`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == CONF_EXTENSION);
        if !has_extension {
            return Err(Error::UnsupportedExtension {
                path: path.to_path_buf(),
                expected: CONF_EXTENSION,
            });
        }
        Ok(Self {
            inner: path.to_path_buf(),
        })
    }

    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.inner.clone()
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.inner.is_file()
    }

    /// Sidecar file used for the advisory write lock: `<file>.lock`.
    pub fn lock_path(&self) -> PathBuf {
        self.with_suffix(".lock")
    }

    /// Temporary file written before the atomic rename.
    ///
    /// Lives in the same directory so the rename never crosses filesystems.
    pub fn temp_path(&self) -> PathBuf {
        let name = self
            .inner
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.inner
            .with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut os: OsString = self.inner.clone().into_os_string();
        os.push(suffix);
        PathBuf::from(os)
    }
}

impl AsRef<Path> for ConfPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl std::fmt::Display for ConfPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

impl TryFrom<&str> for ConfPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<PathBuf> for ConfPath {
    type Error = Error;

    fn try_from(p: PathBuf) -> Result<Self> {
        Self::new(p)
    }
}

impl TryFrom<&Path> for ConfPath {
    type Error = Error;

    fn try_from(p: &Path) -> Result<Self> {
        Self::new(p)
    }
}
