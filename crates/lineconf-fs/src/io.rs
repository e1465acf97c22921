//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{ConfPath, Error, Result, StoreConfig};

/// Line terminator of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the terminator from the first line break in `content`.
    ///
    /// Content without any line break counts as [`LineEnding::Lf`].
    pub fn detect(content: &str) -> Self {
        match content.find('\n') {
            Some(idx) if content[..idx].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Read a configuration file as lines, along with its line terminator.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the file does not exist.
pub fn read_lines_with_ending(path: &ConfPath) -> Result<(Vec<String>, LineEnding)> {
    match fs::read_to_string(path) {
        Ok(content) => Ok((
            content.lines().map(str::to_string).collect(),
            LineEnding::detect(&content),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(Error::io(path.as_path(), e)),
    }
}

/// Read a configuration file as lines.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the file does not exist.
pub fn read_lines(path: &ConfPath) -> Result<Vec<String>> {
    read_lines_with_ending(path).map(|(lines, _)| lines)
}

/// Write lines atomically, each followed by `ending`.
pub fn write_lines<S: AsRef<str>>(
    path: &ConfPath,
    lines: &[S],
    ending: LineEnding,
    config: StoreConfig,
) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push_str(ending.as_str());
    }
    write_atomic(path, content.as_bytes(), config)
}

/// Try to take the exclusive lock, retrying with backoff until `timeout`.
fn lock_with_timeout(file: &File, path: &ConfPath, timeout: Duration) -> Result<()> {
    let policy = ExponentialBackoff {
        current_interval: Duration::from_millis(5),
        initial_interval: Duration::from_millis(5),
        max_interval: Duration::from_millis(100),
        max_elapsed_time: Some(timeout),
        ..ExponentialBackoff::default()
    };

    backoff::retry(policy, || {
        file.try_lock_exclusive()
            .map_err(backoff::Error::transient)
    })
    .map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })
}

/// Write content atomically to a file with locking.
///
/// Holds an advisory lock on the `<file>.lock` sidecar for the whole write
/// and uses write-to-temp-then-rename, so readers see either the old or the
/// new content, never a partial write.
pub fn write_atomic(path: &ConfPath, content: &[u8], config: StoreConfig) -> Result<()> {
    let native_path = path.as_path();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock_path = path.lock_path();
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    lock_with_timeout(&lock_file, path, config.lock_timeout)?;
    tracing::debug!(path = %path, "acquired file lock");

    let result = write_temp_and_rename(path, content, config);

    FileExt::unlock(&lock_file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    result
}

fn write_temp_and_rename(path: &ConfPath, content: &[u8], config: StoreConfig) -> Result<()> {
    let temp_path = path.temp_path();

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| {
            if config.enable_fsync {
                temp_file.sync_all()
            } else {
                Ok(())
            }
        });
    drop(temp_file);

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(path.as_path(), e)
    })
}
