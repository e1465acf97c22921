//! File storage for lineconf
//!
//! Provides suffix-checked paths, atomic locked writes, a process-wide
//! scoped lock, and [`ConfStore`], the entry point that loads, reads and
//! merge-writes configuration files.

pub mod config;
pub mod error;
pub mod io;
pub mod lock;
pub mod path;
pub mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use io::LineEnding;
pub use lock::StoreGuard;
pub use path::{CONF_EXTENSION, ConfPath};
pub use store::ConfStore;
