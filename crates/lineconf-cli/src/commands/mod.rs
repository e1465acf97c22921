//! Command implementations for lineconf-cli

pub mod check;
pub mod get;
pub mod list;
pub mod set;

pub use check::run_check;
pub use get::run_get;
pub use list::run_list;
pub use set::run_set;
