//! Shared test utilities for the lineconf workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`conf`]: [`conf::TestConf`] builder for temporary configuration files

pub mod conf;

pub use conf::TestConf;
