//! Command-line driver for modz: configuration, file discovery, parallel
//! linting and fixing, and reporting.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod sources;
pub mod tracing_config;
