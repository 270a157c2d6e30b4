//! Configuration management
//!
//! Defaults for the command-line front end: fee acceleration, the transfer
//! call index and the log level. Values come from built-in defaults, an
//! optional TOML file and `CHAINX_*` environment variables.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
