//! Application configuration module.
//!
//! Locates and reads the TOML config file and layers `TMDB_*` environment
//! variables on top of it.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
