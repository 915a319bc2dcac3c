//! Configuration management for cotiza projects.
//!
//! This crate discovers the `.cotiza/` project directory and loads the
//! layered [`config::CotizaConfig`] stored in it.

pub mod config;
pub mod project_dir;

pub use config::{ConfigError, CotizaConfig, load_config, save_config};
pub use project_dir::{ensure_cotiza_dir, find_cotiza_dir};
