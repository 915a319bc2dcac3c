//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds everything a command handler needs: the
//! discovered project directory, its configuration, and the global flags.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cotiza_config::config::{CotizaConfig, load_config, load_env_config};
use cotiza_config::project_dir::find_cotiza_dir;
use cotiza_core::catalog::Catalog;
use cotiza_formula::loader::load_catalog;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Discovered `.cotiza/` directory, if any.
    pub project_dir: Option<PathBuf>,

    /// Layered project configuration.
    pub config: CotizaConfig,

    /// `--catalog` flag value.
    pub catalog_override: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// `--json` wins over the configured `json` key; it can only turn JSON
    /// output on.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to get current directory")?;
        let project_dir = find_cotiza_dir(&cwd);

        let config = match &project_dir {
            Some(dir) => load_config(dir)
                .with_context(|| format!("failed to load config from {}", dir.display()))?,
            None => load_env_config().context("failed to load config from environment")?,
        };

        Ok(Self {
            json: global.json || config.json,
            project_dir,
            config,
            catalog_override: global.catalog.as_ref().map(PathBuf::from),
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Path of the catalog to use.
    ///
    /// Priority: `--catalog` flag > configured catalog of the project.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(ref p) = self.catalog_override {
            return Ok(p.clone());
        }
        match &self.project_dir {
            Some(dir) => Ok(self.config.catalog_path(dir)),
            None => bail!("no catalog given (use --catalog or run 'cotiza init')"),
        }
    }

    /// Load the catalog named by [`Self::catalog_path`].
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path()?;
        debug!(path = %path.display(), "loading catalog");
        load_catalog(&path).with_context(|| format!("failed to load catalog {}", path.display()))
    }
}
