//! Run configuration for the alignment engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Name of the project configuration file, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "popalign.toml";

/// Configuration for one alignment run.
///
/// All fields are optional; unset fields resolve to compiled defaults via
/// the `effective_*` accessors. `load` fills fields from the project file
/// and `POPALIGN_*` environment variables, with caller overrides on top.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AlignConfig {
    /// Upper bound on scaling iterations. Default: 50.
    pub max_iterations: Option<u32>,
    /// Convergence threshold on the divergence measure. Default: 1e-15.
    pub precision: Option<f64>,
    /// Emit a warning record and report field when the loop exhausts its
    /// iteration cap above the precision threshold. Default: true.
    pub warn_on_nonconvergence: Option<bool>,
    /// Escalate a convergence failure to a hard error. Default: false.
    pub require_convergence: Option<bool>,
}

/// Caller-supplied overrides, applied on top of env and file layers.
#[derive(Debug, Clone, Default)]
pub struct AlignOverrides {
    pub max_iterations: Option<u32>,
    pub precision: Option<f64>,
    pub warn_on_nonconvergence: Option<bool>,
    pub require_convergence: Option<bool>,
}

/// On-disk layout of `popalign.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    alignment: AlignConfig,
}

impl AlignConfig {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 50;
    pub const DEFAULT_PRECISION: f64 = 1e-15;

    /// Returns the effective iteration cap, defaulting to 50.
    pub fn effective_max_iterations(&self) -> u32 {
        self.max_iterations.unwrap_or(Self::DEFAULT_MAX_ITERATIONS)
    }

    /// Returns the effective convergence threshold, defaulting to 1e-15.
    pub fn effective_precision(&self) -> f64 {
        self.precision.unwrap_or(Self::DEFAULT_PRECISION)
    }

    /// Returns whether non-convergence produces a warning, defaulting to true.
    pub fn effective_warn_on_nonconvergence(&self) -> bool {
        self.warn_on_nonconvergence.unwrap_or(true)
    }

    /// Returns whether non-convergence is a hard error, defaulting to false.
    pub fn effective_require_convergence(&self) -> bool {
        self.require_convergence.unwrap_or(false)
    }

    /// Load configuration from `<project_root>/popalign.toml`, `POPALIGN_*`
    /// environment variables, and caller overrides.
    ///
    /// A missing file falls back to compiled defaults; any other read
    /// failure, a parse failure, or a malformed env value is an error.
    pub fn load(
        project_root: &Path,
        overrides: Option<&AlignOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(project_root)?;
        config.apply_env()?;
        if let Some(o) = overrides {
            config.apply_overrides(o);
        }
        Ok(config)
    }

    fn load_file(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(CONFIG_FILE_NAME);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no project config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Read { path, source: e }),
        };
        let file: ConfigFile = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "project config file loaded");
        Ok(file.alignment)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<u32>("POPALIGN_MAX_ITERATIONS")? {
            self.max_iterations = Some(v);
        }
        if let Some(v) = env_parse::<f64>("POPALIGN_PRECISION")? {
            self.precision = Some(v);
        }
        if let Some(v) = env_parse::<bool>("POPALIGN_WARN_ON_NONCONVERGENCE")? {
            self.warn_on_nonconvergence = Some(v);
        }
        if let Some(v) = env_parse::<bool>("POPALIGN_REQUIRE_CONVERGENCE")? {
            self.require_convergence = Some(v);
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &AlignOverrides) {
        if let Some(v) = overrides.max_iterations {
            self.max_iterations = Some(v);
        }
        if let Some(v) = overrides.precision {
            self.precision = Some(v);
        }
        if let Some(v) = overrides.warn_on_nonconvergence {
            self.warn_on_nonconvergence = Some(v);
        }
        if let Some(v) = overrides.require_convergence {
            self.require_convergence = Some(v);
        }
    }
}

/// Parse an env var, treating an unset variable as absent and a malformed
/// one as a hard error.
fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { key, value: raw }),
        Err(_) => Ok(None),
    }
}
