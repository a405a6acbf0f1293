//! Workload document parser.
//!
//! This module loads workload documents from YAML or JSON files and the
//! optional `.env` file next to them.

use crate::error::{ConfigError, PodSetQuotaError, Result};
use crate::model::Workload;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parser for loading workload documents.
#[derive(Debug, Default)]
pub struct WorkloadParser {
    /// Base path for resolving relative paths.
    base_path: Option<PathBuf>,
}

impl WorkloadParser {
    /// Creates a new workload parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Resolves a path against the base path, if one is set.
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Loads a workload document from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Workload> {
        let path = self.resolve(path);
        info!("Loading workload from: {}", path.display());

        if !path.exists() {
            return Err(PodSetQuotaError::Config(ConfigError::FileNotFound { path }));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            PodSetQuotaError::Config(ConfigError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            ))
        })?;

        self.parse_yaml(&content, Some(&path))
    }

    /// Parses a workload document from a YAML string.
    ///
    /// JSON documents are accepted as well, since JSON is valid YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<Workload> {
        debug!("Parsing workload document");

        let workload: Workload = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            PodSetQuotaError::Config(ConfigError::parse(format!("YAML parse error: {e}"), location))
        })?;

        debug!(
            "Parsed workload {} with {} pod set(s)",
            workload.display_name(),
            workload.pod_sets().len()
        );
        Ok(workload)
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self.resolve(".env");

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                PodSetQuotaError::Config(ConfigError::parse(
                    format!("Failed to load .env file: {e}"),
                    Some(env_path.display().to_string()),
                ))
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}
