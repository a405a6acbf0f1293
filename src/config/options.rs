//! Comparison options.
//!
//! Options come from command-line flags and can be switched on from the
//! environment (including a `.env` file loaded beforehand).

use crate::error::{ConfigError, Result};
use tracing::debug;

/// Environment variable that forces tolerations to be ignored.
pub const IGNORE_TOLERATIONS_ENV: &str = "PODSET_QUOTA_IGNORE_TOLERATIONS";

/// Options controlling a quota comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonOptions {
    /// Exclude tolerations from the comparison.
    pub ignore_tolerations: bool,
}

impl ComparisonOptions {
    /// Creates options from the command-line flag.
    #[must_use]
    pub const fn new(ignore_tolerations: bool) -> Self {
        Self { ignore_tolerations }
    }

    /// Applies the environment override on top of the current options.
    ///
    /// The environment can only enable ignoring tolerations, never disable a
    /// flag given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set to an unrecognized value.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_value(std::env::var(IGNORE_TOLERATIONS_ENV).ok().as_deref())
    }

    fn with_env_value(mut self, value: Option<&str>) -> Result<Self> {
        if let Some(raw) = value {
            debug!("Reading {IGNORE_TOLERATIONS_ENV} from environment");
            self.ignore_tolerations |= parse_bool(raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                name: String::from(IGNORE_TOLERATIONS_ENV),
                value: raw.to_string(),
            })?;
        }
        Ok(self)
    }
}

/// Parses the boolean spellings accepted in the environment.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
