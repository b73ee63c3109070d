//! # Configuration
//!
//! Typed settings for the dispatcher, the built-in directory resolver and
//! logging. Every section has defaults, so an absent file or an empty section
//! is valid.
//!
//! ## Sources
//!
//! [`ConfigManager`] layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `<dir>/refresolve.toml`
//! 3. `<dir>/refresolve.<environment>.toml`
//! 4. Environment variables, `REFRESOLVE__<SECTION>__<KEY>`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use refresolve_core::config::ConfigManager;
//! use refresolve_core::resolution::ResolutionDispatcher;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let dispatcher = ResolutionDispatcher::from_config(manager.config());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::DIRECTORY_RESOLVER_PRIORITY;
use crate::utils::serde::{deserialize_path_list, deserialize_string_list};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefresolveConfig {
    pub dispatcher: DispatcherConfig,
    pub directory_resolver: DirectoryResolverConfig,
    pub logging: LoggingConfig,
}

/// Dispatcher behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Resolver names to leave out of the registry (ASCII case-insensitive).
    /// Accepts a list or a comma-separated string.
    #[serde(deserialize_with = "deserialize_string_list")]
    pub disabled_resolvers: Vec<String>,

    /// Report every resolver attempt as a low-importance diagnostic message
    pub trace_attempts: bool,
}

/// Settings for [`DirectoryResolver`](crate::resolvers::DirectoryResolver)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryResolverConfig {
    pub enabled: bool,

    /// Roots searched in order. Accepts a list or a platform path-list string.
    #[serde(deserialize_with = "deserialize_path_list")]
    pub roots: Vec<PathBuf>,

    pub priority: i32,
}

impl Default for DirectoryResolverConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            roots: Vec::new(),
            priority: DIRECTORY_RESOLVER_PRIORITY,
        }
    }
}

/// Subscriber settings applied by [`init_from_config`](crate::logging::init_from_config)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive. Falls back to the environment default when unset.
    pub level: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl RefresolveConfig {
    /// Check cross-field constraints the types cannot express
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self
            .dispatcher
            .disabled_resolvers
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ConfigurationError::invalid_value(
                "dispatcher.disabled_resolvers",
                format!("{:?}", self.dispatcher.disabled_resolvers),
                "resolver names must not be empty",
            ));
        }

        let directory = &self.directory_resolver;
        if directory.enabled && directory.roots.is_empty() {
            return Err(ConfigurationError::validation_error(
                "directory_resolver is enabled but no roots are configured",
            ));
        }

        if let Some(root) = directory
            .roots
            .iter()
            .find(|root| root.as_os_str().is_empty())
        {
            return Err(ConfigurationError::invalid_value(
                "directory_resolver.roots",
                root.display().to_string(),
                "roots must not be empty paths",
            ));
        }

        Ok(())
    }
}
