//! Configuration Loader
//!
//! Environment-aware loading: detects the active environment, layers the base
//! file, the environment override file and environment variables with the
//! `config` crate, then validates the merged result.

use super::error::{ConfigResult, ConfigurationError};
use super::RefresolveConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, CONFIG_FILE_STEM, DEFAULT_CONFIG_DIR,
    DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR, FALLBACK_ENVIRONMENT_VAR,
};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Loaded, validated configuration and where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: RefresolveConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Environment variables still apply.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_layers(config_dir, environment, None)
    }

    fn load_layers(
        config_dir: Option<PathBuf>,
        environment: &str,
        env_source: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let base_file = Self::config_file(&config_directory, None);
        let env_file = Self::config_file(&config_directory, Some(environment));
        for file in [&base_file, &env_file] {
            Self::check_readable(file)?;
        }

        let layered = Config::builder()
            .add_source(File::from(base_file.as_path()).format(FileFormat::Toml).required(false))
            .add_source(File::from(env_file.as_path()).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator(CONFIG_ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env_source),
            )
            .build()
            .map_err(|e| ConfigurationError::parse_error(config_directory.display().to_string(), e))?;

        let config: RefresolveConfig = layered
            .try_deserialize()
            .map_err(|e| ConfigurationError::parse_error(config_directory.display().to_string(), e))?;

        config.validate()?;

        info!(
            environment = %environment,
            config_directory = %config_directory.display(),
            directory_resolver_enabled = config.directory_resolver.enabled,
            disabled_resolvers = ?config.dispatcher.disabled_resolvers,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RefresolveConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect the active environment: `REFRESOLVE_ENV`, then `APP_ENV`, then
    /// `development`
    pub fn detect_environment() -> String {
        env::var(ENVIRONMENT_VAR)
            .or_else(|_| env::var(FALLBACK_ENVIRONMENT_VAR))
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    /// `<dir>/refresolve.toml`, or `<dir>/refresolve.<env>.toml` for an environment
    pub fn config_file(config_dir: &Path, environment: Option<&str>) -> PathBuf {
        match environment {
            Some(env) => config_dir.join(format!("{CONFIG_FILE_STEM}.{env}.toml")),
            None => config_dir.join(format!("{CONFIG_FILE_STEM}.toml")),
        }
    }

    // Missing files are fine; a file that exists but cannot be read is not.
    fn check_readable(path: &Path) -> ConfigResult<()> {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => std::fs::File::open(path)
                .map(|_| ())
                .map_err(|e| ConfigurationError::file_read_error(path.display().to_string(), e)),
            Ok(_) => Err(ConfigurationError::file_read_error(
                path.display().to_string(),
                "not a regular file",
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConfigurationError::file_read_error(
                path.display().to_string(),
                e,
            )),
        }
    }
}
