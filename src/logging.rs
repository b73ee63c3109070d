//! # Structured Logging Module
//!
//! Environment-aware `tracing` setup plus the structured logging macros used
//! across the crate.
//!
//! Initialization is idempotent and never fails: if the host already installed
//! a global subscriber, that subscriber is kept. Hosts with their own
//! subscriber can skip this module and still receive every event.
//!
//! Filter precedence: the configured level, then `LOG_LEVEL`, then `RUST_LOG`,
//! then a per-environment default (`REFRESOLVE_ENV`, then `APP_ENV`).

use crate::config::{LogFormat, LoggingConfig};
use crate::constants::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR, FALLBACK_ENVIRONMENT_VAR};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with environment defaults
///
/// ```rust
/// refresolve_core::logging::init_tracing();
/// // Later calls are no-ops.
/// refresolve_core::logging::init_tracing();
/// ```
pub fn init_tracing() {
    init_from_config(&LoggingConfig::default());
}

/// Initialize console logging with an explicit level and format
pub fn init_from_config(config: &LoggingConfig) {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = config
            .level
            .clone()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| get_log_level(&environment));

        // Determine if we're in a TTY for ANSI color support
        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let installed = match config.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .with_ansi(use_ansi)
                        .with_filter(EnvFilter::new(&log_level)),
                )
                .try_init()
                .is_ok(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .with_filter(EnvFilter::new(&log_level)),
                )
                .try_init()
                .is_ok(),
        };

        if installed {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                format = ?config.format,
                ansi_colors = use_ansi,
                "Logging initialized"
            );
        } else {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(ENVIRONMENT_VAR)
        .or_else(|_| std::env::var(FALLBACK_ENVIRONMENT_VAR))
        .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

/// Get log level based on environment variables or environment defaults
fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        return level.to_lowercase();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        return level.to_lowercase();
    }

    default_level(environment).to_string()
}

fn default_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log resolution events (per-reference outcomes)
#[macro_export]
macro_rules! log_resolution {
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
}

/// Log registry and configuration lifecycle events
#[macro_export]
macro_rules! log_registry {
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "REGISTRY_{}", $operation
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "REGISTRY_{}", $operation
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        assert_eq!(default_level("test"), "debug");
        assert_eq!(default_level("development"), "debug");
        assert_eq!(default_level("production"), "info");
        assert_eq!(default_level("staging"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_from_config(&LoggingConfig {
            level: Some("warn".to_string()),
            format: LogFormat::Json,
        });
        assert!(TRACING_INITIALIZED.get().is_some());
    }

    #[test]
    fn test_macros_expand() {
        crate::log_resolution!(debug, "Reference resolved");
        crate::log_resolution!(debug, "Reference resolved", resolver: "directory", attempts: 2);
        crate::log_registry!(info, "Resolvers loaded", count: 3usize);
    }
}
