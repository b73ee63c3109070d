//! Shared constants for the resolution dispatcher.

/// Raw value of the session id that disables state caching.
pub const NO_SESSION_ID: i32 = -1;

/// Environment variable selecting the active configuration environment.
pub const ENVIRONMENT_VAR: &str = "REFRESOLVE_ENV";

/// Fallback environment variable, shared with other services.
pub const FALLBACK_ENVIRONMENT_VAR: &str = "APP_ENV";

/// Environment used when neither variable is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Prefix for configuration overrides from the process environment,
/// e.g. `REFRESOLVE__DISPATCHER__TRACE_ATTEMPTS=true`.
pub const CONFIG_ENV_PREFIX: &str = "REFRESOLVE";

/// Separator between nested keys in environment overrides.
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Base name of configuration files (`refresolve.toml`, `refresolve.test.toml`).
pub const CONFIG_FILE_STEM: &str = "refresolve";

/// Default configuration directory relative to the working directory.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Priority a resolver gets when neither it nor its registration names one.
/// Lower values are consulted first.
pub const DEFAULT_RESOLVER_PRIORITY: i32 = 5_000;

/// Name the built-in directory resolver registers under.
pub const DIRECTORY_RESOLVER_NAME: &str = "directory";

/// Default priority for the built-in directory resolver. User-supplied
/// resolvers usually register below this so they take precedence.
pub const DIRECTORY_RESOLVER_PRIORITY: i32 = 10_000;

/// Component names used in structured log fields
pub mod components {
    pub const DISPATCHER: &str = "resolution_dispatcher";
    pub const REGISTRY: &str = "resolver_registry";
    pub const SESSION_STORE: &str = "session_state_store";
    pub const LOADER: &str = "resolver_loader";
}
