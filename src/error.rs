//! Error types for the resolution dispatcher.
//!
//! Only faults in the dispatcher's own machinery surface as [`ResolverError`].
//! Declines, resolver-reported failures and resolver faults are absorbed by the
//! dispatch loop and reported through the diagnostics sink instead.

use crate::config::ConfigurationError;
use thiserror::Error;

/// Error type a resolver or loader may return for an unexpected fault.
///
/// Any error type converts into it with `?`, so plugin code can stay terse.
pub type ResolverFault = anyhow::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    /// The resolver loader failed while building the registry
    #[error("Failed to load resolvers: {reason}")]
    RegistryLoad { reason: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The dispatch loop itself failed for a reference
    #[error("Resolution of '{reference}' aborted: {reason}")]
    Dispatch { reference: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolverError {
    pub fn registry_load<E: std::fmt::Display>(error: E) -> Self {
        Self::RegistryLoad {
            reason: error.to_string(),
        }
    }

    pub fn dispatch<R: Into<String>, E: std::fmt::Display>(reference: R, error: E) -> Self {
        Self::Dispatch {
            reference: reference.into(),
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
