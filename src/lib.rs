#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Refresolve Core
//!
//! Priority-ordered, session-aware resolution of named resource references
//! (a name plus an optional version constraint) to filesystem paths through
//! pluggable resolvers.
//!
//! ## Overview
//!
//! A host hands the [`ResolutionDispatcher`] a [`ResolverLoader`]. On the first
//! request the loader produces the resolver list exactly once, even under
//! concurrent first access. Each request then walks that list in priority
//! order and stops at the first resolver that resolves the reference.
//!
//! Resolvers may keep private state between lookups of the same build session.
//! The dispatcher stores it per `(session, resolver)` and hands it back on the
//! next attempt until the host clears the session.
//!
//! ## Outcomes and diagnostics
//!
//! - **Resolved**: returned to the caller; its warnings are reported
//! - **Failed**: held back and reported (warnings, then errors) only if no
//!   resolver succeeds
//! - **Declined**: silent
//! - **Faulted** (resolver returned `Err` or panicked): reported as fatal, then
//!   treated as a decline
//!
//! Faults in the dispatcher itself are returned as [`ResolverError`].
//!
//! ## Module Organization
//!
//! - [`models`] - references, results and session ids
//! - [`registry`] - resolver contract, loaders and the lazily built registry
//! - [`session`] - per-session resolver state
//! - [`resolution`] - requests, per-attempt context and the dispatcher
//! - [`resolvers`] - the built-in directory resolver
//! - [`diagnostics`] - diagnostics sinks and the resolver logger
//! - [`config`] - layered configuration
//! - [`logging`] - `tracing` initialization and logging macros
//! - [`error`] - error types
//!
//! ## Quick Start
//!
//! ```rust
//! use refresolve_core::diagnostics::CollectingSink;
//! use refresolve_core::error::ResolverFault;
//! use refresolve_core::models::{ResolverOutcome, ResourceReference, ResultFactory, SessionId};
//! use refresolve_core::registry::{ResourceResolver, StaticResolverLoader};
//! use refresolve_core::resolution::{ResolutionContext, ResolutionDispatcher, ResolutionRequest};
//! use std::sync::Arc;
//!
//! struct Pinned;
//!
//! impl ResourceResolver for Pinned {
//!     fn name(&self) -> &str {
//!         "pinned"
//!     }
//!
//!     fn resolve(
//!         &self,
//!         reference: &ResourceReference,
//!         _context: &mut ResolutionContext<'_>,
//!         factory: &ResultFactory,
//!     ) -> Result<ResolverOutcome, ResolverFault> {
//!         if reference.name() != "Contoso.Sdk" {
//!             return Ok(factory.decline());
//!         }
//!         Ok(factory.success("/opt/sdks/contoso/2.1.0", Some("2.1.0")))
//!     }
//! }
//!
//! let loader = StaticResolverLoader::new().with_resolver(Arc::new(Pinned));
//! let dispatcher = ResolutionDispatcher::new(Arc::new(loader));
//! let sink = CollectingSink::new();
//!
//! let request = ResolutionRequest::new(SessionId::new(7), ResourceReference::new("Contoso.Sdk"));
//! let path = dispatcher.resolve_to_path(&request, &sink).unwrap();
//! assert_eq!(path.unwrap().to_str(), Some("/opt/sdks/contoso/2.1.0"));
//! ```

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod resolution;
pub mod resolvers;
pub mod session;
pub mod utils;

pub use config::{ConfigManager, ConfigurationError, RefresolveConfig};
pub use diagnostics::{CollectingSink, DiagnosticsSink, ReferenceLocation, TracingSink};
pub use error::{ResolverError, ResolverFault, Result};
pub use models::{ResolutionResult, ResolverOutcome, ResourceReference, ResultFactory, SessionId};
pub use registry::{ResolverId, ResolverLoader, ResourceResolver, StaticResolverLoader};
pub use resolution::{ResolutionContext, ResolutionDispatcher, ResolutionRequest};
pub use resolvers::DirectoryResolver;
pub use session::{ResolverState, SessionStateStore};
