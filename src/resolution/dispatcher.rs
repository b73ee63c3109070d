//! # Resolution Dispatcher
//!
//! Resolves a [`ResourceReference`](crate::models::ResourceReference) by
//! consulting the registered resolvers in priority order.
//!
//! ## Dispatch rules
//!
//! - The registry is built on the first request (or by [`ResolutionDispatcher::initialize`])
//!   and never rebuilt.
//! - Each resolver gets its own session state for the request's session and
//!   whatever it leaves in the context is written back after the attempt,
//!   whatever the outcome.
//! - The first resolver to resolve wins. Its warnings are reported and no
//!   later resolver runs.
//! - Declines are silent. A resolver that errors or panics is reported as a
//!   fatal diagnostic and treated as a decline.
//! - Failures are held back. If nothing resolves, every failure is reported in
//!   attempt order: its warnings, then its errors.
//! - Faults in the dispatcher itself (registry load, a panicking sink) abort
//!   the request and come back as [`ResolverError`].
//!
//! ## Usage
//!
//! ```rust
//! use refresolve_core::diagnostics::CollectingSink;
//! use refresolve_core::models::{ResourceReference, SessionId};
//! use refresolve_core::registry::StaticResolverLoader;
//! use refresolve_core::resolution::{ResolutionDispatcher, ResolutionRequest};
//! use std::sync::Arc;
//!
//! let dispatcher = ResolutionDispatcher::new(Arc::new(StaticResolverLoader::new()));
//! let sink = CollectingSink::new();
//! let request = ResolutionRequest::new(SessionId::new(1), ResourceReference::new("Contoso.Sdk"));
//!
//! // No resolvers registered: nothing resolves and nothing is reported.
//! assert!(dispatcher.resolve(&request, &sink).unwrap().is_none());
//! assert!(sink.errors().is_empty());
//!
//! dispatcher.clear_session_state(SessionId::new(1));
//! ```

use super::context::{ResolutionContext, ResolutionRequest};
use crate::config::{DispatcherConfig, RefresolveConfig};
use crate::constants::components;
use crate::diagnostics::{DiagnosticsSink, MessageImportance, ReferenceLocation, ResolverLogger};
use crate::error::{ResolverError, Result};
use crate::models::{ResolutionResult, ResolverOutcome, ResultFactory, SessionId};
use crate::registry::{
    LazyResolverRegistry, RegisteredResolver, ResolverId, ResolverLoader, StaticResolverLoader,
};
use crate::session::{ResolverState, SessionStateStore, SessionStoreStats};
use crate::utils::panic::panic_message;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Resolves references through a lazily built, priority-ordered resolver chain
pub struct ResolutionDispatcher {
    registry: LazyResolverRegistry,
    session_state: SessionStateStore,
    config: DispatcherConfig,
}

impl ResolutionDispatcher {
    /// Create a dispatcher over `loader` with default settings
    pub fn new(loader: Arc<dyn ResolverLoader>) -> Self {
        Self::with_config(loader, DispatcherConfig::default())
    }

    pub fn with_config(loader: Arc<dyn ResolverLoader>, config: DispatcherConfig) -> Self {
        Self {
            registry: LazyResolverRegistry::new(loader),
            session_state: SessionStateStore::new(),
            config,
        }
    }

    /// Dispatcher backed by a [`StaticResolverLoader`] seeded from configuration
    pub fn from_config(config: &RefresolveConfig) -> Self {
        Self::with_config(
            Arc::new(StaticResolverLoader::from_config(config)),
            config.dispatcher.clone(),
        )
    }

    /// Build the registry now rather than on the first request. Returns the
    /// number of resolvers.
    pub fn initialize(&self, sink: &dyn DiagnosticsSink) -> Result<usize> {
        let registry = self
            .registry
            .get_or_load(sink, &ReferenceLocation::unknown())?;
        Ok(registry.len())
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_initialized()
    }

    /// Resolver names in the order they are consulted, building the registry
    /// if needed
    pub fn resolver_names(&self, sink: &dyn DiagnosticsSink) -> Result<Vec<String>> {
        let registry = self
            .registry
            .get_or_load(sink, &ReferenceLocation::unknown())?;
        Ok(registry.names())
    }

    /// Resolve `request.reference`.
    ///
    /// Returns the first successful result, or `None` once every resolver has
    /// declined, failed or faulted. Diagnostics go to `sink`.
    #[instrument(
        skip_all,
        fields(reference = %request.reference, session_id = %request.session_id)
    )]
    pub fn resolve(
        &self,
        request: &ResolutionRequest,
        sink: &dyn DiagnosticsSink,
    ) -> Result<Option<ResolutionResult>> {
        match catch_unwind(AssertUnwindSafe(|| self.dispatch(request, sink))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(
                    component = components::DISPATCHER,
                    reference = %request.reference,
                    location = %request.location,
                    panic_msg = %message,
                    "Resolution aborted by a dispatcher fault"
                );
                Err(ResolverError::dispatch(request.reference.to_string(), message))
            }
        }
    }

    /// Like [`resolve`](Self::resolve), keeping only the resolved path
    pub fn resolve_to_path(
        &self,
        request: &ResolutionRequest,
        sink: &dyn DiagnosticsSink,
    ) -> Result<Option<PathBuf>> {
        Ok(self
            .resolve(request, sink)?
            .and_then(ResolutionResult::into_path))
    }

    /// Forget all resolver state cached for `session`
    pub fn clear_session_state(&self, session: SessionId) {
        self.session_state.clear(session);
    }

    pub fn session_stats(&self) -> SessionStoreStats {
        self.session_state.stats()
    }

    pub fn session_state(&self) -> &SessionStateStore {
        &self.session_state
    }

    fn dispatch(
        &self,
        request: &ResolutionRequest,
        sink: &dyn DiagnosticsSink,
    ) -> Result<Option<ResolutionResult>> {
        let registry = self.registry.get_or_load(sink, &request.location)?;
        let mut failures: Vec<ResolutionResult> = Vec::new();

        for resolver in registry.iter() {
            match self.attempt(resolver, request, sink) {
                ResolverOutcome::Declined => continue,
                ResolverOutcome::Failed(result) => failures.push(result),
                ResolverOutcome::Resolved(result) => {
                    for warning in result.warnings() {
                        sink.warning(&request.location, warning);
                    }

                    crate::log_resolution!(
                        debug,
                        "Reference resolved",
                        reference: request.reference.to_string(),
                        resolver: resolver.name(),
                        path: result.path().map(|p| p.display().to_string()),
                        failed_before: failures.len()
                    );
                    return Ok(Some(result));
                }
            }
        }

        for result in &failures {
            for warning in result.warnings() {
                sink.warning(&request.location, warning);
            }
            for error in result.errors() {
                sink.error(&request.location, error);
            }
        }

        crate::log_resolution!(
            debug,
            "Reference unresolved",
            reference: request.reference.to_string(),
            resolvers_consulted: registry.len(),
            failures: failures.len()
        );
        Ok(None)
    }

    /// Run one resolver, persist its state, and fold faults into a decline
    fn attempt(
        &self,
        resolver: &RegisteredResolver,
        request: &ResolutionRequest,
        sink: &dyn DiagnosticsSink,
    ) -> ResolverOutcome {
        let state = self.session_state.get(request.session_id, resolver.id());
        let logger = ResolverLogger::new(sink, &request.location, resolver.name());
        let mut context = ResolutionContext::new(request, logger, state);
        let factory = ResultFactory::new(&request.reference);

        let started = Instant::now();
        let invoked = catch_unwind(AssertUnwindSafe(|| {
            resolver
                .resolver()
                .resolve(&request.reference, &mut context, &factory)
        }));
        let elapsed_ms = started.elapsed().as_millis() as u64;

        self.persist_state(request.session_id, resolver.id(), context.into_state());

        let outcome = match invoked {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(fault)) => {
                self.report_fault(resolver, request, sink, &format!("{fault:#}"));
                ResolverOutcome::Declined
            }
            Err(payload) => {
                let message = format!("panicked: {}", panic_message(payload.as_ref()));
                self.report_fault(resolver, request, sink, &message);
                ResolverOutcome::Declined
            }
        };

        debug!(
            component = components::DISPATCHER,
            resolver = resolver.name(),
            reference = %request.reference,
            outcome = outcome_label(&outcome),
            elapsed_ms = elapsed_ms,
            "Resolver attempt finished"
        );

        if self.config.trace_attempts {
            sink.message(
                MessageImportance::Low,
                &format!(
                    "Resolver \"{}\" {} \"{}\" in {} ms",
                    resolver.name(),
                    outcome_label(&outcome),
                    request.reference,
                    elapsed_ms
                ),
            );
        }

        outcome
    }

    fn persist_state(&self, session: SessionId, resolver: ResolverId, state: Option<ResolverState>) {
        if !session.is_cacheable() {
            return;
        }

        match state {
            Some(state) => self.session_state.set(session, resolver, state),
            None => {
                self.session_state.remove(session, resolver);
            }
        }
    }

    fn report_fault(
        &self,
        resolver: &RegisteredResolver,
        request: &ResolutionRequest,
        sink: &dyn DiagnosticsSink,
        detail: &str,
    ) {
        error!(
            component = components::DISPATCHER,
            resolver = resolver.name(),
            reference = %request.reference,
            location = %request.location,
            error = %detail,
            "Resolver faulted"
        );

        sink.fatal(
            &request.location,
            &format!(
                "Resolver \"{}\" faulted while resolving \"{}\": {}",
                resolver.name(),
                request.reference,
                detail
            ),
        );
    }
}

fn outcome_label(outcome: &ResolverOutcome) -> &'static str {
    match outcome {
        ResolverOutcome::Declined => "declined",
        ResolverOutcome::Failed(_) => "failed",
        ResolverOutcome::Resolved(_) => "resolved",
    }
}

impl std::fmt::Debug for ResolutionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionDispatcher")
            .field("registry", &self.registry)
            .field("session_state", &self.session_state.stats())
            .field("config", &self.config)
            .finish()
    }
}
