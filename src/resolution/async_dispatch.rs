//! Async entry point for hosts running on a Tokio runtime.
//!
//! Resolvers are synchronous and may block on I/O, so each request runs on the
//! blocking pool rather than on a runtime worker.

use super::context::ResolutionRequest;
use super::dispatcher::ResolutionDispatcher;
use crate::diagnostics::DiagnosticsSink;
use crate::error::{ResolverError, Result};
use crate::models::ResolutionResult;
use std::sync::Arc;
use tracing::error;

impl ResolutionDispatcher {
    /// Resolve on Tokio's blocking pool.
    ///
    /// Same semantics as [`resolve`](Self::resolve). A failure to run the
    /// blocking task is returned as [`ResolverError::Internal`].
    pub async fn resolve_async(
        self: &Arc<Self>,
        request: ResolutionRequest,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Result<Option<ResolutionResult>> {
        let dispatcher = Arc::clone(self);
        let reference = request.reference.to_string();

        tokio::task::spawn_blocking(move || dispatcher.resolve(&request, sink.as_ref()))
            .await
            .map_err(|join_error| {
                error!(
                    reference = %reference,
                    error = %join_error,
                    "Resolution task did not complete"
                );
                ResolverError::Internal(format!(
                    "resolution task for '{reference}' did not complete: {join_error}"
                ))
            })?
    }
}
