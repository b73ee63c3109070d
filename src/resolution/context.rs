//! Per-request and per-attempt inputs to resolution.

use crate::diagnostics::{ReferenceLocation, ResolverLogger};
use crate::models::{ResourceReference, SessionId};
use crate::session::ResolverState;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a caller supplies to resolve one reference
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionRequest {
    pub session_id: SessionId,
    pub reference: ResourceReference,
    pub location: ReferenceLocation,
    pub solution_path: Option<PathBuf>,
    pub project_path: Option<PathBuf>,
    /// Whether resolvers may prompt the user (e.g. for feed credentials)
    pub interactive: bool,
    /// Version of the host build engine, for resolvers that gate on it
    pub host_version: Option<String>,
}

impl ResolutionRequest {
    pub fn new(session_id: SessionId, reference: ResourceReference) -> Self {
        Self {
            session_id,
            reference,
            location: ReferenceLocation::unknown(),
            solution_path: None,
            project_path: None,
            interactive: false,
            host_version: None,
        }
    }

    pub fn with_location(mut self, location: ReferenceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_solution_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solution_path = Some(path.into());
        self
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_host_version(mut self, version: impl Into<String>) -> Self {
        self.host_version = Some(version.into());
        self
    }
}

/// What one resolver sees during one attempt.
///
/// `state` starts as whatever this resolver stored earlier in the same session.
/// The resolver may replace or clear it; the dispatcher persists the value left
/// here once the attempt returns.
#[derive(Debug)]
pub struct ResolutionContext<'a> {
    request: &'a ResolutionRequest,
    logger: ResolverLogger<'a>,
    state: Option<ResolverState>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        request: &'a ResolutionRequest,
        logger: ResolverLogger<'a>,
        state: Option<ResolverState>,
    ) -> Self {
        Self {
            request,
            logger,
            state,
        }
    }

    pub fn reference(&self) -> &ResourceReference {
        &self.request.reference
    }

    pub fn session_id(&self) -> SessionId {
        self.request.session_id
    }

    pub fn location(&self) -> &ReferenceLocation {
        &self.request.location
    }

    pub fn solution_path(&self) -> Option<&Path> {
        self.request.solution_path.as_deref()
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.request.project_path.as_deref()
    }

    pub fn is_interactive(&self) -> bool {
        self.request.interactive
    }

    pub fn host_version(&self) -> Option<&str> {
        self.request.host_version.as_deref()
    }

    pub fn logger(&self) -> &ResolverLogger<'a> {
        &self.logger
    }

    pub fn state(&self) -> Option<&ResolverState> {
        self.state.as_ref()
    }

    pub fn set_state(&mut self, state: ResolverState) {
        self.state = Some(state);
    }

    pub fn take_state(&mut self) -> Option<ResolverState> {
        self.state.take()
    }

    /// The typed state for this attempt, installing `init()` when nothing of
    /// type `T` is present yet
    pub fn state_or_insert_with<T, F>(&mut self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.state.as_ref().and_then(|s| s.downcast_arc::<T>()) {
            return existing;
        }

        let value = Arc::new(init());
        self.state = Some(ResolverState::from_arc(Arc::clone(&value)));
        value
    }

    pub(crate) fn into_state(self) -> Option<ResolverState> {
        self.state
    }
}
