//! # Resolver Plugin Contract
//!
//! A resolver turns a [`ResourceReference`] into a path, or says why it could
//! not. Resolvers are consulted in registry order; each gets its own session
//! state through the context and may replace it.

use crate::constants::DEFAULT_RESOLVER_PRIORITY;
use crate::error::ResolverFault;
use crate::models::{ResourceReference, ResolverOutcome, ResultFactory};
use crate::resolution::ResolutionContext;
use std::fmt;
use std::sync::Arc;

/// A pluggable resolution strategy.
///
/// Return `Ok(ResolverOutcome::Declined)` when the reference is not yours,
/// `Ok(ResolverOutcome::Failed(..))` to explain why a reference you own could
/// not be resolved, and `Ok(ResolverOutcome::Resolved(..))` on success. An
/// `Err` (or a panic) is treated as a fault: it is reported as a fatal
/// diagnostic and the next resolver is tried.
pub trait ResourceResolver: Send + Sync {
    /// Stable display name, used in diagnostics and for disabling by config
    fn name(&self) -> &str;

    /// Priority used when a loader registers the resolver without an explicit
    /// one. Lower values run first.
    fn priority(&self) -> i32 {
        DEFAULT_RESOLVER_PRIORITY
    }

    fn resolve(
        &self,
        reference: &ResourceReference,
        context: &mut ResolutionContext<'_>,
        factory: &ResultFactory,
    ) -> Result<ResolverOutcome, ResolverFault>;
}

/// Identity of a resolver within a registry; part of the session-state key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolverId(u32);

impl ResolverId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ResolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A resolver as it sits in a built registry
#[derive(Clone)]
pub struct RegisteredResolver {
    id: ResolverId,
    name: String,
    resolver: Arc<dyn ResourceResolver>,
}

impl RegisteredResolver {
    pub(crate) fn new(id: ResolverId, resolver: Arc<dyn ResourceResolver>) -> Self {
        Self {
            id,
            name: resolver.name().to_string(),
            resolver,
        }
    }

    pub fn id(&self) -> ResolverId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolver(&self) -> &dyn ResourceResolver {
        self.resolver.as_ref()
    }
}

impl fmt::Debug for RegisteredResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredResolver")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
