//! # Resolver Loader
//!
//! Produces the priority-ordered resolver list a dispatcher consults. The
//! dispatcher calls its loader at most once per successful registry build.
//!
//! [`StaticResolverLoader`] covers in-process registration: resolvers are
//! registered with a priority, sorted ascending (ties keep registration order),
//! and any resolver named in the configured disabled list is dropped.
//!
//! ```rust
//! use refresolve_core::registry::{ResolverLoader, StaticResolverLoader};
//! use refresolve_core::diagnostics::{CollectingSink, ReferenceLocation};
//!
//! let loader = StaticResolverLoader::new();
//! let sink = CollectingSink::new();
//! let resolvers = loader
//!     .load_resolvers(&sink, &ReferenceLocation::unknown())
//!     .unwrap();
//! assert!(resolvers.is_empty());
//! assert_eq!(loader.load_count(), 1);
//! ```

use super::resolver::ResourceResolver;
use crate::config::RefresolveConfig;
use crate::constants::components;
use crate::diagnostics::{DiagnosticsSink, ReferenceLocation};
use crate::error::ResolverFault;
use crate::resolvers::DirectoryResolver;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of the ordered resolver list
pub trait ResolverLoader: Send + Sync {
    fn load_resolvers(
        &self,
        sink: &dyn DiagnosticsSink,
        location: &ReferenceLocation,
    ) -> Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault>;
}

impl<F> ResolverLoader for F
where
    F: Fn(&dyn DiagnosticsSink, &ReferenceLocation) -> Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault>
        + Send
        + Sync,
{
    fn load_resolvers(
        &self,
        sink: &dyn DiagnosticsSink,
        location: &ReferenceLocation,
    ) -> Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault> {
        self(sink, location)
    }
}

/// A resolver together with the priority it was registered at
#[derive(Clone)]
pub struct ResolverRegistration {
    pub resolver: Arc<dyn ResourceResolver>,
    pub priority: i32,
}

impl std::fmt::Debug for ResolverRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistration")
            .field("name", &self.resolver.name())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Loader over resolvers registered in-process
#[derive(Debug, Default)]
pub struct StaticResolverLoader {
    registrations: Vec<ResolverRegistration>,
    disabled: Vec<String>,
    load_count: AtomicUsize,
}

impl StaticResolverLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader seeded from configuration: the built-in directory resolver when
    /// enabled, and the configured disabled list.
    pub fn from_config(config: &RefresolveConfig) -> Self {
        let mut loader = Self::new();
        loader.disabled = config.dispatcher.disabled_resolvers.clone();

        let directory = &config.directory_resolver;
        if directory.enabled {
            loader.register_with_priority(
                Arc::new(DirectoryResolver::new(directory.roots.clone())),
                directory.priority,
            );
        }

        loader
    }

    /// Register at the resolver's own priority
    pub fn register(&mut self, resolver: Arc<dyn ResourceResolver>) -> &mut Self {
        let priority = resolver.priority();
        self.register_with_priority(resolver, priority)
    }

    pub fn register_with_priority(
        &mut self,
        resolver: Arc<dyn ResourceResolver>,
        priority: i32,
    ) -> &mut Self {
        if self
            .registrations
            .iter()
            .any(|existing| existing.resolver.name() == resolver.name())
        {
            warn!(
                component = components::LOADER,
                name = resolver.name(),
                "Resolver name registered more than once"
            );
        }

        self.registrations
            .push(ResolverRegistration { resolver, priority });
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ResourceResolver>) -> Self {
        self.register(resolver);
        self
    }

    pub fn with_resolver_at(mut self, resolver: Arc<dyn ResourceResolver>, priority: i32) -> Self {
        self.register_with_priority(resolver, priority);
        self
    }

    /// Exclude resolvers by name (ASCII case-insensitive)
    pub fn disable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn registrations(&self) -> &[ResolverRegistration] {
        &self.registrations
    }

    /// How many times `load_resolvers` has run
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    fn is_disabled(&self, name: &str) -> bool {
        self.disabled
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(name))
    }
}

impl ResolverLoader for StaticResolverLoader {
    fn load_resolvers(
        &self,
        _sink: &dyn DiagnosticsSink,
        _location: &ReferenceLocation,
    ) -> Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault> {
        self.load_count.fetch_add(1, Ordering::SeqCst);

        let mut ordered: Vec<&ResolverRegistration> = self.registrations.iter().collect();
        ordered.sort_by_key(|registration| registration.priority);

        let mut matched_disabled = HashSet::new();
        let resolvers: Vec<Arc<dyn ResourceResolver>> = ordered
            .into_iter()
            .filter(|registration| {
                let name = registration.resolver.name();
                if self.is_disabled(name) {
                    matched_disabled.insert(name.to_ascii_lowercase());
                    debug!(
                        component = components::LOADER,
                        name = name,
                        "Skipping disabled resolver"
                    );
                    false
                } else {
                    true
                }
            })
            .map(|registration| Arc::clone(&registration.resolver))
            .collect();

        for name in &self.disabled {
            if !matched_disabled.contains(&name.to_ascii_lowercase()) {
                warn!(
                    component = components::LOADER,
                    name = %name,
                    "Disabled resolver name matches no registered resolver"
                );
            }
        }

        crate::log_registry!(
            debug,
            "Resolvers loaded",
            count: resolvers.len(),
            order: resolvers.iter().map(|r| r.name().to_string()).collect::<Vec<_>>()
        );

        Ok(resolvers)
    }
}
