//! # Resolver Registry
//!
//! The priority-ordered resolver list and its one-time construction.
//!
//! [`LazyResolverRegistry`] builds the [`ResolverRegistry`] on first use. The
//! published registry lives in a `OnceLock`, so readers never take a lock once
//! it exists. Construction is serialized by a mutex and re-checked after the
//! lock is acquired, so concurrent first callers block until the single build
//! finishes and the loader runs exactly once. A failed load publishes nothing
//! and the next caller tries again.

use super::loader::ResolverLoader;
use super::resolver::{RegisteredResolver, ResolverId, ResourceResolver};
use crate::constants::components;
use crate::diagnostics::{DiagnosticsSink, ReferenceLocation};
use crate::error::{ResolverError, Result};
use crate::utils::panic::panic_message;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{error, info};

/// Immutable, ordered resolver list. Lower index wins.
#[derive(Debug, Default)]
pub struct ResolverRegistry {
    resolvers: Vec<RegisteredResolver>,
}

impl ResolverRegistry {
    /// Assigns each resolver its identity from its position
    pub fn from_resolvers(resolvers: Vec<Arc<dyn ResourceResolver>>) -> Self {
        let resolvers = resolvers
            .into_iter()
            .enumerate()
            .map(|(index, resolver)| {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                RegisteredResolver::new(ResolverId::new(index), resolver)
            })
            .collect();

        Self { resolvers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredResolver> {
        self.resolvers.iter()
    }

    pub fn get(&self, id: ResolverId) -> Option<&RegisteredResolver> {
        self.resolvers.get(id.index() as usize)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.resolvers
            .iter()
            .map(|resolver| resolver.name().to_string())
            .collect()
    }
}

/// A registry that is built from its loader on first access
pub struct LazyResolverRegistry {
    loader: Arc<dyn ResolverLoader>,
    registry: OnceLock<ResolverRegistry>,
    init_lock: Mutex<()>,
}

impl LazyResolverRegistry {
    pub fn new(loader: Arc<dyn ResolverLoader>) -> Self {
        Self {
            loader,
            registry: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// The registry, if it has been built
    pub fn get(&self) -> Option<&ResolverRegistry> {
        self.registry.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.get().is_some()
    }

    /// The registry, building it from the loader if this is the first access.
    ///
    /// Loader errors and loader panics are returned as
    /// [`ResolverError::RegistryLoad`].
    pub fn get_or_load(
        &self,
        sink: &dyn DiagnosticsSink,
        location: &ReferenceLocation,
    ) -> Result<&ResolverRegistry> {
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }

        let _guard = self.init_lock.lock();

        // Another caller may have finished the build while we waited.
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }

        let started = Instant::now();
        let loaded = catch_unwind(AssertUnwindSafe(|| {
            self.loader.load_resolvers(sink, location)
        }));

        let resolvers = match loaded {
            Ok(Ok(resolvers)) => resolvers,
            Ok(Err(fault)) => {
                error!(
                    component = components::REGISTRY,
                    error = %fault,
                    "Resolver loader failed"
                );
                return Err(ResolverError::registry_load(format!("{fault:#}")));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(
                    component = components::REGISTRY,
                    panic_msg = %message,
                    "Resolver loader panicked"
                );
                return Err(ResolverError::registry_load(format!(
                    "loader panicked: {message}"
                )));
            }
        };

        let registry = ResolverRegistry::from_resolvers(resolvers);
        info!(
            component = components::REGISTRY,
            resolver_count = registry.len(),
            resolvers = ?registry.names(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Resolver registry initialized"
        );

        Ok(self.registry.get_or_init(|| registry))
    }
}

impl std::fmt::Debug for LazyResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyResolverRegistry")
            .field("loader", &"ResolverLoader")
            .field("registry", &self.registry.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::error::ResolverFault;
    use crate::models::{ResourceReference, ResolverOutcome, ResultFactory};
    use crate::registry::StaticResolverLoader;
    use crate::resolution::ResolutionContext;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Noop(&'static str);

    impl ResourceResolver for Noop {
        fn name(&self) -> &str {
            self.0
        }

        fn resolve(
            &self,
            _reference: &ResourceReference,
            _context: &mut ResolutionContext<'_>,
            factory: &ResultFactory,
        ) -> std::result::Result<ResolverOutcome, ResolverFault> {
            Ok(factory.decline())
        }
    }

    #[test]
    fn test_ids_follow_position() {
        let resolvers: Vec<Arc<dyn ResourceResolver>> =
            vec![Arc::new(Noop("a")), Arc::new(Noop("b"))];
        let registry = ResolverRegistry::from_resolvers(resolvers);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(ResolverId::new(1)).unwrap().name(), "b");
        assert!(registry.get(ResolverId::new(2)).is_none());
        let ids: Vec<_> = registry.iter().map(|r| r.id().index()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_loads_once() {
        let loader = Arc::new(
            StaticResolverLoader::new().with_resolver(Arc::new(Noop("only"))),
        );
        let lazy = LazyResolverRegistry::new(loader.clone());
        let sink = CollectingSink::new();
        let location = ReferenceLocation::unknown();

        assert!(!lazy.is_initialized());
        assert_eq!(lazy.get_or_load(&sink, &location).unwrap().names(), vec!["only"]);
        assert_eq!(lazy.get_or_load(&sink, &location).unwrap().len(), 1);
        assert!(lazy.is_initialized());
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let loader = move |_: &dyn DiagnosticsSink,
                           _: &ReferenceLocation|
              -> std::result::Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("resolver manifest unreadable");
            }
            Ok(vec![Arc::new(Noop("recovered")) as Arc<dyn ResourceResolver>])
        };
        let lazy = LazyResolverRegistry::new(Arc::new(loader));
        let sink = CollectingSink::new();
        let location = ReferenceLocation::unknown();

        let err = lazy.get_or_load(&sink, &location).unwrap_err();
        assert!(matches!(err, ResolverError::RegistryLoad { .. }));
        assert!(err.to_string().contains("resolver manifest unreadable"));
        assert!(!lazy.is_initialized());

        assert_eq!(lazy.get_or_load(&sink, &location).unwrap().names(), vec!["recovered"]);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_loader_panic_becomes_error() {
        let loader = |_: &dyn DiagnosticsSink,
                      _: &ReferenceLocation|
         -> std::result::Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault> {
            panic!("plugin directory vanished")
        };
        let lazy = LazyResolverRegistry::new(Arc::new(loader));
        let err = lazy
            .get_or_load(&CollectingSink::new(), &ReferenceLocation::unknown())
            .unwrap_err();
        assert!(err.to_string().contains("plugin directory vanished"));
    }
}
