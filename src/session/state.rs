use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque, resolver-owned state carried between calls within one session.
///
/// The dispatcher and the store never look inside; only the resolver that
/// stored a value knows its concrete type and can downcast it. Cloning is
/// cheap and shares the underlying value.
#[derive(Clone)]
pub struct ResolverState(Arc<dyn Any + Send + Sync>);

impl ResolverState {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an existing shared value without reallocating it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(value)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Shared handle to the value, if it is a `T`
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.0).downcast::<T>().ok()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Whether both handles point at the same stored value
    pub fn ptr_eq(&self, other: &ResolverState) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ResolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverState").finish_non_exhaustive()
    }
}
