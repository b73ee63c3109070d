//! # Resolver Registry Infrastructure
//!
//! Everything between "which resolvers exist" and "in what order are they
//! consulted".
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── ResourceResolver       (plugin contract)
//! ├── ResolverLoader         (produces the ordered list)
//! │   └── StaticResolverLoader
//! └── LazyResolverRegistry   (exactly-once build, lock-free reads after)
//!     └── ResolverRegistry   (immutable, priority = position)
//! ```

pub mod loader;
pub mod resolver;
pub mod resolver_registry;

pub use loader::{ResolverLoader, ResolverRegistration, StaticResolverLoader};
pub use resolver::{RegisteredResolver, ResolverId, ResourceResolver};
pub use resolver_registry::{LazyResolverRegistry, ResolverRegistry};
