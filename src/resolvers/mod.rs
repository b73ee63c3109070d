//! Resolvers that ship with the crate.
//!
//! The dispatcher treats these like any other [`ResourceResolver`](crate::registry::ResourceResolver);
//! hosts register them explicitly or through
//! [`StaticResolverLoader::from_config`](crate::registry::StaticResolverLoader::from_config).

pub mod directory;

pub use directory::{compare_versions, DirectoryResolver};
