//! # Session State
//!
//! Stateful resolvers cache expensive work across lookups that belong to the
//! same build session. The dispatcher reads a resolver's [`ResolverState`]
//! from the [`SessionStateStore`] before each attempt and writes it back after.

pub mod state;
pub mod store;

pub use state::ResolverState;
pub use store::{SessionStateStore, SessionStoreStats};
