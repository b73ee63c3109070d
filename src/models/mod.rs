//! # Data Model
//!
//! Value types shared by the dispatcher, the resolver plugins and callers.
//!
//! - [`ResourceReference`] - what is requested
//! - [`ResolutionResult`] / [`ResolverOutcome`] - what a resolver answered
//! - [`SessionId`] - the build submission a request belongs to

pub mod reference;
pub mod result;
pub mod session;

pub use reference::ResourceReference;
pub use result::{ResolutionResult, ResolverOutcome, ResultFactory};
pub use session::SessionId;
