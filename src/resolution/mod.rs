//! # Resolution
//!
//! The per-request side of the crate: the request a caller builds, the context
//! each resolver attempt sees, and the dispatcher that drives the attempts.

pub mod async_dispatch;
pub mod context;
pub mod dispatcher;

pub use context::{ResolutionContext, ResolutionRequest};
pub use dispatcher::ResolutionDispatcher;
