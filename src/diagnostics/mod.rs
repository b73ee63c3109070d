//! # Diagnostics
//!
//! The interface through which resolution problems reach the build user, and
//! the logger resolvers use to talk to it.

pub mod location;
pub mod logger;
pub mod sink;

pub use location::ReferenceLocation;
pub use logger::ResolverLogger;
pub use sink::{
    CollectingSink, Diagnostic, DiagnosticsSink, MessageImportance, Severity, TracingSink,
};
