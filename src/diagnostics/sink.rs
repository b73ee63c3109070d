//! # Diagnostics Sinks
//!
//! The dispatcher reports everything a build user should see through a
//! [`DiagnosticsSink`]. Formatting and build-event correlation belong to the
//! host; this module ships two sinks:
//!
//! - [`CollectingSink`] keeps every report in order, for hosts that render
//!   diagnostics themselves and for tests
//! - [`TracingSink`] forwards reports to `tracing`

use super::location::ReferenceLocation;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a reported diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Message,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Message => write!(f, "message"),
        }
    }
}

/// Importance of informational messages logged by resolvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageImportance {
    Low,
    #[default]
    Normal,
    High,
}

/// Receives diagnostics produced while resolving references.
///
/// Implementations must tolerate calls from many threads at once.
pub trait DiagnosticsSink: Send + Sync {
    /// An unexpected fault, such as a resolver that errored or panicked
    fn fatal(&self, location: &ReferenceLocation, message: &str);

    fn error(&self, location: &ReferenceLocation, message: &str);

    fn warning(&self, location: &ReferenceLocation, message: &str);

    /// Informational output from a resolver. Ignored unless overridden.
    fn message(&self, _importance: MessageImportance, _message: &str) {}
}

/// One recorded diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Option<ReferenceLocation>,
    pub message: String,
    pub importance: Option<MessageImportance>,
    pub recorded_at: DateTime<Utc>,
}

/// Sink that records every diagnostic in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Messages of the given severity, in arrival order
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.diagnostics
            .lock()
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .map(|diagnostic| diagnostic.message.clone())
            .collect()
    }

    pub fn fatals(&self) -> Vec<String> {
        self.messages(Severity::Fatal)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }

    /// Take everything recorded so far, leaving the sink empty
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    fn record(&self, severity: Severity, location: Option<&ReferenceLocation>, message: &str) {
        self.push(Diagnostic {
            severity,
            location: location.cloned(),
            message: message.to_string(),
            importance: None,
            recorded_at: Utc::now(),
        });
    }

    fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}

impl DiagnosticsSink for CollectingSink {
    fn fatal(&self, location: &ReferenceLocation, message: &str) {
        self.record(Severity::Fatal, Some(location), message);
    }

    fn error(&self, location: &ReferenceLocation, message: &str) {
        self.record(Severity::Error, Some(location), message);
    }

    fn warning(&self, location: &ReferenceLocation, message: &str) {
        self.record(Severity::Warning, Some(location), message);
    }

    fn message(&self, importance: MessageImportance, message: &str) {
        self.push(Diagnostic {
            severity: Severity::Message,
            location: None,
            message: message.to_string(),
            importance: Some(importance),
            recorded_at: Utc::now(),
        });
    }
}

/// Sink that forwards every report to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn fatal(&self, location: &ReferenceLocation, message: &str) {
        tracing::error!(location = %location, fatal = true, "{}", message);
    }

    fn error(&self, location: &ReferenceLocation, message: &str) {
        tracing::error!(location = %location, "{}", message);
    }

    fn warning(&self, location: &ReferenceLocation, message: &str) {
        tracing::warn!(location = %location, "{}", message);
    }

    fn message(&self, importance: MessageImportance, message: &str) {
        match importance {
            MessageImportance::High => tracing::info!("{}", message),
            MessageImportance::Normal => tracing::debug!("{}", message),
            MessageImportance::Low => tracing::trace!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_preserves_order() {
        let sink = CollectingSink::new();
        let location = ReferenceLocation::new("a.proj", 1, 1);

        sink.warning(&location, "w1");
        sink.error(&location, "e1");
        sink.fatal(&location, "f1");
        sink.error(&location, "e2");
        sink.message(MessageImportance::Low, "m1");

        assert_eq!(sink.errors(), vec!["e1", "e2"]);
        assert_eq!(sink.warnings(), vec!["w1"]);
        assert_eq!(sink.fatals(), vec!["f1"]);
        assert_eq!(sink.count(Severity::Message), 1);

        let all = sink.diagnostics();
        assert_eq!(all.len(), 5);
        assert_eq!(all[1].location.as_ref(), Some(&location));
        assert_eq!(all[4].importance, Some(MessageImportance::Low));
        assert!(all[4].location.is_none());
    }

    #[test]
    fn test_drain_empties_sink() {
        let sink = CollectingSink::new();
        sink.error(&ReferenceLocation::unknown(), "boom");
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_diagnostic_serializes() {
        let sink = CollectingSink::new();
        sink.warning(&ReferenceLocation::new("a.proj", 2, 4), "careful");
        let json = serde_json::to_value(&sink.diagnostics()[0]).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["message"], "careful");
        assert_eq!(json["location"]["line"], 2);
    }
}
