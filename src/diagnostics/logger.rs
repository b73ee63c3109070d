use super::location::ReferenceLocation;
use super::sink::{DiagnosticsSink, MessageImportance};

/// Logger handed to a resolver through its context, bound to the request's
/// diagnostics sink and reference location.
#[derive(Clone, Copy)]
pub struct ResolverLogger<'a> {
    sink: &'a dyn DiagnosticsSink,
    location: &'a ReferenceLocation,
    resolver_name: &'a str,
}

impl<'a> ResolverLogger<'a> {
    pub fn new(
        sink: &'a dyn DiagnosticsSink,
        location: &'a ReferenceLocation,
        resolver_name: &'a str,
    ) -> Self {
        Self {
            sink,
            location,
            resolver_name,
        }
    }

    /// Report an informational message, prefixed with the resolver name.
    pub fn log_message(&self, message: &str, importance: MessageImportance) {
        self.sink.message(importance, &self.tagged(message));
    }

    /// Report a warning immediately, tied to the reference location.
    ///
    /// Warnings returned in a result are emitted by the dispatcher; this is for
    /// warnings a resolver wants surfaced whatever its outcome.
    pub fn log_warning(&self, message: &str) {
        self.sink.warning(self.location, &self.tagged(message));
    }

    pub fn resolver_name(&self) -> &str {
        self.resolver_name
    }

    pub fn location(&self) -> &ReferenceLocation {
        self.location
    }

    fn tagged(&self, message: &str) -> String {
        format!("[{}] {}", self.resolver_name, message)
    }
}

impl std::fmt::Debug for ResolverLogger<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverLogger")
            .field("sink", &"DiagnosticsSink")
            .field("location", &self.location)
            .field("resolver_name", &self.resolver_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::sink::{CollectingSink, Severity};

    #[test]
    fn test_logger_routes_to_sink() {
        let sink = CollectingSink::new();
        let location = ReferenceLocation::new("app.proj", 4, 2);
        let logger = ResolverLogger::new(&sink, &location, "nuget");

        logger.log_message("probing feed", MessageImportance::High);
        logger.log_warning("feed is slow");

        assert_eq!(logger.resolver_name(), "nuget");
        assert_eq!(sink.messages(Severity::Message), vec!["[nuget] probing feed"]);
        assert_eq!(sink.warnings(), vec!["[nuget] feed is slow"]);
        assert_eq!(sink.diagnostics()[1].location.as_ref(), Some(&location));
    }

    #[test]
    fn test_messages_from_different_resolvers_are_distinguishable() {
        let sink = CollectingSink::new();
        let location = ReferenceLocation::new("app.proj", 4, 2);

        ResolverLogger::new(&sink, &location, "nuget").log_message("probing", MessageImportance::Low);
        ResolverLogger::new(&sink, &location, "directory").log_message("probing", MessageImportance::Low);

        assert_eq!(
            sink.messages(Severity::Message),
            vec!["[nuget] probing", "[directory] probing"]
        );
    }
}
