mod common;

use common::strategies::*;
use common::*;
use proptest::prelude::*;
use refresolve_core::diagnostics::CollectingSink;
use refresolve_core::models::ResourceReference;
use refresolve_core::registry::{ResolverId, ResourceResolver};
use refresolve_core::resolution::ResolutionRequest;
use refresolve_core::session::{ResolverState, SessionStateStore};
use std::sync::Arc;

proptest! {
    /// Property: an unconstrained reference accepts every candidate
    #[test]
    fn unconstrained_reference_matches_any_version(
        name in reference_name_strategy(),
        candidate in ".{0,20}",
    ) {
        prop_assert!(ResourceReference::new(name.clone()).version_matches(&candidate));
        prop_assert!(ResourceReference::with_version(name, "").version_matches(&candidate));
    }

    /// Property: a constraint matches itself regardless of ASCII case
    #[test]
    fn constraint_matches_itself_case_insensitively(
        name in reference_name_strategy(),
        version in version_strategy(),
    ) {
        let reference = ResourceReference::with_version(name, version.clone());
        prop_assert!(reference.version_matches(&version));
        prop_assert!(reference.version_matches(&swap_ascii_case(&version)));
    }

    /// Property: a constraint matches exactly the case-insensitively equal candidates
    #[test]
    fn constraint_rejects_other_versions(
        version in version_strategy(),
        candidate in version_strategy(),
    ) {
        let reference = ResourceReference::with_version("Contoso.Sdk", version.clone());
        prop_assert_eq!(
            reference.version_matches(&candidate),
            version.eq_ignore_ascii_case(&candidate)
        );
    }

    /// Property: stored state is visible only under its own key
    #[test]
    fn state_is_scoped_to_session_and_resolver(
        session in session_id_strategy(),
        other in session_id_strategy(),
        resolver in 0u32..8,
        other_resolver in 0u32..8,
    ) {
        let store = SessionStateStore::new();
        store.set(session, ResolverId::new(resolver), ResolverState::new(resolver));

        let own = store.get(session, ResolverId::new(resolver));
        prop_assert_eq!(own.and_then(|s| s.downcast_ref::<u32>().copied()), Some(resolver));

        if other != session {
            prop_assert!(store.get(other, ResolverId::new(resolver)).is_none());
        }
        if other_resolver != resolver {
            prop_assert!(store.get(session, ResolverId::new(other_resolver)).is_none());
        }

        store.clear(session);
        prop_assert!(store.get(session, ResolverId::new(resolver)).is_none());
    }

    /// Property: when nothing resolves, errors are reported in attempt order
    #[test]
    fn errors_are_reported_in_attempt_order(
        attempts in prop::collection::vec(failure_messages_strategy(), 1..5),
    ) {
        let resolvers: Vec<Arc<dyn ResourceResolver>> = attempts
            .iter()
            .enumerate()
            .map(|(index, (errors, warnings))| {
                let errors: Vec<&str> = errors.iter().map(String::as_str).collect();
                let warnings: Vec<&str> = warnings.iter().map(String::as_str).collect();
                ScriptedResolver::failing(&format!("r{index}"), &errors, &warnings)
                    as Arc<dyn ResourceResolver>
            })
            .collect();
        let dispatcher = dispatcher_with(resolvers);
        let sink = CollectingSink::new();
        let request = ResolutionRequest::new(SESSION_A, ResourceReference::new("Contoso.Sdk"));

        prop_assert!(dispatcher.resolve(&request, &sink).unwrap().is_none());

        let expected_errors: Vec<String> =
            attempts.iter().flat_map(|(errors, _)| errors.clone()).collect();
        let expected_warnings: Vec<String> =
            attempts.iter().flat_map(|(_, warnings)| warnings.clone()).collect();
        prop_assert_eq!(sink.errors(), expected_errors);
        prop_assert_eq!(sink.warnings(), expected_warnings);
        prop_assert!(sink.fatals().is_empty());
    }
}
