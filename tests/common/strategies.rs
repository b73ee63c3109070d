use proptest::prelude::*;
use refresolve_core::models::SessionId;

/// Strategy for reference names as they appear in project files
pub fn reference_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,15}(\\.[A-Z][a-zA-Z0-9]{0,15}){0,3}"
}

/// Strategy for version strings, including prerelease tags with letters
pub fn version_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,3}\\.[0-9]{1,3}(\\.[0-9]{1,3})?(-[a-zA-Z]{1,8})?"
}

/// Strategy for cacheable session ids
pub fn session_id_strategy() -> impl Strategy<Value = SessionId> {
    (0i32..10_000).prop_map(SessionId::new)
}

/// Strategy for one attempt's failure messages: `(errors, warnings)`
pub fn failure_messages_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (
        prop::collection::vec("[a-z]{1,12}( [a-z]{1,12}){0,3}", 0..4),
        prop::collection::vec("[a-z]{1,12}( [a-z]{1,12}){0,3}", 0..3),
    )
}

/// Swap the case of every ASCII letter
pub fn swap_ascii_case(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
