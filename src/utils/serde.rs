/*!
 * Serde helpers for configuration values that may arrive either as a list or
 * as a single delimited string.
 *
 * Files naturally express lists as arrays, but environment overrides such as
 * `REFRESOLVE__DISPATCHER__DISABLED_RESOLVERS` can only carry a string. These
 * helpers accept both shapes so the same field works from either source.
 */

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Deserialize a list of names from a sequence or a comma-separated string.
///
/// Entries are trimmed and blank entries dropped. A missing or null value
/// yields an empty list.
///
/// ```rust
/// use serde::Deserialize;
/// use refresolve_core::utils::serde::deserialize_string_list;
///
/// #[derive(Deserialize)]
/// struct Section {
///     #[serde(default, deserialize_with = "deserialize_string_list")]
///     disabled: Vec<String>,
/// }
///
/// let section: Section = serde_json::from_str(r#"{"disabled": "a, b"}"#).unwrap();
/// assert_eq!(section.disabled, vec!["a", "b"]);
/// ```
pub fn deserialize_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = collect_raw(deserializer)?;
    Ok(match raw {
        RawList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
        RawList::Items(items) => items
            .into_iter()
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect(),
    })
}

/// Deserialize a list of paths from a sequence or a platform path-list string
/// (`:`-separated on Unix, `;`-separated on Windows).
pub fn deserialize_path_list<'de, D>(deserializer: D) -> std::result::Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = collect_raw(deserializer)?;
    Ok(match raw {
        RawList::Joined(joined) => std::env::split_paths(&joined)
            .filter(|path| !path.as_os_str().is_empty())
            .collect(),
        RawList::Items(items) => items
            .into_iter()
            .filter(|entry| !entry.trim().is_empty())
            .map(PathBuf::from)
            .collect(),
    })
}

enum RawList {
    Joined(String),
    Items(Vec<String>),
}

fn collect_raw<'de, D>(deserializer: D) -> std::result::Result<RawList, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(RawList::Items(Vec::new())),
        Some(serde_json::Value::String(joined)) => Ok(RawList::Joined(joined)),
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(entry) => Ok(entry),
                other => Err(D::Error::custom(format!(
                    "Expected string list entry, found: {other}"
                ))),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(RawList::Items),
        Some(other) => Err(D::Error::custom(format!(
            "Expected a list or a delimited string, found: {other}"
        ))),
    }
}
