//! # Directory Resolver
//!
//! Resolves references against one or more roots laid out as
//! `<root>/<name>/<version>/`.
//!
//! - A pinned reference resolves to the first root holding a matching version
//!   directory.
//! - An unpinned reference resolves to the highest version found across all
//!   roots (see [`compare_versions`]). Equal versions keep the earlier root.
//! - A name found under no root is declined, so later resolvers get a chance.
//! - A name found without a usable version is a failure listing what exists.
//!
//! Directory listings are cached in the resolver's session state, so repeated
//! lookups during one build read each `<root>/<name>` once.

use crate::constants::{DIRECTORY_RESOLVER_NAME, DIRECTORY_RESOLVER_PRIORITY};
use crate::diagnostics::MessageImportance;
use crate::error::ResolverFault;
use crate::models::{ResolverOutcome, ResourceReference, ResultFactory};
use crate::registry::ResourceResolver;
use crate::resolution::ResolutionContext;
use anyhow::Context;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-session cache of `<root>/<name>` listings. `None` records a missing
/// directory.
#[derive(Debug, Default)]
struct ListingCache {
    listings: Mutex<HashMap<PathBuf, Option<Vec<String>>>>,
}

impl ListingCache {
    fn versions(&self, dir: &Path) -> Result<Option<Vec<String>>, ResolverFault> {
        if let Some(cached) = self.listings.lock().get(dir) {
            return Ok(cached.clone());
        }

        let listing = read_versions(dir)?;
        self.listings
            .lock()
            .insert(dir.to_path_buf(), listing.clone());
        Ok(listing)
    }
}

/// Resolver over versioned directory trees
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    roots: Vec<PathBuf>,
    priority: i32,
}

impl DirectoryResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            priority: DIRECTORY_RESOLVER_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceResolver for DirectoryResolver {
    fn name(&self) -> &str {
        DIRECTORY_RESOLVER_NAME
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn resolve(
        &self,
        reference: &ResourceReference,
        context: &mut ResolutionContext<'_>,
        factory: &ResultFactory,
    ) -> Result<ResolverOutcome, ResolverFault> {
        if !is_plain_name(reference.name()) {
            return Ok(factory.decline());
        }

        let cache = context.state_or_insert_with(ListingCache::default);
        let mut found_name = false;
        let mut available: Vec<String> = Vec::new();
        let mut best: Option<(PathBuf, String)> = None;

        for root in &self.roots {
            let name_dir = root.join(reference.name());
            let Some(versions) = cache.versions(&name_dir)? else {
                continue;
            };
            found_name = true;

            context.logger().log_message(
                &format!(
                    "Found {} version(s) of \"{}\" under {}",
                    versions.len(),
                    reference.name(),
                    root.display()
                ),
                MessageImportance::Low,
            );

            match reference.version_constraint() {
                Some(_) => {
                    if let Some(version) = versions.iter().find(|v| reference.version_matches(v)) {
                        return Ok(factory.success(name_dir.join(version), Some(version.as_str())));
                    }
                }
                None => {
                    // Listings are sorted ascending, so the last entry is the
                    // highest in this root.
                    if let Some(highest) = versions.last() {
                        let better = best
                            .as_ref()
                            .map_or(true, |(_, current)| {
                                compare_versions(highest, current) == Ordering::Greater
                            });
                        if better {
                            best = Some((name_dir.join(highest), highest.clone()));
                        }
                    }
                }
            }

            for version in versions {
                if !available.contains(&version) {
                    available.push(version);
                }
            }
        }

        if !found_name {
            debug!(
                resolver = DIRECTORY_RESOLVER_NAME,
                reference = %reference,
                roots = self.roots.len(),
                "Reference not present under any root"
            );
            return Ok(factory.decline());
        }

        if let Some((path, version)) = best {
            return Ok(factory.success(path, Some(version.as_str())));
        }

        available.sort_by(|a, b| compare_versions(a, b));
        let listed = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        let wanted = reference.version_constraint().unwrap_or("any version");

        Ok(factory.failure(
            [format!(
                "\"{}\" ({}) was not found under {} root(s). Available versions: {}",
                reference.name(),
                wanted,
                self.roots.len(),
                listed
            )],
            std::iter::empty::<String>(),
        ))
    }
}

/// Order two version strings segment by segment.
///
/// Segments are split on `.`, and each segment is split again at its first
/// `-` into a base and a prerelease suffix. Two numeric bases compare as
/// numbers; any other pair compares lexically. With equal bases a segment
/// without a suffix ranks above one with a suffix, so `2.0.0` beats
/// `2.0.0-rc1`. When one version is a prefix of the other the shorter one is
/// lower.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let mut left_parts = left.split('.');
    let mut right_parts = right.split('.');

    loop {
        match (left_parts.next(), right_parts.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = compare_segments(l, r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_segments(left: &str, right: &str) -> Ordering {
    let (left_base, left_suffix) = split_prerelease(left);
    let (right_base, right_suffix) = split_prerelease(right);

    let base = match (left_base.parse::<u64>(), right_base.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        _ => left_base.cmp(right_base),
    };

    base.then_with(|| match (left_suffix, right_suffix) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => l.cmp(r),
    })
}

fn split_prerelease(segment: &str) -> (&str, Option<&str>) {
    match segment.split_once('-') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (segment, None),
    }
}

// Names are used as a single path component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

fn read_versions(dir: &Path) -> Result<Option<Vec<String>>, ResolverFault> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(error).with_context(|| format!("Failed to list {}", dir.display()))
        }
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        // Follows symlinks; a dangling link is not a version.
        if !entry.path().is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            versions.push(name);
        }
    }

    versions.sort_by(|a, b| compare_versions(a, b));
    Ok(Some(versions))
}
