//! # Resolution Results
//!
//! What a single resolver attempt produces. A resolver answers with a
//! [`ResolverOutcome`]: it either declines, reports a failure, or resolves the
//! reference. Results are built through a [`ResultFactory`] so the success flag
//! always agrees with the outcome variant.

use super::reference::ResourceReference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The result of one resolver attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    reference: ResourceReference,
    success: bool,
    path: Option<PathBuf>,
    resolved_version: Option<String>,
    additional_paths: Vec<PathBuf>,
    properties: BTreeMap<String, String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ResolutionResult {
    pub fn reference(&self) -> &ResourceReference {
        &self.reference
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn resolved_version(&self) -> Option<&str> {
        self.resolved_version.as_deref()
    }

    /// Extra search paths contributed alongside the primary path
    pub fn additional_paths(&self) -> &[PathBuf] {
        &self.additional_paths
    }

    /// Build properties contributed by the resolver
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_path(self) -> Option<PathBuf> {
        self.path
    }
}

/// A resolver's answer for one reference
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverOutcome {
    /// The resolver has nothing to say about this reference
    Declined,
    /// The resolver recognised the reference but could not resolve it
    Failed(ResolutionResult),
    /// The resolver produced a usable path
    Resolved(ResolutionResult),
}

impl ResolverOutcome {
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn result(&self) -> Option<&ResolutionResult> {
        match self {
            Self::Declined => None,
            Self::Failed(result) | Self::Resolved(result) => Some(result),
        }
    }

    pub fn into_result(self) -> Option<ResolutionResult> {
        match self {
            Self::Declined => None,
            Self::Failed(result) | Self::Resolved(result) => Some(result),
        }
    }

    /// Append a warning. No effect on a decline.
    pub fn with_warning(self, warning: impl Into<String>) -> Self {
        self.map_result(|result| result.warnings.push(warning.into()))
    }

    /// Append an additional search path. No effect on a decline.
    pub fn with_additional_path(self, path: impl Into<PathBuf>) -> Self {
        self.map_result(|result| result.additional_paths.push(path.into()))
    }

    /// Set a build property. No effect on a decline.
    pub fn with_property(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map_result(|result| {
            result.properties.insert(key.into(), value.into());
        })
    }

    fn map_result(mut self, apply: impl FnOnce(&mut ResolutionResult)) -> Self {
        match &mut self {
            Self::Declined => {}
            Self::Failed(result) | Self::Resolved(result) => apply(result),
        }
        self
    }
}

impl From<ResolutionResult> for ResolverOutcome {
    fn from(result: ResolutionResult) -> Self {
        if result.success {
            Self::Resolved(result)
        } else {
            Self::Failed(result)
        }
    }
}

/// Builds outcomes for one reference. Handed to every resolver invocation.
///
/// Error and warning strings are stored exactly as given, in order.
#[derive(Debug, Clone)]
pub struct ResultFactory {
    reference: ResourceReference,
}

impl ResultFactory {
    pub fn new(reference: &ResourceReference) -> Self {
        Self {
            reference: reference.clone(),
        }
    }

    pub fn decline(&self) -> ResolverOutcome {
        ResolverOutcome::Declined
    }

    /// A successful resolution with no warnings
    pub fn success(&self, path: impl Into<PathBuf>, version: Option<&str>) -> ResolverOutcome {
        self.success_with(path, version, std::iter::empty::<String>())
    }

    pub fn success_with<I, S>(
        &self,
        path: impl Into<PathBuf>,
        version: Option<&str>,
        warnings: I,
    ) -> ResolverOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResolverOutcome::Resolved(ResolutionResult {
            reference: self.reference.clone(),
            success: true,
            path: Some(path.into()),
            resolved_version: version.map(str::to_string),
            additional_paths: Vec::new(),
            properties: BTreeMap::new(),
            errors: Vec::new(),
            warnings: collect_messages(warnings),
        })
    }

    pub fn failure<E, W, S, T>(&self, errors: E, warnings: W) -> ResolverOutcome
    where
        E: IntoIterator<Item = S>,
        S: Into<String>,
        W: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ResolverOutcome::Failed(ResolutionResult {
            reference: self.reference.clone(),
            success: false,
            path: None,
            resolved_version: None,
            additional_paths: Vec::new(),
            properties: BTreeMap::new(),
            errors: collect_messages(errors),
            warnings: collect_messages(warnings),
        })
    }
}

// Messages are kept verbatim, blank ones included, so every entry reaches the sink.
fn collect_messages<I, S>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    messages.into_iter().map(Into::into).collect()
}
