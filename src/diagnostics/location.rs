use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a reference was declared. Every diagnostic about the reference is tied
/// to this location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceLocation {
    file: Option<PathBuf>,
    line: u32,
    column: u32,
}

impl ReferenceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    /// A location for references that were not declared in a file
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for ReferenceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (None, _) => write!(f, "<unknown>"),
            (Some(file), 0) => write!(f, "{}", file.display()),
            (Some(file), line) => write!(f, "{}({},{})", file.display(), line, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(ReferenceLocation::unknown().to_string(), "<unknown>");
        assert_eq!(
            ReferenceLocation::new("app/app.proj", 0, 0).to_string(),
            "app/app.proj"
        );
        assert_eq!(
            ReferenceLocation::new("app/app.proj", 3, 12).to_string(),
            "app/app.proj(3,12)"
        );
    }
}
