use crate::constants::NO_SESSION_ID;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one build submission.
///
/// [`SessionId::NONE`] is reserved: requests carrying it never read or write
/// cached resolver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(i32);

impl SessionId {
    pub const NONE: SessionId = SessionId(NO_SESSION_ID);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether state may be cached under this session
    pub fn is_cacheable(self) -> bool {
        self != Self::NONE
    }
}

impl From<i32> for SessionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_cacheable() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "none")
        }
    }
}
