//! Reading-status preference types.

use serde::{Deserialize, Serialize};

/// A user's relationship to a book.
///
/// `Read` is the want-to-read (wishlist) state; membership transitions are
/// unrestricted — any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceStatus {
    Read,
    Reading,
    Finished,
}

impl PreferenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }

    /// Parse the stored string form. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Self::Read),
            "reading" => Some(Self::Reading),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}
