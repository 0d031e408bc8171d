use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Unit used to account for the size of a chunk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// UTF-8 encoded length.
    #[default]
    Bytes,
    /// Number of Unicode scalar values.
    Chars,
}

impl Measure {
    pub fn of(self, text: &str) -> usize {
        match self {
            Self::Bytes => text.len(),
            Self::Chars => text.chars().count(),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Chars => f.write_str("chars"),
        }
    }
}
