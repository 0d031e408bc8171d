//! Decomposition of accumulated text into atomic chunks.
//!
//! A chunk is the smallest unit the fold will keep or drop; it is never cut.

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkMode {
    /// Every appended piece of text is one chunk.
    #[default]
    Verbatim,
    /// All appended text is joined and split after each line terminator.
    Lines,
}

impl ChunkMode {
    /// Returns the ordered chunks for `parts`. Concatenating the result always
    /// reproduces the concatenation of `parts`.
    pub fn chunks<'a>(self, parts: &'a [String]) -> Vec<Cow<'a, str>> {
        match self {
            Self::Verbatim => parts.iter().map(|part| Cow::Borrowed(part.as_str())).collect(),
            Self::Lines => split_lines(&parts.concat())
                .into_iter()
                .map(|line| Cow::Owned(line.to_string()))
                .collect(),
        }
    }
}

/// Splits `text` immediately after every `\n`, keeping the terminator (and a
/// preceding `\r`) attached to its line. A trailing fragment without a
/// terminator becomes the last chunk.
fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
