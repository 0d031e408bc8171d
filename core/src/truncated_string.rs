//! Immutable text documents that can be rendered within a size budget.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::ChunkMode;
use crate::Measure;
use crate::TruncationConfig;
use crate::error::Result;
use crate::fold::fold;

pub const DEFAULT_TRUNCATION_TEXT: &str = "Output truncated.";

/// Which end of the text loses content first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncateFrom {
    /// Drop the latest chunks; the truncation text ends the output.
    #[default]
    End,
    /// Drop the earliest chunks; the truncation text starts the output.
    Start,
}

/// Text assembled from chunks that are kept or dropped as a whole when the
/// text has to fit a size limit.
///
/// `Display` always renders the full, untruncated text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruncatedString {
    parts: Vec<String>,
    truncation_text: String,
    truncate_from: TruncateFrom,
    chunk_mode: ChunkMode,
}

impl TruncatedString {
    pub fn builder() -> TruncatedStringBuilder {
        TruncatedStringBuilder::default()
    }

    /// The atomic chunks the text decomposes into, in document order.
    pub fn chunks(&self) -> Vec<Cow<'_, str>> {
        self.chunk_mode.chunks(&self.parts)
    }

    pub fn truncation_text(&self) -> &str {
        &self.truncation_text
    }

    pub fn truncate_from(&self) -> TruncateFrom {
        self.truncate_from
    }

    pub fn chunk_mode(&self) -> ChunkMode {
        self.chunk_mode
    }

    /// Renders the text within `max_size` UTF-8 bytes.
    pub fn build_by_bytes(&self, max_size: usize) -> Result<String> {
        self.build(max_size, Measure::Bytes)
    }

    /// Renders the text within `max_size` characters.
    pub fn build_by_chars(&self, max_size: usize) -> Result<String> {
        self.build(max_size, Measure::Chars)
    }

    /// Renders the text within `max_size`, counted with `measure`.
    ///
    /// Returns the full text when it fits. Otherwise whole chunks are dropped
    /// from the configured end and the truncation text marks where content
    /// went missing. Fails when `max_size` cannot hold the truncation text.
    pub fn build(&self, max_size: usize, measure: Measure) -> Result<String> {
        let mut chunks = self.chunks();
        if self.truncate_from == TruncateFrom::Start {
            chunks.reverse();
        }
        let mut kept = fold(chunks, max_size, measure, &self.truncation_text)?;
        if self.truncate_from == TruncateFrom::Start {
            kept.reverse();
        }
        Ok(kept.concat())
    }
}

impl fmt::Display for TruncatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.parts.iter().try_for_each(|part| f.write_str(part))
    }
}

impl From<String> for TruncatedString {
    fn from(text: String) -> Self {
        let mut builder = Self::builder();
        builder.add_text(text);
        builder.build()
    }
}

impl From<&str> for TruncatedString {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TruncatedStringBuilder {
    parts: Vec<String>,
    truncation_text: Option<String>,
    truncate_from: TruncateFrom,
    chunk_mode: ChunkMode,
}

impl TruncatedStringBuilder {
    /// Starts a builder with the settings from `config`.
    pub fn from_config(config: &TruncationConfig) -> Self {
        Self {
            parts: Vec::new(),
            truncation_text: config.truncation_text.clone(),
            truncate_from: config.truncate_from,
            chunk_mode: config.chunking,
        }
    }

    /// Appends one chunk in verbatim mode, or more raw text to be split into
    /// lines in line mode.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.parts.push(text.into());
        self
    }

    pub fn with_truncation_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.truncation_text = Some(text.into());
        self
    }

    pub fn set_truncate_start(&mut self) -> &mut Self {
        self.truncate_from = TruncateFrom::Start;
        self
    }

    pub fn set_chunk_on_newlines(&mut self) -> &mut Self {
        self.chunk_mode = ChunkMode::Lines;
        self
    }

    pub fn build(&self) -> TruncatedString {
        TruncatedString {
            parts: self.parts.clone(),
            truncation_text: self
                .truncation_text
                .clone()
                .unwrap_or_else(|| DEFAULT_TRUNCATION_TEXT.to_string()),
            truncate_from: self.truncate_from,
            chunk_mode: self.chunk_mode,
        }
    }
}
