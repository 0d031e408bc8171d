use checks_core::TruncatedString;
use checks_core::TruncationError;
use serde::Serialize;
use tracing::debug;

/// Output section of a check run: a title plus a summary and a longer text,
/// each of which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksOutput {
    title: Option<String>,
    summary: Option<TruncatedString>,
    text: Option<TruncatedString>,
}

/// A [`ChecksOutput`] rendered within a field limit, ready to serialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecksOutputPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ChecksOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<TruncatedString>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<TruncatedString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The summary within `max_size` characters, if there is one.
    pub fn summary(&self, max_size: usize) -> Result<Option<String>, TruncationError> {
        self.summary
            .as_ref()
            .map(|summary| summary.build_by_chars(max_size))
            .transpose()
    }

    /// The text within `max_size` characters, if there is one.
    pub fn text(&self, max_size: usize) -> Result<Option<String>, TruncationError> {
        self.text
            .as_ref()
            .map(|text| text.build_by_chars(max_size))
            .transpose()
    }

    /// Renders every present field within `max_size` characters.
    pub fn to_payload(&self, max_size: usize) -> Result<ChecksOutputPayload, TruncationError> {
        let payload = ChecksOutputPayload {
            title: self.title.clone(),
            summary: self.summary(max_size)?,
            text: self.text(max_size)?,
        };
        debug!(
            max_size,
            has_summary = payload.summary.is_some(),
            has_text = payload.text.is_some(),
            "rendered checks output"
        );
        Ok(payload)
    }
}
