//! Serializable truncation settings.
//!
//! Callers own loading (for example from a TOML file); this module only
//! defines the shape and its defaults.

use serde::Deserialize;
use serde::Serialize;

use crate::ChunkMode;
use crate::Measure;
use crate::TruncateFrom;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TruncationConfig {
    /// Text appended where content was dropped. Falls back to
    /// [`crate::DEFAULT_TRUNCATION_TEXT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation_text: Option<String>,
    pub truncate_from: TruncateFrom,
    pub chunking: ChunkMode,
    pub measure: Measure,
    /// Size limit of the destination field, counted with `measure`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,
}
