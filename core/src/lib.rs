//! Root of the `checks-core` library.
//!
//! Builds text that must fit a hard size limit without tearing the units the
//! caller marked as atomic. Callers append chunks through
//! [`TruncatedStringBuilder`], freeze them into a [`TruncatedString`], and
//! size the result with [`TruncatedString::build_by_bytes`] or
//! [`TruncatedString::build_by_chars`].

// Library code never writes to stdout/stderr; diagnostics go through tracing.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod chunking;
pub mod config;
pub mod error;
pub mod fold;
mod measure;
pub mod truncated_string;

pub use chunking::ChunkMode;
pub use config::TruncationConfig;
pub use error::TruncationError;
pub use fold::Accumulator;
pub use measure::Measure;
pub use truncated_string::DEFAULT_TRUNCATION_TEXT;
pub use truncated_string::TruncateFrom;
pub use truncated_string::TruncatedString;
pub use truncated_string::TruncatedStringBuilder;
