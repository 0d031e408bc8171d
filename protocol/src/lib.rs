//! Report objects handed from report generation to a checks transport.
//!
//! The truncation engine lives in `checks-core`; this crate pairs its
//! documents with the optional metadata of a report and renders them within
//! the destination's field limit.

mod checks_output;

pub use checks_output::ChecksOutput;
pub use checks_output::ChecksOutputPayload;

/// Largest text field accepted by the checks API.
pub const MAX_FIELD_SIZE: usize = 65_535;
