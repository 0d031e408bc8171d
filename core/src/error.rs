use thiserror::Error;

use crate::Measure;

pub type Result<T> = std::result::Result<T, TruncationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TruncationError {
    /// The requested size cannot even hold the truncation marker.
    #[error(
        "maximum size {max_size} is smaller than the truncation text ({marker_size} {measure})"
    )]
    BudgetTooSmall {
        max_size: usize,
        marker_size: usize,
        measure: Measure,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn budget_too_small_message_names_both_sizes() {
        let err = TruncationError::BudgetTooSmall {
            max_size: 5,
            marker_size: 9,
            measure: Measure::Chars,
        };
        assert_eq!(
            err.to_string(),
            "maximum size 5 is smaller than the truncation text (9 chars)"
        );
    }
}
