//! Error types for list binding.

use thiserror::Error;

/// Error type for view binding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// A row index past the end of the bound list was selected.
    #[error("Row {index} out of range for {len} rows")]
    RowOutOfRange {
        /// The selected index.
        index: usize,
        /// Number of bound rows.
        len: usize,
    },
}

/// Result type alias for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_out_of_range_display() {
        let err = ViewError::RowOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Row 4 out of range for 2 rows");
    }
}
