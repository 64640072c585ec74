//! Spreadsheet archive error types.

use thiserror::Error;

/// Archive-specific errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The workbook could not be opened or parsed.
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    /// The workbook could not be built or written.
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook contains no worksheet.
    #[error("workbook {path} has no worksheets")]
    EmptyWorkbook {
        /// Workbook path
        path: String,
    },

    /// The existing sheet lacks a column needed for deduplication.
    #[error("worksheet is missing column {0}")]
    MissingColumn(String),

    /// More columns or rows than a worksheet can hold.
    #[error("worksheet limit exceeded: {0}")]
    TooLarge(String),

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, StoreError>;
