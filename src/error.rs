use thiserror::Error;

/// Convenience result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Error type returned by codec functions.
///
/// Only fatal conditions are errors. Cell coercion mismatches and validation failures are
/// collected into a [`crate::mapping::ConversionReport`] instead.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook container could not be decoded.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The xlsx encoder rejected the output sheet.
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// A schema descriptor could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file name does not select a supported container.
    #[error("only support .xlsx or .xls, but passed file extension is {ext}")]
    UnsupportedExtension { ext: String },

    /// The workbook does not match what the codec expects (e.g. it has no sheets).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}
