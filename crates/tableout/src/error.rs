//! Export error types.

/// Errors that can occur while exporting a record collection.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The input slice contains no records.
    #[error("Input contains no records")]
    EmptyInput,

    /// The record type flattens to zero leaf fields.
    #[error("Record type has no exportable fields")]
    NoExportableFields,

    /// Writing a single worksheet cell failed.
    #[error("Failed to write cell {cell}: {source}")]
    CellWrite {
        cell: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Workbook encoding failed.
    #[error("Workbook serialization failed: {0}")]
    Serialization(#[from] rust_xlsxwriter::XlsxError),

    /// The embedded font could not be staged or registered.
    #[error("Font unavailable: {0}")]
    FontLoad(String),

    /// PDF document construction or serialization failed.
    #[error("Table layout failed: {0}")]
    Layout(String),
}
