//! Record collection export to presentation formats.
//!
//! A [`Record`] type declares its exportable fields once, as a descriptor
//! tree; [`export_xlsx`] renders a slice of records into a single-sheet
//! workbook and [`export_pdf`] into a single-page table with
//! right-to-left text reshaping and script-aware column sizing. Both
//! return the finished document as bytes.

pub mod error;
mod fonts;
pub mod pdf;
pub mod record;
mod reshape;
pub mod xlsx;

pub use error::ExportError;
pub use fonts::remove_staged_font;
pub use pdf::export_pdf;
pub use record::{FieldSpec, Record, Target, flatten};
pub use xlsx::export_xlsx;
