//! Vitis Export - tabular export engine
//!
//! Converts in-memory tabular data (typed column descriptors + row records)
//! into a styled multi-sheet .xlsx workbook or a delimited-text blob, then
//! hands the result off for saving under a date-stamped filename.
//!
//! # Features
//!
//! - Type-aware cell formatting (text, integer, currency, percentage, date,
//!   hyperlink)
//! - Auto-sized columns clamped to sane widths
//! - Styled header rows, multi-sheet workbooks
//! - CSV exit path with proper quote escaping
//! - Typed inventory filter criteria applied before export
//!
//! # Example
//!
//! ```no_run
//! use vitis_export::export::WorkbookExporter;
//! use vitis_export::parser::parse_request;
//! use std::path::Path;
//!
//! let request = parse_request(Path::new("inventario.json"))?;
//! let buffer = WorkbookExporter::new(request).build()?;
//!
//! println!("workbook: {} bytes", buffer.len());
//! # Ok::<(), vitis_export::error::ExportError>(())
//! ```

pub mod cli;
pub mod error;
pub mod export;
pub mod filter;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use error::{ExportError, ExportResult};
pub use types::{CellValue, ColumnDescriptor, ColumnKind, ExportRequest, RowRecord, SheetSpec};
