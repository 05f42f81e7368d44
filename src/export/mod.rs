//! The export engine: workbook assembly, delimited-text assembly, filename
//! stamping, and the final save handoff.

pub mod delimited;
pub mod download;
pub mod filename;
mod workbook;

pub use workbook::WorkbookExporter;
