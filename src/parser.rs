//! Export-manifest parsing
//!
//! The callers that used to feed the export engine fetched JSON from the
//! store API and passed already-shaped arrays along. The manifest keeps that
//! boundary: a JSON document with a base filename and one or more sheets,
//! each carrying column descriptors plus row objects keyed by column key.
//!
//! ```json
//! {
//!   "filename": "inventario",
//!   "sheets": [
//!     { "name": "Datos",
//!       "columns": [ {"key": "nombre", "label": "Producto", "kind": "text"} ],
//!       "rows": [ {"nombre": "Mouse"} ] }
//!   ]
//! }
//! ```

use crate::error::{ExportError, ExportResult};
use crate::types::{ColumnDescriptor, ExportRequest, RowRecord, SheetSpec};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Raw manifest shape. Column kinds stay strings here so an unrecognized
/// kind surfaces as `UnknownColumnKind` rather than a serde error.
#[derive(Debug, Deserialize)]
struct RawManifest {
    filename: String,
    sheets: Vec<RawSheet>,
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    name: String,
    columns: Vec<RawColumn>,
    #[serde(default)]
    rows: Vec<RowRecord>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    key: String,
    label: String,
    #[serde(default)]
    width: Option<u16>,
    kind: String,
}

/// Parse a manifest file into a validated ExportRequest
pub fn parse_request(path: &Path) -> ExportResult<ExportRequest> {
    let content = fs::read_to_string(path)?;
    parse_request_str(&content)
}

/// Parse manifest JSON into a validated ExportRequest
pub fn parse_request_str(content: &str) -> ExportResult<ExportRequest> {
    let raw: RawManifest = serde_json::from_str(content)?;

    if raw.filename.trim().is_empty() {
        return Err(ExportError::Validation(
            "manifest 'filename' must not be empty".to_string(),
        ));
    }

    let mut request = ExportRequest::new(&raw.filename);
    let mut names = HashSet::new();
    for sheet in raw.sheets {
        if !names.insert(sheet.name.clone()) {
            return Err(ExportError::DuplicateSheetName(sheet.name));
        }
        request.add_sheet(convert_sheet(sheet)?);
    }
    Ok(request)
}

fn convert_sheet(raw: RawSheet) -> ExportResult<SheetSpec> {
    let mut keys = HashSet::new();
    let mut columns = Vec::with_capacity(raw.columns.len());

    for column in raw.columns {
        if column.label.trim().is_empty() {
            return Err(ExportError::Validation(format!(
                "sheet '{}': column '{}' has an empty label",
                raw.name, column.key
            )));
        }
        if !keys.insert(column.key.clone()) {
            return Err(ExportError::Validation(format!(
                "sheet '{}': duplicate column key '{}'",
                raw.name, column.key
            )));
        }

        columns.push(ColumnDescriptor {
            key: column.key,
            label: column.label,
            width: column.width,
            kind: column.kind.parse()?,
        });
    }

    Ok(SheetSpec::new(&raw.name, columns, raw.rows))
}
