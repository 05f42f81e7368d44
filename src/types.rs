use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

//==============================================================================
// Column descriptors
//==============================================================================

/// Semantic cell type of one column, governing formatting and cell type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Integer,
    Currency,
    Percentage,
    Date,
    Hyperlink,
}

impl ColumnKind {
    /// Numeric kinds store an explicit 0 for null values
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnKind::Integer | ColumnKind::Currency | ColumnKind::Percentage
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::Currency => "currency",
            ColumnKind::Percentage => "percentage",
            ColumnKind::Date => "date",
            ColumnKind::Hyperlink => "hyperlink",
        }
    }
}

impl FromStr for ColumnKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ColumnKind::Text),
            "integer" => Ok(ColumnKind::Integer),
            "currency" => Ok(ColumnKind::Currency),
            "percentage" => Ok(ColumnKind::Percentage),
            "date" => Ok(ColumnKind::Date),
            "hyperlink" => Ok(ColumnKind::Hyperlink),
            other => Err(ExportError::UnknownColumnKind(other.to_string())),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing how to label, size, and type-format one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field to read from each row record
    pub key: String,
    /// Header text
    pub label: String,
    /// Explicit character width; computed from content when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub fn new(key: &str, label: &str, kind: ColumnKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            width: None,
            kind,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

//==============================================================================
// Cell values and rows
//==============================================================================

/// A single scalar field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
    /// Hyperlink pair: human label + target URL
    Link {
        display: String,
        target: String,
    },
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One logical row: a mapping from column key to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord {
    pub fields: HashMap<String, CellValue>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing keys read as null, never as an error
    pub fn get(&self, key: &str) -> &CellValue {
        self.fields.get(key).unwrap_or(&NULL_CELL)
    }

    pub fn set(&mut self, key: &str, value: CellValue) {
        self.fields.insert(key.to_string(), value);
    }
}

impl<K: Into<String>, const N: usize> From<[(K, CellValue); N]> for RowRecord {
    fn from(entries: [(K, CellValue); N]) -> Self {
        Self {
            fields: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

//==============================================================================
// Sheets and export requests
//==============================================================================

/// One named sheet: ordered columns + rows in caller-established order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub rows: Vec<RowRecord>,
}

impl SheetSpec {
    pub fn new(name: &str, columns: Vec<ColumnDescriptor>, rows: Vec<RowRecord>) -> Self {
        Self {
            name: name.to_string(),
            columns,
            rows,
        }
    }
}

/// A full export action: one or more sheets plus a suggested base filename
/// (no extension, no date suffix). Constructed fresh per export, consumed
/// synchronously, discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "filename")]
    pub suggested_filename: String,
    pub sheets: Vec<SheetSpec>,
}

impl ExportRequest {
    pub fn new(suggested_filename: &str) -> Self {
        Self {
            suggested_filename: suggested_filename.to_string(),
            sheets: Vec::new(),
        }
    }

    pub fn add_sheet(&mut self, sheet: SheetSpec) {
        self.sheets.push(sheet);
    }

    pub fn single_sheet(
        suggested_filename: &str,
        sheet_name: &str,
        columns: Vec<ColumnDescriptor>,
        rows: Vec<RowRecord>,
    ) -> Self {
        Self {
            suggested_filename: suggested_filename.to_string(),
            sheets: vec![SheetSpec::new(sheet_name, columns, rows)],
        }
    }
}
