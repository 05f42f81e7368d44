//! Workbook assembly: ExportRequest → styled multi-sheet .xlsx bytes

use crate::error::{ExportError, ExportResult};
use crate::types::{CellValue, ColumnDescriptor, ColumnKind, ExportRequest, RowRecord, SheetSpec};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Url, Workbook, Worksheet};
use std::collections::HashSet;

/// Columns never shrink below this width
const MIN_WIDTH: u16 = 10;
/// Content-derived widths never grow past this
const MAX_WIDTH: u16 = 50;
/// Breathing room added to the longest rendered text
const WIDTH_PADDING: usize = 2;

const HEADER_FILL: u32 = 0x4472C4;
const HEADER_FONT: u32 = 0xFFFFFF;

/// Reusable cell formats, created once per build
struct SheetFormats {
    header: Format,
    text: Format,
    integer: Format,
    currency: Format,
    percentage: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(HEADER_FILL)
            .set_font_color(HEADER_FONT)
            .set_border(FormatBorder::Thin);

        let text = Format::new()
            .set_align(FormatAlign::Center)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let integer = text.clone().set_num_format("#,##0");
        let currency = text.clone().set_num_format("#,##0.00");
        let percentage = text.clone().set_num_format("0.00\"%\"");

        Self {
            header,
            text,
            integer,
            currency,
            percentage,
        }
    }

    fn body(&self, kind: ColumnKind) -> &Format {
        match kind {
            ColumnKind::Integer => &self.integer,
            ColumnKind::Currency => &self.currency,
            ColumnKind::Percentage => &self.percentage,
            _ => &self.text,
        }
    }
}

/// Deterministic, pure transformation from an ExportRequest to workbook
/// bytes. Holds no state across calls; one exporter per request.
pub struct WorkbookExporter {
    request: ExportRequest,
}

impl WorkbookExporter {
    pub fn new(request: ExportRequest) -> Self {
        Self { request }
    }

    /// Build the workbook and serialize it to an in-memory buffer.
    ///
    /// Sheet order and row order follow the request exactly; the caller has
    /// already established any chronological or rank ordering and the engine
    /// never re-sorts.
    pub fn build(&self) -> ExportResult<Vec<u8>> {
        self.validate()?;

        let mut workbook = Workbook::new();
        let formats = SheetFormats::new();

        for sheet in &self.request.sheets {
            self.build_sheet(&mut workbook, sheet, &formats)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ExportError::Serialization(format!("failed to serialize workbook: {e}")))
    }

    /// Caller-error checks, all performed before any serialization work
    fn validate(&self) -> ExportResult<()> {
        if self.request.sheets.is_empty() {
            return Err(ExportError::Validation(
                "export request has no sheets".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for sheet in &self.request.sheets {
            if !seen.insert(sheet.name.as_str()) {
                return Err(ExportError::DuplicateSheetName(sheet.name.clone()));
            }
            if sheet.columns.is_empty() {
                return Err(ExportError::Validation(format!(
                    "sheet '{}' has no columns",
                    sheet.name
                )));
            }
        }

        Ok(())
    }

    fn build_sheet(
        &self,
        workbook: &mut Workbook,
        sheet: &SheetSpec,
        formats: &SheetFormats,
    ) -> ExportResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| ExportError::Serialization(format!("failed to set sheet name: {e}")))?;

        // Header row (row 0)
        for (col_idx, column) in sheet.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, &column.label, &formats.header)
                .map_err(|e| ExportError::Serialization(format!("failed to write header: {e}")))?;
        }

        // Data rows, in input order
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, column) in sheet.columns.iter().enumerate() {
                self.write_cell(
                    worksheet,
                    (row_idx + 1) as u32,
                    col_idx as u16,
                    row.get(&column.key),
                    column,
                    formats,
                )?;
            }
        }

        // Column widths from rendered content
        for (col_idx, column) in sheet.columns.iter().enumerate() {
            worksheet
                .set_column_width(col_idx as u16, column_width(column, &sheet.rows))
                .map_err(|e| {
                    ExportError::Serialization(format!("failed to set column width: {e}"))
                })?;
        }

        Ok(())
    }

    /// Write a single cell per its column kind
    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        column: &ColumnDescriptor,
        formats: &SheetFormats,
    ) -> ExportResult<()> {
        let body = formats.body(column.kind);

        match column.kind {
            ColumnKind::Text => {
                let text = value.as_str().unwrap_or_default();
                worksheet
                    .write_string_with_format(row, col, text, body)
                    .map_err(|e| ExportError::Serialization(format!("failed to write text: {e}")))?;
            }
            ColumnKind::Integer | ColumnKind::Currency | ColumnKind::Percentage => {
                // Null becomes an explicit 0, preserving column numeric-ness
                let number = value.as_f64().unwrap_or(0.0);
                worksheet
                    .write_number_with_format(row, col, number, body)
                    .map_err(|e| {
                        ExportError::Serialization(format!("failed to write number: {e}"))
                    })?;
            }
            ColumnKind::Date => {
                let text = match value {
                    CellValue::Text(raw) => display_date(raw),
                    CellValue::Number(n) => n.to_string(),
                    _ => String::new(),
                };
                worksheet
                    .write_string_with_format(row, col, &text, body)
                    .map_err(|e| ExportError::Serialization(format!("failed to write date: {e}")))?;
            }
            ColumnKind::Hyperlink => {
                let target = match value {
                    CellValue::Link { target, .. } => Some(target.as_str()),
                    CellValue::Text(s) => Some(s.as_str()),
                    _ => None,
                };
                match target {
                    Some(target) => {
                        // Visible text is always the literal "link"; the raw
                        // URL only travels as the click target + tooltip
                        let url = Url::new(target)
                            .set_text("link")
                            .set_tip(&format!("Abrir {}", column.label));
                        worksheet
                            .write_url_with_format(row, col, &url, body)
                            .map_err(|e| {
                                ExportError::Serialization(format!("failed to write link: {e}"))
                            })?;
                    }
                    None => {
                        worksheet
                            .write_string_with_format(row, col, "", body)
                            .map_err(|e| {
                                ExportError::Serialization(format!("failed to write cell: {e}"))
                            })?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Text a cell will show once written, used for width computation and the
/// delimited-text path
pub(crate) fn rendered_text(value: &CellValue, kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Text => value.as_str().unwrap_or_default().to_string(),
        ColumnKind::Integer => format!("{}", value.as_f64().unwrap_or(0.0).trunc() as i64),
        ColumnKind::Currency => format!("{:.2}", value.as_f64().unwrap_or(0.0)),
        ColumnKind::Percentage => format!("{:.2}%", value.as_f64().unwrap_or(0.0)),
        ColumnKind::Date => match value {
            CellValue::Text(raw) => display_date(raw),
            CellValue::Number(n) => n.to_string(),
            _ => String::new(),
        },
        ColumnKind::Hyperlink => match value {
            CellValue::Null => String::new(),
            _ => "link".to_string(),
        },
    }
}

/// Reformat an ISO `YYYY-MM-DD` date for display as `DD/MM/YYYY`.
/// Strings that do not parse as a calendar date pass through unmodified.
pub(crate) fn display_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Width for one column: floor at the explicit width (or 10), content capped
/// at 50 plus padding, header label included in the content scan
pub(crate) fn column_width(column: &ColumnDescriptor, rows: &[RowRecord]) -> u16 {
    let floor = column.width.unwrap_or(MIN_WIDTH);

    let mut longest = column.label.chars().count();
    for row in rows {
        let len = rendered_text(row.get(&column.key), column.kind)
            .chars()
            .count();
        longest = longest.max(len);
    }

    let content = (longest + WIDTH_PADDING).min(MAX_WIDTH as usize) as u16;
    floor.max(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SheetSpec;

    fn text_col(key: &str, label: &str) -> ColumnDescriptor {
        ColumnDescriptor::new(key, label, ColumnKind::Text)
    }

    #[test]
    fn test_display_date_iso() {
        assert_eq!(display_date("2024-03-07"), "07/03/2024");
    }

    #[test]
    fn test_display_date_malformed_passthrough() {
        assert_eq!(display_date("ayer"), "ayer");
        assert_eq!(display_date("2024-13-40"), "2024-13-40");
    }

    #[test]
    fn test_rendered_text_null_handling() {
        assert_eq!(rendered_text(&CellValue::Null, ColumnKind::Text), "");
        assert_eq!(rendered_text(&CellValue::Null, ColumnKind::Currency), "0.00");
        assert_eq!(rendered_text(&CellValue::Null, ColumnKind::Integer), "0");
        assert_eq!(rendered_text(&CellValue::Null, ColumnKind::Hyperlink), "");
    }

    #[test]
    fn test_rendered_text_hyperlink_never_leaks_url() {
        let link = CellValue::Link {
            display: "ver".to_string(),
            target: "https://tienda.example.com/p/99".to_string(),
        };
        assert_eq!(rendered_text(&link, ColumnKind::Hyperlink), "link");
    }

    #[test]
    fn test_column_width_clamp() {
        let column = text_col("nombre", "Nombre");
        let rows = vec![
            RowRecord::from([("nombre", CellValue::from("Auriculares"))]),
            RowRecord::from([("nombre", CellValue::from("Mouse"))]),
        ];
        // "Auriculares" is 11 chars → 11 + 2 = 13
        assert_eq!(column_width(&column, &rows), 13);
    }

    #[test]
    fn test_column_width_floor() {
        let column = text_col("a", "A");
        assert_eq!(column_width(&column, &[]), 10);
    }

    #[test]
    fn test_column_width_cap() {
        let column = text_col("d", "Descripción");
        let rows = vec![RowRecord::from([("d", CellValue::from("x".repeat(200).as_str()))])];
        assert_eq!(column_width(&column, &rows), 50);
    }

    #[test]
    fn test_column_width_explicit_floor_wins() {
        let column = text_col("a", "A").with_width(18);
        let rows = vec![RowRecord::from([("a", CellValue::from("corto"))])];
        assert_eq!(column_width(&column, &rows), 18);
    }

    #[test]
    fn test_build_rejects_empty_request() {
        let request = ExportRequest::new("vacio");
        let result = WorkbookExporter::new(request).build();
        assert!(matches!(result, Err(ExportError::Validation(_))));
    }

    #[test]
    fn test_build_rejects_sheet_without_columns() {
        let mut request = ExportRequest::new("vacio");
        request.add_sheet(SheetSpec::new("Datos", vec![], vec![]));
        let result = WorkbookExporter::new(request).build();
        assert!(matches!(result, Err(ExportError::Validation(_))));
    }

    #[test]
    fn test_build_rejects_duplicate_sheet_names() {
        let mut request = ExportRequest::new("doble");
        request.add_sheet(SheetSpec::new("Datos", vec![text_col("a", "A")], vec![]));
        request.add_sheet(SheetSpec::new("Datos", vec![text_col("b", "B")], vec![]));
        let result = WorkbookExporter::new(request).build();
        match result {
            Err(ExportError::DuplicateSheetName(name)) => assert_eq!(name, "Datos"),
            other => panic!("expected DuplicateSheetName, got {other:?}"),
        }
    }

    #[test]
    fn test_build_header_only_sheet() {
        let request = ExportRequest::single_sheet(
            "inventario",
            "Datos",
            vec![text_col("nombre", "Producto")],
            vec![],
        );
        let buffer = WorkbookExporter::new(request).build().unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_build_mixed_kinds() {
        let request = ExportRequest::single_sheet(
            "ventas",
            "Datos",
            vec![
                text_col("nombre", "Producto"),
                ColumnDescriptor::new("precio", "Precio", ColumnKind::Currency),
                ColumnDescriptor::new("fecha", "Fecha", ColumnKind::Date),
                ColumnDescriptor::new("ficha", "Ficha", ColumnKind::Hyperlink),
            ],
            vec![
                RowRecord::from([
                    ("nombre", CellValue::from("Mouse")),
                    ("precio", CellValue::Number(25.5)),
                    ("fecha", CellValue::from("2026-03-07")),
                    (
                        "ficha",
                        CellValue::Link {
                            display: "ver".to_string(),
                            target: "https://tienda.example.com/p/1".to_string(),
                        },
                    ),
                ]),
                RowRecord::from([("nombre", CellValue::Null), ("precio", CellValue::Null)]),
            ],
        );

        let buffer = WorkbookExporter::new(request).build().unwrap();
        assert!(!buffer.is_empty());
    }
}
