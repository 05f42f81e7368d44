//! Delimited-text assembly: the unstyled CSV exit path
//!
//! Every field is double-quoted. Embedded quotes are escaped by doubling
//! them; the legacy exports skipped that step and a product name containing
//! a quote or comma corrupted the output, so this path does it correctly.

use crate::export::workbook::rendered_text;
use crate::types::{CellValue, ColumnDescriptor, ColumnKind, RowRecord};

/// Build a comma-separated text blob: header line from labels, then one
/// line per row. Null handling matches the workbook path (numeric null → 0,
/// text null → empty string). Lines end with `\n`.
pub fn build_delimited_text(columns: &[ColumnDescriptor], rows: &[RowRecord]) -> String {
    let mut out = String::new();

    let header: Vec<String> = columns.iter().map(|c| quote(&c.label)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|column| quote(&field_text(row.get(&column.key), column.kind)))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Plain text for one field. Hyperlink fields carry the target URL here:
/// a text file has no link metadata to hide it in.
fn field_text(value: &CellValue, kind: ColumnKind) -> String {
    match (kind, value) {
        (ColumnKind::Hyperlink, CellValue::Link { target, .. }) => target.clone(),
        _ => rendered_text(value, kind),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnDescriptor;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("nombre", "Producto", ColumnKind::Text),
            ColumnDescriptor::new("precio", "Precio", ColumnKind::Currency),
        ]
    }

    #[test]
    fn test_header_only() {
        let text = build_delimited_text(&columns(), &[]);
        assert_eq!(text, "\"Producto\",\"Precio\"\n");
    }

    #[test]
    fn test_null_handling() {
        let rows = vec![RowRecord::from([
            ("nombre", CellValue::Null),
            ("precio", CellValue::Null),
        ])];
        let text = build_delimited_text(&columns(), &rows);
        assert_eq!(text, "\"Producto\",\"Precio\"\n\"\",\"0.00\"\n");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let rows = vec![RowRecord::from([
            ("nombre", CellValue::from("Cable \"premium\", 2m")),
            ("precio", CellValue::Number(12.0)),
        ])];
        let text = build_delimited_text(&columns(), &rows);
        assert_eq!(
            text.lines().nth(1).unwrap(),
            "\"Cable \"\"premium\"\", 2m\",\"12.00\""
        );
    }

    #[test]
    fn test_hyperlink_field_carries_target() {
        let columns = vec![ColumnDescriptor::new("url", "Ficha", ColumnKind::Hyperlink)];
        let rows = vec![RowRecord::from([(
            "url",
            CellValue::Link {
                display: "ver".to_string(),
                target: "https://tienda.example.com/p/7".to_string(),
            },
        )])];
        let text = build_delimited_text(&columns, &rows);
        assert_eq!(
            text,
            "\"Ficha\"\n\"https://tienda.example.com/p/7\"\n"
        );
    }

    #[test]
    fn test_row_order_preserved() {
        let columns = vec![ColumnDescriptor::new("n", "N", ColumnKind::Integer)];
        let rows: Vec<RowRecord> = [3.0, 1.0, 2.0]
            .iter()
            .map(|n| RowRecord::from([("n", CellValue::Number(*n))]))
            .collect();
        let text = build_delimited_text(&columns, &rows);
        assert_eq!(text, "\"N\"\n\"3\"\n\"1\"\n\"2\"\n");
    }
}
