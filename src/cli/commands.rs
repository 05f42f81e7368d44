use crate::error::{ExportError, ExportResult};
use crate::export::{delimited, download, filename, WorkbookExporter};
use crate::parser;
use chrono::Local;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the export command: manifest → date-stamped .xlsx
pub fn export(input: PathBuf, out_dir: PathBuf, verbose: bool) -> ExportResult<()> {
    println!("{}", "📦 Vitex - Exporting workbook".bold().green());
    println!("   Manifest: {}", input.display());
    println!();

    if verbose {
        println!("{}", "📖 Parsing export manifest...".cyan());
    }

    let request = parser::parse_request(&input)?;

    if verbose {
        for sheet in &request.sheets {
            println!(
                "   📊 Sheet: {} ({} columns, {} rows)",
                sheet.name.bright_blue().bold(),
                sheet.columns.len(),
                sheet.rows.len()
            );
        }
        println!();
    }

    let name = filename::stamped(&request.suggested_filename, "xlsx", Local::now().date_naive());
    let buffer = WorkbookExporter::new(request).build()?;
    let path = download::save(&buffer, &out_dir, &name)?;

    println!(
        "{} {} ({} bytes)",
        "✅ Saved".bold().green(),
        path.display(),
        buffer.len()
    );
    Ok(())
}

/// Execute the csv command: one sheet of a manifest → delimited text
pub fn csv(input: PathBuf, out_dir: PathBuf, sheet_name: Option<String>) -> ExportResult<()> {
    println!("{}", "📄 Vitex - Exporting delimited text".bold().green());
    println!("   Manifest: {}", input.display());
    println!();

    let request = parser::parse_request(&input)?;

    let sheet = match &sheet_name {
        Some(name) => request
            .sheets
            .iter()
            .find(|s| &s.name == name)
            .ok_or_else(|| {
                ExportError::Validation(format!("manifest has no sheet named '{name}'"))
            })?,
        None => request.sheets.first().ok_or_else(|| {
            ExportError::Validation("export request has no sheets".to_string())
        })?,
    };

    let text = delimited::build_delimited_text(&sheet.columns, &sheet.rows);
    let name = filename::stamped(&request.suggested_filename, "csv", Local::now().date_naive());
    let path = download::save(text.as_bytes(), &out_dir, &name)?;

    println!("{} {}", "✅ Saved".bold().green(), path.display());
    Ok(())
}

/// Execute the validate command: parse manifests and check invariants
/// without producing any output file
pub fn validate(files: Vec<PathBuf>) -> ExportResult<()> {
    println!("{}", "🔍 Vitex - Validating manifests".bold().green());
    println!();

    let total = files.len();
    let mut failed = 0;

    for file in files {
        match parser::parse_request(&file) {
            Ok(request) => {
                let rows: usize = request.sheets.iter().map(|s| s.rows.len()).sum();
                println!(
                    "   {} {} ({} sheets, {} rows)",
                    "✅".green(),
                    file.display(),
                    request.sheets.len(),
                    rows
                );
            }
            Err(e) => {
                failed += 1;
                println!("   {} {}: {}", "❌".red(), file.display(), e);
            }
        }
    }

    println!();
    if failed > 0 {
        Err(ExportError::Validation(format!(
            "{failed} of {total} manifests failed validation"
        )))
    } else {
        println!("{}", "✅ All manifests valid".bold().green());
        Ok(())
    }
}
