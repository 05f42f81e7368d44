use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitis_export::cli;
use vitis_export::error::ExportResult;

#[derive(Parser)]
#[command(name = "vitex")]
#[command(about = "Tabular export engine: JSON manifests to styled .xlsx or CSV.")]
#[command(long_about = "Vitex - Tabular export engine

Reads a JSON export manifest (column descriptors + row records, one or more
named sheets) and produces either a styled multi-sheet .xlsx workbook or a
delimited-text file, saved under a date-stamped filename.

COMMANDS:
  export    - Manifest to .xlsx workbook
  csv       - One manifest sheet to delimited text
  validate  - Check manifests without producing output

EXAMPLES:
  vitex export inventario.json                 # inventario_YYYY-MM-DD.xlsx
  vitex csv ventas.json --sheet Datos
  vitex validate inventario.json ventas.json")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export a manifest to a styled .xlsx workbook.

Each manifest sheet becomes one worksheet: a bold, filled, bordered header
row from the column labels, then one data row per row record in input order.
Cells are written per their column kind (currency and percentage as numbers
with number formats, dates reformatted DD/MM/YYYY, hyperlinks as clickable
'link' cells). Column widths are computed from content unless given.

The output filename is the manifest's base name plus today's date, unless
the base name already ends in an explicit start_to_end date range.

EXAMPLE:
  vitex export inventario.json --out-dir informes")]
    /// Export a manifest to a styled .xlsx workbook
    Export {
        /// Path to the JSON export manifest
        input: PathBuf,

        /// Directory to save the workbook into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Export one manifest sheet as delimited text.

Produces a comma-separated file with every field double-quoted and embedded
quotes escaped by doubling. Null handling matches the workbook path: numeric
kinds write 0, text kinds write an empty string. No styling is applied.

EXAMPLE:
  vitex csv ventas.json --sheet Datos")]
    /// Export one manifest sheet as delimited text (.csv)
    Csv {
        /// Path to the JSON export manifest
        input: PathBuf,

        /// Directory to save the file into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Sheet to export (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    #[command(long_about = "Validate export manifests without producing output.

Parses each manifest and checks the structural invariants: unique column
keys per sheet, non-empty labels, recognized column kinds. Reports every
file and fails if any manifest is invalid.

BATCH VALIDATION:
  vitex validate a.json b.json c.json")]
    /// Validate export manifests without producing output
    Validate {
        /// Path to manifest file(s) to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExportResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            out_dir,
            verbose,
        } => cli::export(input, out_dir, verbose),

        Commands::Csv {
            input,
            out_dir,
            sheet,
        } => cli::csv(input, out_dir, sheet),

        Commands::Validate { files } => cli::validate(files),
    }
}
