//! CSV export of a product batch.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::{ExportError, ProductRecord};

pub const HEADERS: [&str; 5] = ["Product Code", "Collection", "Type", "Description", "Finish"];

/// How row cells are quoted. The header row is always written bare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvStyle {
    /// Every cell wrapped in double quotes with no escaping. A description
    /// like `8" LAV FAUCET` yields a malformed cell; kept for byte-for-byte
    /// compatibility with exports made by the web front end.
    Verbatim,
    /// Every cell quoted, embedded quotes doubled (RFC 4180).
    #[default]
    Escaped,
}

impl CsvStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbatim => "verbatim",
            Self::Escaped => "escaped",
        }
    }
}

/// Render products as CSV: header, then one row per product in order.
///
/// Rows are joined by `\n` with no trailing newline.
pub fn to_csv(products: &[ProductRecord], style: CsvStyle) -> Result<String, ExportError> {
    let header = HEADERS.join(",");
    let rows = match style {
        CsvStyle::Verbatim => verbatim_rows(products),
        CsvStyle::Escaped => escaped_rows(products)?,
    };

    if rows.is_empty() {
        Ok(header)
    } else {
        Ok(format!("{header}\n{rows}"))
    }
}

fn verbatim_rows(products: &[ProductRecord]) -> String {
    products
        .iter()
        .map(|p| {
            p.cells()
                .iter()
                .map(|cell| format!("\"{cell}\""))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escaped_rows(products: &[ProductRecord]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        for p in products {
            writer.write_record(p.cells())?;
        }
        writer.flush()?;
    }
    let text = String::from_utf8_lossy(&buf);
    Ok(text.trim_end_matches('\n').to_string())
}

/// `products_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("products_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export file into `dir`.
///
/// Returns `Ok(None)` without touching the filesystem when there is nothing
/// to export. An existing export for the same date is overwritten.
pub fn write_csv(
    dir: &Path,
    products: &[ProductRecord],
    date: NaiveDate,
    style: CsvStyle,
) -> Result<Option<PathBuf>, ExportError> {
    if products.is_empty() {
        return Ok(None);
    }
    if !dir.is_dir() {
        return Err(ExportError::DirectoryNotFound(dir.to_path_buf()));
    }

    let path = dir.join(export_file_name(date));
    let csv = to_csv(products, style)?;
    std::fs::write(&path, csv)?;
    info!(path = %path.display(), rows = products.len(), style = style.as_str(), "exported products");
    Ok(Some(path))
}
