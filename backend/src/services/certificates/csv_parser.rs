//! Parses the published certificate sheet (CSV export) into `Certificate` records.
//!
//! The first line is the header row. Required columns are looked up once,
//! case-insensitively, and every following line becomes a fixed-shape record.
//! Lines are scanned character by character so quoted fields may contain
//! commas, and `""` inside quotes stands for a literal quote.

use common::model::certificate::Certificate;
use thiserror::Error;

pub const ID_COLUMN: &str = "ID";
pub const NAME_COLUMN: &str = "Name";
pub const EMAIL_COLUMN: &str = "Email";
/// Spelled exactly as published in the upstream sheet.
pub const DOWNLOAD_COLUMN: &str = "Downlod Link";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("Invalid CSV format: insufficient data")]
    InsufficientData,
    #[error("Required column \"{0}\" not found in CSV")]
    MissingColumn(&'static str),
}

/// Positions of the required columns, resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndices {
    id: usize,
    name: usize,
    email: usize,
    download_url: usize,
}

impl ColumnIndices {
    fn resolve(headers: &[String]) -> Result<Self, CsvError> {
        let index_of = |column: &'static str| {
            let wanted = column.to_lowercase();
            headers
                .iter()
                .position(|header| header.trim().to_lowercase() == wanted)
                .ok_or(CsvError::MissingColumn(column))
        };

        Ok(Self {
            id: index_of(ID_COLUMN)?,
            name: index_of(NAME_COLUMN)?,
            email: index_of(EMAIL_COLUMN)?,
            download_url: index_of(DOWNLOAD_COLUMN)?,
        })
    }

    /// Builds a record from an already split row. Rows without an identifier
    /// are separator rows and yield `None`.
    fn certificate(&self, fields: &[String]) -> Option<Certificate> {
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or_default();

        let id = field(self.id);
        if id.is_empty() {
            return None;
        }

        Some(Certificate {
            id: id.to_string(),
            name: field(self.name).to_string(),
            email: field(self.email).to_string(),
            download_url: field(self.download_url).to_string(),
        })
    }
}

/// Parses the whole CSV export.
///
/// Fails if there is no data row after the header, or if any required column
/// is absent. Blank rows are skipped.
pub fn parse_certificates(csv_text: &str) -> Result<Vec<Certificate>, CsvError> {
    let mut lines = csv_text.trim().lines();

    let header_line = lines.next().ok_or(CsvError::InsufficientData)?;
    let mut rows = lines.peekable();
    if rows.peek().is_none() {
        return Err(CsvError::InsufficientData);
    }

    let columns = ColumnIndices::resolve(&split_line(header_line))?;

    Ok(rows
        .filter_map(|line| columns.certificate(&split_line(line)))
        .collect())
}

/// Splits a single CSV line into trimmed fields.
///
/// A quote toggles quoted mode unless it is doubled inside a quoted field, in
/// which case the pair is kept as one literal quote. Commas only separate
/// fields outside quotes.
pub(crate) fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
