//! Word list import for the admin forms (Excel and CSV)

use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;

use crate::admin::WordInput;
use crate::error::{Error, Result};

/// Column index mapping
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ColumnMapping {
    word: usize,
    synonyms: usize,
}

/// Detect the word and synonym columns from header names
fn detect_columns(headers: &[String]) -> Result<ColumnMapping> {
    let mut word = None;
    let mut synonyms = None;

    for (i, header) in headers.iter().enumerate() {
        match header.trim().to_lowercase().as_str() {
            "word" | "words" | "vocabulary" => word = word.or(Some(i)),
            "synonym" | "synonyms" => synonyms = synonyms.or(Some(i)),
            _ => {}
        }
    }

    let word = word.ok_or_else(|| Error::Import("Missing required 'Word' column in file header".to_string()))?;
    let synonyms = synonyms
        .ok_or_else(|| Error::Import("Missing required 'Synonyms' column in file header".to_string()))?;
    Ok(ColumnMapping { word, synonyms })
}

/// Parse a word list, picking the format from the extension
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<WordInput>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "xlsx" | "xls" => parse_excel(path)?,
        "csv" => parse_csv(path)?,
        _ => return Err(Error::Import(format!("Unsupported file format: .{}", extension))),
    };
    info!("Imported {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).map(|s| s.trim().to_string()).unwrap_or_default()
}

fn rows_to_inputs(mapping: &ColumnMapping, rows: impl Iterator<Item = Vec<String>>) -> Vec<WordInput> {
    rows.map(|row| WordInput::new(cell(&row, mapping.word), cell(&row, mapping.synonyms)))
        .filter(|input| !input.word.is_empty())
        .collect()
}

pub fn parse_csv(path: impl AsRef<Path>) -> Result<Vec<WordInput>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_ref())?;

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let mapping = detect_columns(&headers)?;

    let records = reader
        .records()
        .map(|r| r.map(|record| record.iter().map(str::to_string).collect::<Vec<_>>()))
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    Ok(rows_to_inputs(&mapping, records.into_iter()))
}

pub fn parse_excel(path: impl AsRef<Path>) -> Result<Vec<WordInput>> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())
        .map_err(|e| Error::Import(format!("Failed to open Excel file: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Import("No sheets found in Excel file".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Import(format!("Failed to read sheet: {}", e)))?;

    let mut rows = range.rows().map(|row| row.iter().map(cell_string).collect::<Vec<_>>());
    let headers = rows
        .next()
        .ok_or_else(|| Error::Import("Empty file - no header row".to_string()))?;
    let mapping = detect_columns(&headers)?;

    Ok(rows_to_inputs(&mapping, rows))
}

fn cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}
