//! Tabular input handling.
//!
//! Loads the uploaded spreadsheet (CSV) into rows keyed by canonical
//! column names and checks the whole-table column precondition before any
//! batch work starts.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Columns every input table must carry, after header canonicalization.
pub const REQUIRED_COLUMNS: [&str; 7] = ["NOME", "CPF", "RUA", "BAIRRO", "CIDADE", "UF", "CURSO"];

/// Optional per-record institution column.
pub const IES_COLUMN: &str = "IES";

/// Errors while loading the input table.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open spreadsheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse spreadsheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Canonicalize a column name: strip a UTF-8 BOM, trim, upper-case.
///
/// Header casing and stray whitespace in uploaded tables must not cause
/// missing-field errors.
pub fn normalize_header(nome: &str) -> String {
    nome.trim_start_matches('\u{feff}').trim().to_uppercase()
}

/// An input table with canonical headers.
#[derive(Debug, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl Dataset {
    /// Read a CSV table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let row = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Read a CSV table from disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        Self::from_reader(File::open(path)?)
    }

    /// Required columns absent from this table, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }

    /// Whether the table carries a per-record IES column.
    pub fn has_ies_column(&self) -> bool {
        self.headers.iter().any(|h| h == IES_COLUMN)
    }
}
