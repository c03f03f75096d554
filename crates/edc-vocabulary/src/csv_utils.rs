//! Shared CSV helpers for vocabulary files.

use std::collections::BTreeMap;
use std::io::Read;

use csv::ReaderBuilder;

use crate::error::VocabularyError;

/// One CSV record keyed by header, with its 1-based line number.
pub(crate) struct CsvRow {
    pub line: usize,
    pub fields: BTreeMap<String, String>,
}

/// Read CSV records into header-keyed rows.
///
/// Strips a leading BOM from headers and trims whitespace from values.
pub(crate) fn read_csv_rows<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<CsvRow>, VocabularyError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|error| VocabularyError::csv(source_name, &error))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| VocabularyError::csv(source_name, &error))?;
        let line = record
            .position()
            .map_or(rows.len() + 2, |position| position.line() as usize);
        let mut fields = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_lowercase();
            fields.insert(key, value.trim().to_string());
        }
        rows.push(CsvRow { line, fields });
    }
    Ok(rows)
}

impl CsvRow {
    /// Field value, empty when absent.
    pub fn get_field(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    /// Field value, `None` when absent or empty.
    pub fn get_optional(&self, key: &str) -> Option<String> {
        self.fields.get(key).filter(|v| !v.is_empty()).cloned()
    }
}
