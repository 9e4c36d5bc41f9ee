//! Minimal CSV reading for the mock-server data files.
//!
//! Handles the subset the generator emits: a header row, double-quoted
//! fields with embedded commas/newlines, and `""` escapes. Anything
//! structurally off (unterminated quote, ragged row) is a `DataError::Csv`
//! with the record number.

use std::path::Path;

use crate::{read_bytes, DataError};

#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of a header column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub fn read_csv_file(path: &Path) -> Result<CsvTable, DataError> {
    let bytes = read_bytes(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|err| DataError::Csv(format!("{}: not valid utf-8: {}", path.display(), err)))?;
    parse_csv(&text).map_err(|err| DataError::Csv(format!("{}: {}", path.display(), err)))
}

pub fn parse_csv(input: &str) -> Result<CsvTable, String> {
    let records = parse_records(input)?;
    let mut records = records.into_iter();
    let Some(headers) = records.next() else {
        return Ok(CsvTable::default());
    };

    let mut rows = Vec::new();
    for (idx, record) in records.enumerate() {
        if record.len() != headers.len() {
            return Err(format!(
                "record {}: expected {} fields, found {}",
                idx + 2,
                headers.len(),
                record.len()
            ));
        }
        rows.push(record);
    }
    Ok(CsvTable { headers, rows })
}

fn parse_records(input: &str) -> Result<Vec<Vec<String>>, String> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // True once the current record has any content; blank trailing lines
    // produce no record.
    let mut field_started = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                field_started = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = true;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_record(&mut records, &mut record, &mut field, &mut field_started);
            }
            '\n' => {
                end_record(&mut records, &mut record, &mut field, &mut field_started);
            }
            _ => {
                field.push(ch);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(format!(
            "record {}: unterminated quoted field",
            records.len() + 1
        ));
    }
    end_record(&mut records, &mut record, &mut field, &mut field_started);
    Ok(records)
}

fn end_record(
    records: &mut Vec<Vec<String>>,
    record: &mut Vec<String>,
    field: &mut String,
    field_started: &mut bool,
) {
    if !*field_started && field.is_empty() && record.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
    *field_started = false;
}
