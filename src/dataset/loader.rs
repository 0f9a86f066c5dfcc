use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::Record;
use crate::config::InputConfig;
use crate::error::{NormalizerError, Result};

/// One CSV row before validation. Fields missing from a short row are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Line number in the source file, for error reporting.
    pub row: usize,
    pub label: Option<String>,
    pub text: Option<String>,
}

impl RawRow {
    /// Validates the row and applies the configured label remapping.
    ///
    /// An empty text field counts as missing, matching how tabular readers
    /// treat empty cells as null.
    pub fn into_record(self, input: &InputConfig) -> Result<Record> {
        let row = self.row;
        let text = match self.text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(NormalizerError::invalid_record(row, "missing text")),
        };
        let raw_label = self
            .label
            .ok_or_else(|| NormalizerError::invalid_record(row, "missing label"))?;
        let label = parse_label(&raw_label).ok_or_else(|| {
            NormalizerError::invalid_record(row, format!("label '{}' is not an integer", raw_label))
        })?;

        Ok(Record {
            label: input.remap_label(label),
            text,
        })
    }
}

fn parse_label(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

/// Decodes a CSV field as UTF-8, falling back to Latin-1 byte-per-char.
/// Sentiment140 exports are Latin-1, so invalid UTF-8 is expected there.
pub fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn load_rows(path: impl AsRef<Path>, input: &InputConfig) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        NormalizerError::Config(format!("Failed to open input '{}': {}", path.display(), e))
    })?;
    let rows = read_rows(file, input)?;
    info!(path = %path.display(), rows = rows.len(), "Loaded input rows");
    Ok(rows)
}

/// Reads label and text fields from CSV. Columns are located by name: from
/// the header row when `has_headers` is set, otherwise from `input.columns`.
pub fn read_rows<R: Read>(reader: R, input: &InputConfig) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(input.has_headers)
        .flexible(true)
        .from_reader(reader);

    let names: Vec<String> = if input.has_headers {
        reader.byte_headers()?.iter().map(decode_field).collect()
    } else {
        input.columns.clone()
    };
    let label_idx = column_index(&names, &input.label_column)?;
    let text_idx = column_index(&names, &input.text_column)?;
    debug!(label_idx, text_idx, "Resolved input columns");

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 1);
        rows.push(RawRow {
            row,
            label: record.get(label_idx).map(decode_field),
            text: record.get(text_idx).map(decode_field),
        });
    }
    Ok(rows)
}

fn column_index(names: &[String], column: &str) -> Result<usize> {
    names
        .iter()
        .position(|name| name.trim() == column)
        .ok_or_else(|| NormalizerError::MissingColumn(column.to_string()))
}
