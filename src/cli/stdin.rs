//! Batch input readers for piped stdin

use std::io::{BufRead, IsTerminal};

use serde_json::{Map, Value};

use crate::error::{PdsError, Result};

/// Read record URIs from stdin, one per line. Empty when stdin is a TTY.
pub fn read_uris_from_stdin() -> Result<Vec<String>> {
    if std::io::stdin().is_terminal() {
        return Ok(Vec::new());
    }
    read_uris(std::io::stdin().lock())
}

/// Read JSONL records from stdin, one JSON object per line.
pub fn read_records_from_stdin() -> Result<Vec<Map<String, Value>>> {
    if std::io::stdin().is_terminal() {
        return Ok(Vec::new());
    }
    read_records(std::io::stdin().lock())
}

/// Read JSONL updates from stdin; each object carries a "uri" field plus
/// the fields to merge.
pub fn read_updates_from_stdin() -> Result<Vec<(String, Map<String, Value>)>> {
    if std::io::stdin().is_terminal() {
        return Ok(Vec::new());
    }
    read_updates(std::io::stdin().lock())
}

fn read_uris<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut uris = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            uris.push(trimmed.to_string());
        }
    }
    Ok(uris)
}

fn read_records<R: BufRead>(reader: R) -> Result<Vec<Map<String, Value>>> {
    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(record)) => records.push(record),
            Ok(other) => {
                return Err(PdsError::InvalidArgument(format!(
                    "line {}: expected JSON object, got {}",
                    line_num + 1,
                    json_type_name(&other)
                )))
            }
            Err(e) => {
                return Err(PdsError::InvalidArgument(format!(
                    "line {}: invalid JSON - {}",
                    line_num + 1,
                    e
                )))
            }
        }
    }
    Ok(records)
}

fn read_updates<R: BufRead>(reader: R) -> Result<Vec<(String, Map<String, Value>)>> {
    let records = read_records(reader)?;
    let mut updates = Vec::with_capacity(records.len());

    for (idx, mut record) in records.into_iter().enumerate() {
        let uri = match record.remove("uri") {
            Some(Value::String(uri)) => uri,
            _ => {
                return Err(PdsError::InvalidArgument(format!(
                    "object {}: missing string \"uri\" field",
                    idx + 1
                )))
            }
        };
        updates.push((uri, record));
    }

    Ok(updates)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
