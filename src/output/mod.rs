//! Output formatting module
//!
//! Handles different output formats: json, yaml, table, compact.
//!
//! Stream discipline: structured formats (json, yaml) write nothing but the
//! serialized payload to the primary sink, so piping into `jq` or a file
//! always yields a parseable document. Advisory text (resume cursor,
//! warnings) goes to the side sink. Human formats co-mingle everything on
//! the primary sink, except warnings which stay on the side sink.

mod batch;
mod compact;
mod json;
mod table;
mod yaml;

use std::io::Write;

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::pds::records::{ContinuationInfo, ListedRecord};

pub use self::batch::render_batch_report;
pub use self::compact::CompactFormatter;
pub use self::json::JsonFormatter;
pub use self::table::TableFormatter;
pub use self::yaml::YamlFormatter;

/// Trait for output formatters
pub trait Formatter {
    /// Format and write a listing's records
    fn format_records(&self, records: &[RecordView], out: &mut dyn Write) -> Result<()>;

    /// Format and write a single record
    fn format_record(&self, record: &RecordView, out: &mut dyn Write) -> Result<()>;
}

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Compact => Box::new(CompactFormatter),
    }
}

/// Flattened record data for output
///
/// `value` is `None` when the server returned a non-object record value;
/// human formats show a placeholder row for those, structured formats omit
/// them and warn on the side sink.
#[derive(Debug, Clone)]
pub struct RecordView {
    pub rkey: String,
    pub uri: String,
    pub cid: Option<String>,
    pub value: Option<Value>,
}

impl RecordView {
    pub fn new(record: &ListedRecord) -> Self {
        let value = match &record.value {
            Value::Object(_) => Some(sanitize_value(&record.value)),
            _ => None,
        };
        Self {
            rkey: record.rkey().to_string(),
            uri: record.uri.clone(),
            cid: record.cid.clone(),
            value,
        }
    }

    /// The record value with the `$type` marker removed, for human views
    pub fn display_value(&self) -> Option<Value> {
        self.value.as_ref().map(|v| {
            let mut v = v.clone();
            if let Value::Object(map) = &mut v {
                map.remove("$type");
            }
            v
        })
    }

    /// Field the record carries under `name`, rendered as a short string
    pub fn field_str(&self, name: &str) -> Option<String> {
        let value = self.value.as_ref()?.get(name)?;
        Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Recursively strip serializer-internal `py_type` keys leaked by some
/// record-writing SDKs. Applies at every nesting level.
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| k.as_str() != "py_type")
                .map(|(k, v)| (k.clone(), sanitize_value(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        other => other.clone(),
    }
}

/// Serializable shape of a listing for the structured formats
pub(crate) fn records_payload(records: &[RecordView]) -> Value {
    Value::Array(records.iter().filter_map(record_payload).collect())
}

pub(crate) fn record_payload(record: &RecordView) -> Option<Value> {
    let value = record.value.clone()?;
    let mut obj = serde_json::Map::new();
    obj.insert("uri".to_string(), Value::String(record.uri.clone()));
    if let Some(cid) = &record.cid {
        obj.insert("cid".to_string(), Value::String(cid.clone()));
    }
    obj.insert("value".to_string(), value);
    Some(Value::Object(obj))
}

/// Render a collection listing with its continuation state.
///
/// `primary` is the data stream (stdout), `side` the advisory stream
/// (stderr).
pub fn render_listing(
    format: OutputFormat,
    collection: &str,
    records: &[ListedRecord],
    continuation: &ContinuationInfo,
    primary: &mut dyn Write,
    side: &mut dyn Write,
) -> Result<()> {
    let views: Vec<RecordView> = records.iter().map(RecordView::new).collect();

    for view in views.iter().filter(|v| v.value.is_none()) {
        writeln!(side, "warning: skipping non-object record value at {}", view.uri)?;
    }

    let formatter = formatter_for(format);
    if format.is_structured() {
        let valid: Vec<RecordView> = views.iter().filter(|v| v.value.is_some()).cloned().collect();
        formatter.format_records(&valid, primary)?;
        if let Some(cursor) = &continuation.next_cursor {
            writeln!(side, "next page cursor: {}", cursor)?;
        }
    } else {
        if views.is_empty() {
            writeln!(primary, "no records in {}", collection)?;
        } else {
            formatter.format_records(&views, primary)?;
        }
        if let Some(cursor) = &continuation.next_cursor {
            writeln!(primary, "next page cursor: {}", cursor)?;
        }
    }
    Ok(())
}

/// Render a single fetched record
pub fn render_record(
    format: OutputFormat,
    record: &ListedRecord,
    primary: &mut dyn Write,
    side: &mut dyn Write,
) -> Result<()> {
    let view = RecordView::new(record);
    if view.value.is_none() {
        if format.is_structured() {
            writeln!(side, "warning: skipping non-object record value at {}", view.uri)?;
            return Ok(());
        }
        writeln!(primary, "{}: <invalid record>", view.rkey)?;
        return Ok(());
    }
    formatter_for(format).format_record(&view, primary)
}
