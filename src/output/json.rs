//! JSON output formatter

use std::io::Write;

use super::{record_payload, records_payload, Formatter, RecordView};
use crate::error::{PdsError, Result};

/// Formatter for JSON output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_records(&self, records: &[RecordView], out: &mut dyn Write) -> Result<()> {
        let payload = records_payload(records);
        let json = serde_json::to_string_pretty(&payload)?;
        writeln!(out, "{}", json)?;
        Ok(())
    }

    fn format_record(&self, record: &RecordView, out: &mut dyn Write) -> Result<()> {
        let payload = record_payload(record).ok_or_else(|| {
            PdsError::Json(format!("record at {} has a non-object value", record.uri))
        })?;
        let json = serde_json::to_string_pretty(&payload)?;
        writeln!(out, "{}", json)?;
        Ok(())
    }
}
