//! Table output formatter

use std::io::Write;

use comfy_table::{presets::NOTHING, Table};
use serde_json::Value;

use super::{Formatter, RecordView};
use crate::error::Result;

/// Formatter for ASCII table output
pub struct TableFormatter;

fn cell_for(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Formatter for TableFormatter {
    fn format_records(&self, records: &[RecordView], out: &mut dyn Write) -> Result<()> {
        let mut table = Table::new();
        table
            .load_preset(NOTHING)
            .set_header(vec!["Rkey", "Created At", "URI"]);

        for record in records {
            let created_at = match record.value {
                Some(_) => record.field_str("createdAt").unwrap_or_default(),
                None => "<invalid record>".to_string(),
            };
            table.add_row(vec![record.rkey.as_str(), created_at.as_str(), record.uri.as_str()]);
        }

        writeln!(out, "{}", table)?;
        Ok(())
    }

    fn format_record(&self, record: &RecordView, out: &mut dyn Write) -> Result<()> {
        let mut table = Table::new();
        table.load_preset(NOTHING).set_header(vec!["Field", "Value"]);

        table.add_row(vec!["uri", record.uri.as_str()]);
        if let Some(cid) = &record.cid {
            table.add_row(vec!["cid", cid.as_str()]);
        }
        if let Some(Value::Object(fields)) = record.display_value() {
            for (name, value) in &fields {
                table.add_row(vec![name.clone(), cell_for(value)]);
            }
        }

        writeln!(out, "{}", table)?;
        Ok(())
    }
}
