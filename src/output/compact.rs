//! Compact one-line-per-record formatter, the default for listings

use std::io::Write;

use super::{Formatter, RecordView};
use crate::error::Result;

/// Formatter for compact `rkey: {json}` output
pub struct CompactFormatter;

impl Formatter for CompactFormatter {
    fn format_records(&self, records: &[RecordView], out: &mut dyn Write) -> Result<()> {
        for record in records {
            self.format_record(record, out)?;
        }
        Ok(())
    }

    fn format_record(&self, record: &RecordView, out: &mut dyn Write) -> Result<()> {
        match record.display_value() {
            Some(value) => writeln!(out, "{}: {}", record.rkey, serde_json::to_string(&value)?)?,
            None => writeln!(out, "{}: <invalid record>", record.rkey)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pds::records::ListedRecord;
    use serde_json::json;

    fn view(rkey: &str, value: serde_json::Value) -> RecordView {
        RecordView::new(&ListedRecord {
            uri: format!("at://did:plc:abc/app.bsky.feed.post/{}", rkey),
            cid: None,
            value,
        })
    }

    #[test]
    fn test_one_line_per_record() {
        let records = vec![
            view("aaa", json!({"text": "one"})),
            view("bbb", json!({"text": "two"})),
        ];
        let mut out = Vec::new();
        CompactFormatter.format_records(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("aaa: "));
        assert!(lines[1].starts_with("bbb: "));
    }

    #[test]
    fn test_type_marker_hidden() {
        let records = vec![view("aaa", json!({"$type": "app.bsky.feed.post", "text": "x"}))];
        let mut out = Vec::new();
        CompactFormatter.format_records(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("$type"));
        assert!(text.contains("\"text\":\"x\""));
    }

    #[test]
    fn test_invalid_record_placeholder() {
        let records = vec![view("aaa", json!(7))];
        let mut out = Vec::new();
        CompactFormatter.format_records(&records, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap().trim(),
            "aaa: <invalid record>"
        );
    }
}
