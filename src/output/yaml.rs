//! YAML output formatter

use std::io::Write;

use super::{record_payload, records_payload, Formatter, RecordView};
use crate::error::{PdsError, Result};

/// Formatter for YAML output
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_records(&self, records: &[RecordView], out: &mut dyn Write) -> Result<()> {
        let payload = records_payload(records);
        let yaml = serde_yml::to_string(&payload)
            .map_err(|e| PdsError::Io(format!("YAML serialization failed: {}", e)))?;
        write!(out, "{}", yaml)?;
        Ok(())
    }

    fn format_record(&self, record: &RecordView, out: &mut dyn Write) -> Result<()> {
        let payload = record_payload(record).ok_or_else(|| {
            PdsError::Json(format!("record at {} has a non-object value", record.uri))
        })?;
        let yaml = serde_yml::to_string(&payload)
            .map_err(|e| PdsError::Io(format!("YAML serialization failed: {}", e)))?;
        write!(out, "{}", yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pds::records::ListedRecord;
    use serde_json::json;

    fn view(value: serde_json::Value) -> RecordView {
        RecordView::new(&ListedRecord {
            uri: "at://did:plc:abc/app.bsky.feed.post/3k44".to_string(),
            cid: None,
            value,
        })
    }

    #[test]
    fn test_listing_parses_back_as_sequence() {
        let records = vec![view(json!({"text": "hi"})), view(json!({"text": "bye"}))];
        let mut out = Vec::new();
        YamlFormatter.format_records(&records, &mut out).unwrap();

        let parsed: serde_json::Value = serde_yml::from_slice(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["value"]["text"], "hi");
    }

    #[test]
    fn test_empty_listing() {
        let mut out = Vec::new();
        YamlFormatter.format_records(&[], &mut out).unwrap();
        let parsed: serde_json::Value = serde_yml::from_slice(&out).unwrap();
        assert_eq!(parsed, json!([]));
    }
}
