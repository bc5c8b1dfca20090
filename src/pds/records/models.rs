//! Record API data models

use serde::Deserialize;
use serde_json::Value;

/// One record as returned by listRecords / getRecord
#[derive(Deserialize, Debug, Clone)]
pub struct ListedRecord {
    pub uri: String,
    pub cid: Option<String>,
    /// Opaque record payload; no schema awareness, pass-through only
    pub value: Value,
}

impl ListedRecord {
    /// Record key (last URI segment) for compact display
    pub fn rkey(&self) -> &str {
        crate::pds::uri::rkey_of(&self.uri)
    }

    /// CID, empty when the server omitted it
    pub fn cid(&self) -> &str {
        self.cid.as_deref().unwrap_or("")
    }
}

/// Response wrapper for listRecords
///
/// `cursor` is an opaque continuation token; absence means the collection
/// is exhausted.
#[derive(Deserialize, Debug)]
pub struct ListRecordsResponse {
    pub records: Vec<ListedRecord>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Response for createRecord / putRecord
#[derive(Deserialize, Debug, Clone)]
pub struct WriteRecordResponse {
    pub uri: String,
    pub cid: String,
}

/// Blob reference returned by uploadBlob
#[derive(Deserialize, Debug, Clone)]
pub struct BlobRef {
    #[serde(rename = "ref")]
    pub link: Value,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub size: u64,
}

/// Response wrapper for uploadBlob
#[derive(Deserialize, Debug)]
pub struct UploadBlobResponse {
    pub blob: BlobRef,
}

impl UploadBlobResponse {
    /// The `$type: blob` reference object to paste into records
    pub fn reference(&self) -> Value {
        serde_json::json!({
            "$type": "blob",
            "ref": self.blob.link,
            "mimeType": self.blob.mime_type,
            "size": self.blob.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_record_rkey() {
        let record = ListedRecord {
            uri: "at://did:plc:abc/app.bsky.feed.post/3k44".to_string(),
            cid: Some("bafyrei".to_string()),
            value: serde_json::json!({"text": "hi"}),
        };
        assert_eq!(record.rkey(), "3k44");
        assert_eq!(record.cid(), "bafyrei");
    }

    #[test]
    fn test_list_response_deserialization() {
        let json = r#"{
            "records": [
                {"uri": "at://did:plc:a/c/1", "cid": "bafy1", "value": {"text": "one"}},
                {"uri": "at://did:plc:a/c/2", "cid": "bafy2", "value": {"text": "two"}}
            ],
            "cursor": "3k44dii2v42l2"
        }"#;

        let response: ListRecordsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.records.len(), 2);
        assert_eq!(response.cursor.as_deref(), Some("3k44dii2v42l2"));
        assert_eq!(response.records[0].value["text"], "one");
    }

    #[test]
    fn test_list_response_without_cursor() {
        let json = r#"{"records": []}"#;
        let response: ListRecordsResponse = serde_json::from_str(json).unwrap();
        assert!(response.records.is_empty());
        assert!(response.cursor.is_none());
    }

    #[test]
    fn test_blob_reference_shape() {
        let json = r#"{
            "blob": {
                "$type": "blob",
                "ref": {"$link": "bafkreihash"},
                "mimeType": "image/png",
                "size": 12345
            }
        }"#;

        let response: UploadBlobResponse = serde_json::from_str(json).unwrap();
        let reference = response.reference();
        assert_eq!(reference["$type"], "blob");
        assert_eq!(reference["ref"]["$link"], "bafkreihash");
        assert_eq!(reference["mimeType"], "image/png");
        assert_eq!(reference["size"], 12345);
    }
}
