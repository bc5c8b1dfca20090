//! Record API operations

use chrono::{SecondsFormat, Utc};
use log::debug;
use serde_json::{Map, Value};

use crate::config::api;
use crate::error::{PdsError, Result};
use crate::pds::uri::AtUri;
use crate::pds::PdsClient;

use super::models::{ListRecordsResponse, ListedRecord, UploadBlobResponse, WriteRecordResponse};

impl PdsClient {
    /// Fetch one page of records. Exactly one network round trip; cursors
    /// are replayed verbatim and never inspected.
    pub async fn list_records_page(
        &self,
        repo: &str,
        collection: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ListRecordsResponse> {
        let mut params = format!(
            "repo={}&collection={}&limit={}",
            urlencoding::encode(repo),
            urlencoding::encode(collection),
            limit
        );
        if let Some(cursor) = cursor {
            params.push_str(&format!("&cursor={}", urlencoding::encode(cursor)));
        }

        let response = self.xrpc_get(api::LIST_RECORDS, &params).send().await?;
        self.parse_api_response(response, &format!("list records in '{}'", collection))
            .await
    }

    /// Get a single record by parsed AT-URI
    pub async fn get_record(&self, uri: &AtUri) -> Result<ListedRecord> {
        let params = format!(
            "repo={}&collection={}&rkey={}",
            urlencoding::encode(&uri.repo),
            urlencoding::encode(&uri.collection),
            urlencoding::encode(&uri.rkey)
        );

        let response = self.xrpc_get(api::GET_RECORD, &params).send().await?;
        self.parse_api_response(response, &format!("get record '{}'", uri))
            .await
    }

    /// Create a record, injecting `$type` and `createdAt` when absent
    pub async fn create_record(
        &self,
        collection: &str,
        mut record: Map<String, Value>,
    ) -> Result<WriteRecordResponse> {
        let session = self.require_session()?;

        record
            .entry("$type".to_string())
            .or_insert_with(|| Value::String(collection.to_string()));
        record.entry("createdAt".to_string()).or_insert_with(|| {
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
        });

        debug!("Creating record in {}", collection);
        let response = self
            .xrpc_post(api::CREATE_RECORD)
            .json(&serde_json::json!({
                "repo": session.did,
                "collection": collection,
                "record": record,
            }))
            .send()
            .await?;

        self.parse_api_response(response, &format!("create record in '{}'", collection))
            .await
    }

    /// Replace a record's value wholesale
    pub async fn put_record(&self, uri: &AtUri, value: Value) -> Result<WriteRecordResponse> {
        debug!("Putting record {}", uri);
        let response = self
            .xrpc_post(api::PUT_RECORD)
            .json(&serde_json::json!({
                "repo": uri.repo,
                "collection": uri.collection,
                "rkey": uri.rkey,
                "record": value,
            }))
            .send()
            .await?;

        self.parse_api_response(response, &format!("update record '{}'", uri))
            .await
    }

    /// Read-merge-write update: fetch the current value, overlay `updates`,
    /// put the result back.
    pub async fn update_record(
        &self,
        uri: &AtUri,
        updates: Map<String, Value>,
    ) -> Result<WriteRecordResponse> {
        let current = self.get_record(uri).await?;

        let merged = match current.value {
            Value::Object(mut fields) => {
                fields.extend(updates);
                Value::Object(fields)
            }
            _ => {
                return Err(PdsError::Json(format!(
                    "record '{}' value is not an object, cannot merge fields",
                    uri
                )))
            }
        };

        self.put_record(uri, merged).await
    }

    /// Delete a record
    pub async fn delete_record(&self, uri: &AtUri) -> Result<()> {
        debug!("Deleting record {}", uri);
        let response = self
            .xrpc_post(api::DELETE_RECORD)
            .json(&serde_json::json!({
                "repo": uri.repo,
                "collection": uri.collection,
                "rkey": uri.rkey,
            }))
            .send()
            .await?;

        // deleteRecord returns an empty or commit-metadata body; only the
        // status matters here
        let _: Value = self
            .parse_api_response(response, &format!("delete record '{}'", uri))
            .await?;
        Ok(())
    }

    /// Upload raw bytes as a blob. The PDS sniffs the MIME type; binary
    /// content negotiation is out of scope.
    pub async fn upload_blob(&self, data: Vec<u8>) -> Result<UploadBlobResponse> {
        self.require_session()?;

        debug!("Uploading blob ({} bytes)", data.len());
        let response = self
            .xrpc_post(api::UPLOAD_BLOB)
            .header("Content-Type", "application/octet-stream")
            .body(data)
            .send()
            .await?;

        self.parse_api_response(response, "upload blob").await
    }
}
