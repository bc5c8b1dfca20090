pub mod api;
pub mod commands;
pub mod models;
pub mod pager;

pub use models::{BlobRef, ListRecordsResponse, ListedRecord, UploadBlobResponse, WriteRecordResponse};
pub use pager::{list_collection, ContinuationInfo};
