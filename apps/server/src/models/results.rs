//! Write acknowledgements returned to clients

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Soft failure: the request was valid but nothing was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejected {
    pub acknowledged: bool,
    pub message: String,
}

impl Rejected {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            acknowledged: false,
            message: message.into(),
        }
    }
}
