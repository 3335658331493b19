use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Message used when a rejected response carried no decodable error body.
pub const EMPTY_MESSAGE: &str = "empty message";

/// ErrorResponse is the service's error envelope, also embedded in failed tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub link: String,
}

impl ErrorResponse {
    /// Sentinel for responses whose body was missing or not an error envelope
    pub fn empty() -> Self {
        Self {
            message: EMPTY_MESSAGE.to_string(),
            code: String::new(),
            error_type: String::new(),
            link: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message == EMPTY_MESSAGE && self.code.is_empty()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{} (code: {}, type: {}", self.message, self.code, self.error_type)?;
        if !self.link.is_empty() {
            write!(f, ", link: {}", self.link)?;
        }
        write!(f, ")")
    }
}

/// IndexInfo is an index as described by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub uid: String,
    #[serde(default)]
    pub primary_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndexRequest {
    pub primary_key: String,
}

/// One pair of indexes to exchange in a swap operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapIndexes {
    pub indexes: [String; 2],
}

/// Offset/limit pagination shared by list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl Pagination {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

pub type IndexesQuery = Pagination;
pub type KeysQuery = Pagination;

/// Paginated list envelope returned by `/indexes`, `/keys` and `/documents`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

/// DocumentsQuery narrows a document listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentsQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub fields: Vec<String>,
}

impl DocumentsQuery {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Pagination {
            offset: self.offset,
            limit: self.limit,
        }
        .query_pairs();
        if !self.fields.is_empty() {
            pairs.push(("fields".to_string(), self.fields.join(",")));
        }
        pairs
    }
}

/// Instance-wide statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub database_size: u64,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub indexes: HashMap<String, IndexStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub number_of_documents: u64,
    pub is_indexing: bool,
    #[serde(default)]
    pub field_distribution: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub commit_sha: String,
    pub commit_date: String,
    pub pkg_version: String,
}

/// Key is an API key with its permissions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub key: String,
    pub uid: Uuid,
    pub actions: Vec<String>,
    pub indexes: Vec<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// KeyRequest describes a key to create
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    pub actions: Vec<String>,
    pub indexes: Vec<String>,
    /// Serialized as `null` when absent: the service requires the field.
    pub expires_at: Option<DateTime<Utc>>,
}

/// KeyUpdate changes the mutable fields of a key
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_decodes_envelope() {
        let body = r#"{"message":"Index `books` not found.","code":"index_not_found","type":"invalid_request","link":"https://docs.meilisearch.com/errors#index_not_found"}"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.code, "index_not_found");
        assert_eq!(err.error_type, "invalid_request");
        assert!(!err.is_empty());
        assert!(err.to_string().contains("index_not_found"));
    }

    #[test]
    fn test_error_response_requires_message() {
        let result: Result<ErrorResponse, _> = serde_json::from_str(r#"{"status":"oops"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sentinel() {
        let err = ErrorResponse::empty();
        assert!(err.is_empty());
        assert_eq!(err.to_string(), EMPTY_MESSAGE);
    }

    #[test]
    fn test_documents_query_pairs() {
        let query = DocumentsQuery {
            offset: None,
            limit: Some(5),
            fields: vec!["id".to_string(), "title".to_string()],
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("fields".to_string(), "id,title".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_request_keeps_null_expiry() {
        let req = KeyRequest {
            name: None,
            description: Some("search only".to_string()),
            uid: None,
            actions: vec!["search".to_string()],
            indexes: vec!["*".to_string()],
            expires_at: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["expiresAt"].is_null());
        assert!(json.get("name").is_none());
    }
}
