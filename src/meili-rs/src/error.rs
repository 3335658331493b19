use meili_core::{ConfigError, ErrorResponse, Task};
use std::fmt;
use std::time::Duration;

use crate::transport::{HttpMethod, TransportError};

/// Where a failing call was headed, enough to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: HttpMethod,
    pub endpoint: String,
    /// Client operation that issued the request, e.g. `create_index`
    pub function: &'static str,
    /// Resource family, e.g. `Indexes`
    pub api: &'static str,
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} ({} {})",
            self.api, self.function, self.method, self.endpoint
        )
    }
}

/// Stable numeric taxonomy of [`ClientError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Config = 1,
    Encoding = 2,
    Communication = 3,
    UnexpectedStatus = 4,
    Decoding = 5,
    TaskFailed = 6,
    Timeout = 7,
    Canceled = 8,
    TaskNotFound = 9,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("{context}: failed to encode request body: {source}")]
    Encoding {
        context: RequestContext,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: communication error: {source}")]
    Communication {
        context: RequestContext,
        #[source]
        source: TransportError,
    },

    #[error("{context}: unexpected status code {status} (expected {expected:?}): {response}")]
    UnexpectedStatus {
        context: RequestContext,
        status: u16,
        expected: Vec<u16>,
        response: ErrorResponse,
    },

    #[error("{context}: failed to decode response (status {status}): {source}")]
    Decoding {
        context: RequestContext,
        status: u16,
        /// Raw body, kept for inspection
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: task {} failed: {}", task.uid, failure_message(task))]
    TaskFailed {
        context: RequestContext,
        task: Box<Task>,
    },

    #[error("{context}: gave up waiting for task {task_uid} after {waited:?}")]
    Timeout {
        context: RequestContext,
        task_uid: u64,
        waited: Duration,
    },

    #[error("{context}: waiting for task {task_uid} was canceled")]
    Canceled {
        context: RequestContext,
        task_uid: u64,
    },

    #[error("{context}: task {task_uid} not found: {response}")]
    TaskNotFound {
        context: RequestContext,
        task_uid: u64,
        response: ErrorResponse,
    },
}

fn failure_message(task: &Task) -> String {
    task.error
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| meili_core::EMPTY_MESSAGE.to_string())
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

impl ClientError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config { .. } => ErrorCode::Config,
            Self::Encoding { .. } => ErrorCode::Encoding,
            Self::Communication { .. } => ErrorCode::Communication,
            Self::UnexpectedStatus { .. } => ErrorCode::UnexpectedStatus,
            Self::Decoding { .. } => ErrorCode::Decoding,
            Self::TaskFailed { .. } => ErrorCode::TaskFailed,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Canceled { .. } => ErrorCode::Canceled,
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
        }
    }

    /// Request that failed. `None` only for configuration errors.
    pub fn context(&self) -> Option<&RequestContext> {
        match self {
            Self::Config { .. } => None,
            Self::Encoding { context, .. }
            | Self::Communication { context, .. }
            | Self::UnexpectedStatus { context, .. }
            | Self::Decoding { context, .. }
            | Self::TaskFailed { context, .. }
            | Self::Timeout { context, .. }
            | Self::Canceled { context, .. }
            | Self::TaskNotFound { context, .. } => Some(context),
        }
    }

    /// HTTP status of the response, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } | Self::Decoding { status, .. } => Some(*status),
            Self::TaskNotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn expected_status_codes(&self) -> Option<&[u16]> {
        match self {
            Self::UnexpectedStatus { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// Server-side error message: the decoded envelope, the empty-message
    /// sentinel, or the error embedded in a failed task.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::UnexpectedStatus { response, .. } | Self::TaskNotFound { response, .. } => {
                Some(response)
            }
            Self::TaskFailed { task, .. } => task.error.as_ref(),
            _ => None,
        }
    }

    /// Final state of the task for [`ClientError::TaskFailed`]
    pub fn task(&self) -> Option<&Task> {
        match self {
            Self::TaskFailed { task, .. } => Some(task),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext {
            method: HttpMethod::Get,
            endpoint: "/indexes/books".to_string(),
            function: "get_index",
            api: "Indexes",
        }
    }

    #[test]
    fn test_unexpected_status_display_includes_context() {
        let err = ClientError::UnexpectedStatus {
            context: context(),
            status: 404,
            expected: vec![200],
            response: ErrorResponse {
                message: "Index `books` not found.".to_string(),
                code: "index_not_found".to_string(),
                error_type: "invalid_request".to_string(),
                link: String::new(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("Indexes::get_index"));
        assert!(text.contains("GET /indexes/books"));
        assert!(text.contains("404"));
        assert!(text.contains("index_not_found"));
        assert_eq!(err.code(), ErrorCode::UnexpectedStatus);
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.expected_status_codes(), Some(&[200][..]));
    }

    #[test]
    fn test_sentinel_message_in_display() {
        let err = ClientError::UnexpectedStatus {
            context: context(),
            status: 500,
            expected: vec![200],
            response: ErrorResponse::empty(),
        };
        assert!(err.to_string().contains(meili_core::EMPTY_MESSAGE));
        assert!(err.response().unwrap().is_empty());
    }

    #[test]
    fn test_config_error_has_no_context() {
        let err = ClientError::from(ConfigError::EmptyHost);
        assert_eq!(err.code(), ErrorCode::Config);
        assert!(err.context().is_none());
        assert!(err.to_string().contains("host is empty"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ErrorCode::Config,
            ErrorCode::Encoding,
            ErrorCode::Communication,
            ErrorCode::UnexpectedStatus,
            ErrorCode::Decoding,
            ErrorCode::TaskFailed,
            ErrorCode::Timeout,
            ErrorCode::Canceled,
            ErrorCode::TaskNotFound,
        ];
        let set: std::collections::HashSet<u8> = codes.iter().map(|c| *c as u8).collect();
        assert_eq!(set.len(), codes.len());
    }
}
