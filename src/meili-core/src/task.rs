//! Asynchronous task model.
//!
//! Every mutating call on the service is enqueued and answered with a
//! [`TaskInfo`]; the full [`Task`] is fetched from `/tasks/{uid}` until it
//! reaches a terminal [`TaskStatus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::ErrorResponse;

/// TaskStatus is the lifecycle state of a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Enqueued,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    /// Position in the lifecycle; a task never moves to a lower rank.
    pub fn rank(self) -> u8 {
        match self {
            Self::Enqueued => 0,
            Self::Processing => 1,
            Self::Succeeded | Self::Failed | Self::Canceled => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enqueued => "enqueued",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TaskType is the kind of operation a task performs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TaskType {
    IndexCreation,
    IndexUpdate,
    IndexDeletion,
    IndexSwap,
    DocumentAdditionOrUpdate,
    DocumentDeletion,
    SettingsUpdate,
    DumpCreation,
    TaskCancelation,
    TaskDeletion,
    SnapshotCreation,
    #[serde(other)]
    Unknown,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndexCreation => "indexCreation",
            Self::IndexUpdate => "indexUpdate",
            Self::IndexDeletion => "indexDeletion",
            Self::IndexSwap => "indexSwap",
            Self::DocumentAdditionOrUpdate => "documentAdditionOrUpdate",
            Self::DocumentDeletion => "documentDeletion",
            Self::SettingsUpdate => "settingsUpdate",
            Self::DumpCreation => "dumpCreation",
            Self::TaskCancelation => "taskCancelation",
            Self::TaskDeletion => "taskDeletion",
            Self::SnapshotCreation => "snapshotCreation",
            Self::Unknown => "unknown",
        }
    }
}

/// TaskInfo is the summary returned when an operation is enqueued
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_uid: u64,
    #[serde(default)]
    pub index_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub enqueued_at: DateTime<Utc>,
}

/// Task is the full server-side record of an asynchronous operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub uid: u64,
    #[serde(default)]
    pub index_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub canceled_by: Option<u64>,
    #[serde(default)]
    pub details: Option<TaskDetails>,
    #[serde(default)]
    pub error: Option<ErrorResponse>,
    /// ISO-8601 duration as reported by the service, e.g. `PT0.014S`
    #[serde(default)]
    pub duration: Option<String>,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Operation-specific payload of a task. Fields the client does not model
/// are kept in `other`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_documents: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_documents: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_ids: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_documents: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_tasks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_tasks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_tasks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dump_uid: Option<String>,
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

/// TasksQuery filters `/tasks` listings and selects the tasks targeted by
/// cancel and delete operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasksQuery {
    pub uids: Vec<u64>,
    pub statuses: Vec<TaskStatus>,
    pub types: Vec<TaskType>,
    pub index_uids: Vec<String>,
    pub canceled_by: Vec<u64>,
    pub before_enqueued_at: Option<DateTime<Utc>>,
    pub after_enqueued_at: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub from: Option<u64>,
}

impl TasksQuery {
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        fn join<T, F: Fn(&T) -> String>(items: &[T], f: F) -> String {
            items.iter().map(f).collect::<Vec<_>>().join(",")
        }

        let mut pairs = Vec::new();
        if !self.uids.is_empty() {
            pairs.push(("uids".to_string(), join(&self.uids, u64::to_string)));
        }
        if !self.statuses.is_empty() {
            pairs.push((
                "statuses".to_string(),
                join(&self.statuses, |s| s.as_str().to_string()),
            ));
        }
        if !self.types.is_empty() {
            pairs.push((
                "types".to_string(),
                join(&self.types, |t| t.as_str().to_string()),
            ));
        }
        if !self.index_uids.is_empty() {
            pairs.push(("indexUids".to_string(), self.index_uids.join(",")));
        }
        if !self.canceled_by.is_empty() {
            pairs.push(("canceledBy".to_string(), join(&self.canceled_by, u64::to_string)));
        }
        if let Some(before) = self.before_enqueued_at {
            pairs.push(("beforeEnqueuedAt".to_string(), before.to_rfc3339()));
        }
        if let Some(after) = self.after_enqueued_at {
            pairs.push(("afterEnqueuedAt".to_string(), after.to_rfc3339()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        pairs
    }
}

/// Cursor-paginated task listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TasksResults {
    pub results: Vec<Task>,
    pub limit: usize,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub next: Option<u64>,
}
