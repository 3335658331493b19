//! meili Core Library
//!
//! Wire types shared by the meili client, including:
//! - Client configuration
//! - Index, document, key and stats models
//! - Asynchronous task model
//! - Search request and response
//! - Index settings

pub mod config;
pub mod models;
pub mod search;
pub mod settings;
pub mod task;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError};
pub use models::*;
pub use search::{FacetStats, MatchingStrategy, SearchRequest, SearchResponse};
pub use settings::{Faceting, MinWordSizeForTypos, PaginationSetting, Settings, TypoTolerance};
pub use task::{Task, TaskDetails, TaskInfo, TaskStatus, TaskType, TasksQuery, TasksResults};
