//! meili Client Library
//!
//! Async HTTP client for a search-engine REST API: indexes, documents,
//! settings, search, API keys, dumps, stats and asynchronous tasks.
//!
//! Every operation is one request run through [`Client::execute`]. Writes
//! return a [`TaskInfo`]; use [`Client::wait_for_task`] (or
//! [`TaskInfoExt::wait_for_completion`]) to poll it to a terminal state.

mod client;
mod documents;
mod dumps;
mod error;
mod indexes;
mod keys;
mod request;
mod search;
mod settings;
mod stats;
mod tasks;
mod transport;

pub use client::{Client, ClientBuilder};
pub use error::{ClientError, ErrorCode, RequestContext, Result};
pub use indexes::{Index, IndexScoped};
pub use request::{ContentType, Request, RequestBuilder};
pub use tasks::{TaskInfoExt, WaitParams, DEFAULT_POLL_INTERVAL};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
};

pub use meili_core::{
    ClientConfig, ConfigError, CreateIndexRequest, DocumentsQuery, ErrorResponse, FacetStats,
    Faceting, Health, IndexInfo, IndexStats, IndexesQuery, Key, KeyRequest, KeyUpdate, KeysQuery,
    MatchingStrategy, MinWordSizeForTypos, Page, Pagination, PaginationSetting, SearchRequest,
    SearchResponse, Settings, Stats, SwapIndexes, Task, TaskDetails, TaskInfo, TaskStatus,
    TaskType, TasksQuery, TasksResults, TypoTolerance, UpdateIndexRequest, Version,
    EMPTY_MESSAGE,
};
pub use tokio_util::sync::CancellationToken;
