//! Request descriptors.
//!
//! Every facade call describes its HTTP exchange with a [`RequestBuilder`]
//! and hands the validated [`Request`] to [`Client::execute`].
//!
//! [`Client::execute`]: crate::Client::execute

use serde::Serialize;

use crate::error::{ClientError, RequestContext, Result};
use crate::transport::HttpMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Csv,
    Ndjson,
}

impl ContentType {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Ndjson => "application/x-ndjson",
        }
    }
}

enum Body {
    Empty,
    Bytes(Vec<u8>),
    /// Serialization failure, surfaced by `build`
    Invalid(serde_json::Error),
}

/// Builder for a [`Request`]. Nothing is validated until [`build`](Self::build).
pub struct RequestBuilder {
    method: HttpMethod,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Body,
    content_type: ContentType,
    accepted: Vec<u16>,
    function: &'static str,
    api: &'static str,
}

impl RequestBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: Body::Empty,
            content_type: ContentType::Json,
            accepted: Vec::new(),
            function: "unknown",
            api: "Client",
        }
    }

    /// Status codes that count as success. Must not be empty.
    pub fn accept(mut self, codes: &[u16]) -> Self {
        self.accepted = codes.to_vec();
        self
    }

    /// Diagnostic names reported in errors
    pub fn named(mut self, api: &'static str, function: &'static str) -> Self {
        self.api = api;
        self.function = function;
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn query_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.content_type = ContentType::Json;
        self.body = match serde_json::to_vec(body) {
            Ok(bytes) => Body::Bytes(bytes),
            Err(err) => Body::Invalid(err),
        };
        self
    }

    /// Raw body sent as-is, for CSV and NDJSON payloads
    pub fn raw(mut self, body: impl Into<Vec<u8>>, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self.body = Body::Bytes(body.into());
        self
    }

    fn context(&self) -> RequestContext {
        RequestContext {
            method: self.method,
            endpoint: self.endpoint.clone(),
            function: self.function,
            api: self.api,
        }
    }

    pub fn build(self) -> Result<Request> {
        let context = self.context();
        if self.accepted.is_empty() {
            return Err(ClientError::config(format!(
                "{context}: request has no accepted status codes"
            )));
        }
        let body = match self.body {
            Body::Empty => None,
            Body::Bytes(bytes) => Some(bytes),
            Body::Invalid(source) => return Err(ClientError::Encoding { context, source }),
        };
        Ok(Request {
            context,
            query: self.query,
            body,
            content_type: self.content_type,
            accepted: self.accepted,
        })
    }
}

/// A validated request descriptor, consumed by one execution.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) context: RequestContext,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) content_type: ContentType,
    pub(crate) accepted: Vec<u16>,
}

impl Request {
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, endpoint)
    }

    pub fn get(endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(HttpMethod::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(HttpMethod::Put, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(HttpMethod::Patch, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(HttpMethod::Delete, endpoint)
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn method(&self) -> HttpMethod {
        self.context.method
    }

    pub fn endpoint(&self) -> &str {
        &self.context.endpoint
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn accepted_status_codes(&self) -> &[u16] {
        &self.accepted
    }

    pub fn accepts(&self, status: u16) -> bool {
        self.accepted.contains(&status)
    }
}
