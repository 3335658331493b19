use meili_core::{ClientConfig, ErrorResponse, Health, Version};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ClientError, RequestContext, Result};
use crate::request::Request;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

const CLIENT_AGENT: &str = concat!("meili-rs (v", env!("CARGO_PKG_VERSION"), ")");

/// Search service REST API client.
///
/// Cheap to clone; clones share the configuration and the transport (and
/// with it the connection pool). Holds no per-call state, so one instance
/// can serve any number of concurrent callers.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.inner.config.host)
            .field("authenticated", &self.inner.config.bearer_key().is_some())
            .field("timeout", &self.inner.config.timeout())
            .finish()
    }
}

/// Builder for [`Client`]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Request timeout of the default transport. Ignored when a custom
    /// transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Replace the default `reqwest` transport
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<Client> {
        self.config.validate()?;
        check_base_url(self.config.base_url())?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let transport = ReqwestTransport::new(self.config.timeout()).map_err(|e| {
                    ClientError::config(format!("failed to build HTTP client: {e}"))
                })?;
                Arc::new(transport) as Arc<dyn Transport>
            }
        };

        tracing::debug!(
            host = %self.config.base_url(),
            authenticated = self.config.bearer_key().is_some(),
            "client configured"
        );

        Ok(Client {
            inner: Arc::new(Inner {
                config: self.config,
                transport,
            }),
        })
    }
}

impl Client {
    /// Create a client with the default transport
    pub fn new(host: impl Into<String>, api_key: Option<&str>) -> Result<Self> {
        let mut builder = Self::builder(host);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    pub fn builder(host: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            config: ClientConfig::new(host),
            transport: None,
        }
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder {
            config,
            transport: None,
        }
        .build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn host(&self) -> &str {
        self.inner.config.base_url()
    }

    /// Execute one request and decode the accepted response body as `T`.
    ///
    /// Issues exactly one transport call and never retries. An empty body
    /// decodes as JSON `null`, so `()` and `Option<_>` fit bodiless replies.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let Request {
            context,
            query,
            body,
            content_type,
            accepted,
        } = request;

        let url = self.url_for(&context, &query)?;

        let mut headers = vec![("X-Meilisearch-Client".to_string(), CLIENT_AGENT.to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), content_type.mime().to_string()));
        }
        if let Some(key) = self.inner.config.bearer_key() {
            headers.push(("Authorization".to_string(), format!("Bearer {key}")));
        }

        tracing::debug!(
            method = %context.method,
            endpoint = %context.endpoint,
            function = context.function,
            "sending request"
        );

        let response = match self
            .inner
            .transport
            .send(HttpRequest {
                method: context.method,
                url,
                headers,
                body,
            })
            .await
        {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(%context, error = %source, "request failed before a response");
                return Err(ClientError::Communication { context, source });
            }
        };

        let status = response.status;
        if !accepted.contains(&status) {
            let error_response = serde_json::from_slice::<ErrorResponse>(&response.body)
                .unwrap_or_else(|_| ErrorResponse::empty());
            tracing::warn!(
                %context,
                status,
                expected = ?accepted,
                code = %error_response.code,
                "unexpected status code"
            );
            return Err(ClientError::UnexpectedStatus {
                context,
                status,
                expected: accepted,
                response: error_response,
            });
        }

        decode_body(&response.body).map_err(|source| {
            tracing::warn!(%context, status, error = %source, "failed to decode response");
            ClientError::Decoding {
                context,
                status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
                source,
            }
        })
    }

    fn url_for(&self, context: &RequestContext, query: &[(String, String)]) -> Result<String> {
        let raw = format!("{}{}", self.inner.config.base_url(), context.endpoint);
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|e| ClientError::config(format!("{context}: invalid URL {raw:?}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }

    /// GET /health
    pub async fn health(&self) -> Result<Health> {
        self.execute(
            Request::get("/health")
                .accept(&[200])
                .named("Client", "health")
                .build()?,
        )
        .await
    }

    /// True when the instance answers `/health` with `available`
    pub async fn is_healthy(&self) -> bool {
        matches!(self.health().await, Ok(health) if health.status == "available")
    }

    /// GET /version
    pub async fn get_version(&self) -> Result<Version> {
        self.execute(
            Request::get("/version")
                .accept(&[200])
                .named("Client", "get_version")
                .build()?,
        )
        .await
    }
}

/// The base URL must parse and name a host; endpoints are appended to it.
fn check_base_url(base_url: &str) -> Result<()> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| ClientError::config(format!("invalid host {base_url:?}: {e}")))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ClientError::config(format!("host {base_url:?} has no hostname"))),
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null");
    }
    serde_json::from_slice(body)
}
