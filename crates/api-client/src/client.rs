//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{ElementsApi, StructuresApi};
use crate::error::{ApiError, ApiResult, RequestContext};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Data dictionary API client
///
/// Thin wrapper over `reqwest` that adds request correlation IDs, tracing
/// and status mapping (404 becomes [`ApiError::NotFound`]). It never retries;
/// a retry is a fresh call by the caller.
#[derive(Clone)]
pub struct DictionaryClient {
    inner: Client,
    config: Arc<ClientConfig>,
    base: Arc<Url>,
}

impl DictionaryClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
            default_headers.insert(USER_AGENT, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            base: Arc::new(base),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access data element endpoints
    #[must_use]
    pub fn elements(&self) -> ElementsApi {
        ElementsApi::new(self.clone())
    }

    /// Access data structure endpoints
    #[must_use]
    pub fn structures(&self) -> StructuresApi {
        StructuresApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Build an endpoint URL from path segments and query pairs.
    ///
    /// Segments are percent-encoded, so element names containing `/` or
    /// spaces stay a single segment.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = (*self.base).clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Perform a GET request and deserialize the JSON body
    #[instrument(skip(self, url), fields(url = %url, request_id = tracing::field::Empty))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        self.execute(Method::GET, url, None).await
    }

    /// Perform a POST request with a plain-text body and deserialize the JSON response
    #[instrument(skip(self, url, body), fields(url = %url, request_id = tracing::field::Empty))]
    pub async fn post_text<T: DeserializeOwned>(&self, url: Url, body: String) -> ApiResult<T> {
        self.execute(Method::POST, url, Some(body)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let context = RequestContext {
            request_id: Some(request_id.clone()),
            endpoint: url.path().to_string(),
            method: method.to_string(),
        };

        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(text) = body {
            request = request
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(text);
        }

        let start = Instant::now();
        let result = match request.send().await {
            Ok(response) => handle_response(response).await,
            Err(e) => Err(ApiError::Request(e)),
        };
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => debug!(
                request = %context,
                elapsed_ms = elapsed.as_millis(),
                "Request succeeded"
            ),
            Err(e) => debug!(
                request = %context,
                elapsed_ms = elapsed.as_millis(),
                error = %e,
                "Request failed"
            ),
        }

        result
    }
}

/// Map the HTTP status and deserialize the body
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        Err(ApiError::NotFound(response.url().path().to_string()))
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}
