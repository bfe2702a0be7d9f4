// Backend HTTP client
//
// Wraps `reqwest::Client` with `/api` URL construction, status checking and
// JSON decoding. The endpoint modules (ssh, nginx, attacks) add typed
// inherent methods on top of the transport helpers defined here.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Path prefix every backend endpoint lives under.
pub const API_BASE_PATH: &str = "/api";

const BODY_PREVIEW_CHARS: usize = 200;

/// `limit`/`offset` query pair shared by every paged log endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

/// Per-request options for [`ApiClient::request`].
///
/// Defaults to a bare `GET` with no query, body or extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body (sent with `Content-Type: application/json`).
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for the monitoring backend.
///
/// Stateless apart from the pooled connection inside `reqwest::Client`, so
/// it is cheap to clone and share between panels. No retries happen here:
/// the polling loop that owns a call decides what a failure means.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the backend host root (e.g. `http://127.0.0.1:8000`);
    /// [`API_BASE_PATH`] is appended to every endpoint.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend host root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for an endpoint: `{base}/api/{endpoint}`.
    pub fn api_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}{API_BASE_PATH}/{endpoint}"))?)
    }

    // ── Generic request ──────────────────────────────────────────────

    /// Issue a request and decode the body as untyped JSON.
    ///
    /// Non-2xx responses become [`Error::HttpStatus`], transport failures
    /// [`Error::Network`], and unparseable bodies [`Error::Decode`].
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, Error> {
        let RequestOptions {
            method,
            query,
            body,
            headers,
        } = options;

        let mut builder = self
            .http
            .request(method, self.api_url(endpoint)?)
            .headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let resp = self.dispatch(endpoint, builder).await?;
        decode(endpoint, resp).await
    }

    // ── Typed helpers ────────────────────────────────────────────────

    /// Start a GET request for an endpoint; callers attach query parts.
    pub(crate) fn get(&self, endpoint: &str) -> Result<RequestBuilder, Error> {
        Ok(self.http.get(self.api_url(endpoint)?))
    }

    /// Send a prepared request and decode the JSON body into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> Result<T, Error> {
        let resp = self.dispatch(endpoint, builder).await?;
        decode(endpoint, resp).await
    }

    /// POST with no body, treating any 2xx as success without reading the
    /// response payload.
    pub(crate) async fn post_no_content(&self, endpoint: &str) -> Result<(), Error> {
        let builder = self.http.post(self.api_url(endpoint)?);
        self.dispatch(endpoint, builder).await.map(drop)
    }

    /// Build, log and send a request, mapping non-2xx statuses to errors.
    async fn dispatch(&self, endpoint: &str, builder: RequestBuilder) -> Result<Response, Error> {
        let request = builder.build().map_err(Error::Network)?;
        debug!("{} {}", request.method(), request.url());

        let result = match self.http.execute(request).await {
            Ok(resp) if resp.status().is_success() => Ok(resp),
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                Err(Error::HttpStatus { status, body })
            }
            Err(e) => Err(Error::Network(e)),
        };

        if let Err(ref e) = result {
            warn!(endpoint, error = %e, "backend request failed");
        }
        result
    }
}

/// Read the body and decode it, keeping a preview of the raw text on failure.
async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Network)?;

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        let err = Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        };
        warn!(endpoint, error = %err, "failed to decode backend response");
        err
    })
}
