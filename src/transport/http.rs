use crate::config::ClientConfig;
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// JSON-over-HTTP transport bound to `<base>/api/chatbot`.
///
/// Endpoints are addressed by path segments; each segment is percent-encoded,
/// so opaque ids can never escape into another path. Every URL ends in `/`.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_root: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_root = config.api_root_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| {
                crate::Error::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, api_root })
    }

    pub fn api_root(&self) -> &str {
        self.api_root.as_str()
    }

    /// `<api_root>/<seg>/<seg>/` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // http(s) URLs always have a hierarchical path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(method = method.as_str(), url = url.as_str(), "chatbot request");
        self.client.request(method, url)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let resp = self.send(self.request(Method::GET, segments)).await?;
        Self::decode(resp).await
    }

    pub async fn get_json_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self
            .send(self.request(Method::GET, segments).query(query))
            .await?;
        Self::decode(resp).await
    }

    pub async fn post_json<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self
            .send(self.request(Method::POST, segments).json(body))
            .await?;
        Self::decode(resp).await
    }

    /// POST whose response body carries nothing the caller needs.
    pub async fn post_discard<B>(&self, segments: &[&str], body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, segments).json(body))
            .await?;
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response> {
        let resp = req.send().await.map_err(TransportError::Http)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        }
        .into())
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        resp.json::<T>()
            .await
            .map_err(|e| TransportError::Http(e).into())
    }
}

/// Any failure to complete an HTTP exchange successfully.
///
/// The variants carry detail only; callers are expected to treat them alike.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::InvalidResponse(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_timeout())
    }
}
