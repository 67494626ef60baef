//! Typed client for the store backend REST API.
//!
//! Thin wrapper over `reqwest`: JSON bodies, bearer auth on authenticated
//! calls, and catalog GETs cached through `moka` with a short TTL. Cart
//! endpoints are never cached (mutable state). Failures are mapped to
//! [`ApiError`] at the response boundary; there are no retries and no local
//! fallback.

mod auth;
mod cart;
mod catalog;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use kiosk_core::{Category, Product};

use crate::config::Config;

/// Catalog responses are cached briefly; every admin mutation invalidates.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How much of an unexpected body to keep in logs.
const LOG_BODY_LIMIT: usize = 200;

/// Errors that can occur when talking to the store backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend error ({status}): {detail}")]
    Status { status: u16, detail: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL is not usable.
    #[error("Invalid base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Acknowledgement body returned by delete/update endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    #[allow(dead_code)]
    pub message: String,
}

/// Cached catalog responses.
#[derive(Clone, Debug)]
pub(crate) enum CacheValue {
    Products(Vec<Product>),
    Categories(Vec<Category>),
}

/// Client for the store backend.
///
/// Cheaply cloneable; all clones share one connection pool and one cache.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a client from the storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(config.api_url.as_str(), config.http_timeout)
    }

    /// Create a client with an explicit base URL (used by tests to point at
    /// a mock server).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BaseUrl` if `base_url` does not parse, or
    /// `ApiError::Http` if the HTTP client cannot be constructed.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("kiosk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Normalise: exactly one trailing slash so Url::join keeps the full
        // base path instead of replacing its last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalized).map_err(|source| ApiError::BaseUrl {
            url: base_url.to_owned(),
            source,
        })?;

        let cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: parsed,
                cache,
            }),
        })
    }

    /// Resolve a relative endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|source| ApiError::BaseUrl {
                url: path.to_owned(),
                source,
            })
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    pub(crate) fn cache(&self) -> &Cache<String, CacheValue> {
        &self.inner.cache
    }

    /// Send a request and decode a JSON response.
    ///
    /// Reads the body as text first so decode failures can be logged with
    /// the offending payload.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: extract_detail(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body),
                "failed to decode backend response"
            );
            ApiError::Decode(e)
        })
    }
}

/// Attach a bearer token to a request.
fn bearer(request: reqwest::RequestBuilder, token: &SecretString) -> reqwest::RequestBuilder {
    request.bearer_auth(token.expose_secret())
}

/// Pull the FastAPI-style `{"detail": ...}` message out of an error body,
/// falling back to the status line.
fn extract_detail(body: &str, status: reqwest::StatusCode) -> String {
    #[derive(Deserialize)]
    struct Detail {
        detail: serde_json::Value,
    }

    match serde_json::from_str::<Detail>(body) {
        Ok(Detail {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(Detail { detail }) => detail.to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned(),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        let body = r#"{"detail": "Product not found"}"#;
        assert_eq!(
            extract_detail(body, reqwest::StatusCode::NOT_FOUND),
            "Product not found"
        );
    }

    #[test]
    fn test_extract_detail_structured() {
        // Validation errors come back as a list of objects.
        let body = r#"{"detail": [{"loc": ["body", "price"], "msg": "value error"}]}"#;
        let detail = extract_detail(body, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail.contains("value error"));
    }

    #[test]
    fn test_extract_detail_falls_back_to_status() {
        assert_eq!(
            extract_detail("<html>oops</html>", reqwest::StatusCode::BAD_GATEWAY),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_base_url_normalized() {
        let client = ApiClient::with_base_url("http://localhost:8000", Duration::from_secs(5))
            .expect("client");
        let url = client.endpoint("cart/3").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:8000/cart/3");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = ApiClient::with_base_url("not a url", Duration::from_secs(5))
            .err()
            .expect("should fail");
        assert!(matches!(err, ApiError::BaseUrl { .. }));
    }
}
