//! Shared HTTP client for the Showcase platform and DSP APIs.
//!
//! Both API clients in this crate go through [`ApiClient`] so that
//! authentication, timeouts and error mapping behave the same everywhere.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use showcase_core::errors::{Error, Result, ValidationError};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[allow(dead_code)]
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Bearer-token JSON client bound to one API base URL.
///
/// # Example
///
/// ```ignore
/// let client = ApiClient::new("https://api.showcase.example", "token", None)?;
/// let body: serde_json::Value = client.get("/v1/campaigns").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderValue,
    label: &'static str,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API (trailing slashes are dropped)
    /// * `access_token` - Bearer token sent with every request
    /// * `timeout` - Request timeout, [`DEFAULT_TIMEOUT_SECS`] when `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the access token format is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(base_url: &str, access_token: &str, timeout: Option<Duration>) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| Error::InvalidConfigValue(format!("Invalid access token format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
            label: "Api",
        })
    }

    /// Prefix used in log lines, e.g. `[DspApi]`.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[{}] {} {}", self.label, method, url);

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request to {} failed: {}", url, e)))?;

        self.parse_response(response).await
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Unexpected(format!(
                "Failed to parse response: {} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

/// Maps a non-success response onto the domain error taxonomy.
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> Error {
    // Try to parse error response for a better message
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                body.chars().take(200).collect()
            }
        });

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Validation(ValidationError::Rejected(message))
        }
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Percent-encodes a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("https://api.showcase.example", "test-token", None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_url_normalization() {
        let client = ApiClient::new("https://api.showcase.example//", "test-token", None).unwrap();
        assert_eq!(client.base_url(), "https://api.showcase.example");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = ApiClient::new("https://api.showcase.example", "bad\ntoken", None).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_not_found_mapping() {
        let err = error_for_status(StatusCode::NOT_FOUND, r#"{"message":"no cycle"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: no cycle");
    }

    #[test]
    fn test_validation_mapping() {
        let err = error_for_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":"budget must be positive"}"#,
        );
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Rejected(ref m)) if m == "budget must be positive"
        ));
    }

    #[test]
    fn test_other_status_mapping() {
        match error_for_status(StatusCode::BAD_GATEWAY, "") {
            Error::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "HTTP 502 Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        match error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") {
            Error::Api { message, .. } => assert_eq!(message, "upstream exploded"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("org 1/2"), "org%201%2F2");
        assert_eq!(segment("c42"), "c42");
    }
}
