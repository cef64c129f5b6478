//! Generic HTTP request plumbing
//!
//! Shared request execution for the search and template endpoints: sending,
//! logging, status triage, and the lenient body handling the widget relies on
//! (a non-JSON body is degraded to raw text, never a hard failure).

use reqwest::RequestBuilder;
use serde_json::{Value, json};
use std::time::Duration;

use crate::error::ClientError;

/// Maximum number of characters of a response body to include in logs.
const LOG_BODY_LIMIT: usize = 256;

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the shared HTTP client with timeout configuration.
pub(crate) fn create_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// HTTP tool function set.
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Perform an HTTP request and return `(status_code, body_text)`.
    ///
    /// Unified handling: send, log, map transport failures. HTTP 429 maps to
    /// [`ClientError::RateLimited`] and 502–504 to [`ClientError::NetworkError`]
    /// so the retry layer can act on them; every other status is returned to
    /// the caller together with the body.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        endpoint: &str,
        method: &str,
        url: &str,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("[{endpoint}] {method} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{endpoint}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming the response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{endpoint}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ClientError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{endpoint}] Server error (HTTP {status_code})");
            return Err(ClientError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("HTTP {status_code}: {body}"),
            });
        }

        let response_text = response.text().await.map_err(|e| ClientError::NetworkError {
            endpoint: endpoint.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!(
            "[{endpoint}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Perform an HTTP request with transient-failure retries.
    ///
    /// Network errors, timeouts, and rate limiting are retried with
    /// exponential backoff; everything else surfaces immediately.
    /// `max_retries == 0` executes exactly once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        endpoint: &str,
        method: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ClientError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, endpoint, method, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is consumed per send; clone for each attempt.
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{endpoint}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, endpoint, method, url).await;
            };

            match Self::execute_request(req, endpoint, method, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        endpoint,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::NetworkError {
            endpoint: endpoint.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }

    /// Parse a response body leniently.
    ///
    /// A body that is not valid JSON is wrapped as `{"raw": "<text>"}` rather
    /// than failing the request; missing per-page structure downgrades to an
    /// empty record set further up the pipeline.
    pub fn parse_lenient(response_text: &str) -> Value {
        if response_text.is_empty() {
            return Value::Null;
        }
        match serde_json::from_str(response_text) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "[http] Response body is not JSON ({e}), keeping raw text: {}",
                    truncate_for_log(response_text)
                );
                json!({ "raw": response_text })
            }
        }
    }

    /// Extract a human-readable failure message from an error response body.
    ///
    /// The upstream API reports errors under a `message` key that may be a
    /// single string or a list of strings (joined with commas here). Falls
    /// back to a generic status line when neither is present.
    pub fn error_message(body: &Value, status: u16) -> String {
        match body.get("message") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Array(parts)) => {
                let joined: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
                if joined.is_empty() {
                    format!("Request failed ({status}).")
                } else {
                    joined.join(", ")
                }
            }
            _ => format!("Request failed ({status})."),
        }
    }
}

/// Whether an error is worth retrying.
///
/// Transport failures, timeouts, and rate limiting qualify; a structured
/// upstream rejection does not.
fn is_retryable(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::NetworkError { .. }
            | ClientError::Timeout { .. }
            | ClientError::RateLimited { .. }
    )
}

/// Compute the delay before the next retry attempt.
///
/// Uses the server-provided `retry_after` (capped at 30s) for rate limiting,
/// exponential backoff otherwise.
fn retry_delay(error: &ClientError, attempt: u32) -> Duration {
    if let ClientError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, ... capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}

/// Truncate a string for log output, keeping char boundaries intact.
fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_LIMIT {
        return s.to_string();
    }
    let mut cut = LOG_BODY_LIMIT;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}
