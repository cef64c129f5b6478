//! HTTP implementation of the search and template endpoints

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::http_client::{HttpUtils, create_http_client};
use crate::traits::{RecordSearch, TemplateSource};
use crate::types::SearchPayload;

/// Default base URL of the record search API.
pub const DEFAULT_BASE_URL: &str = "https://services.leadconnectorhq.com";
/// Default API version header value.
pub const DEFAULT_API_VERSION: &str = "2021-07-28";

/// Credentials and addressing for the record search API.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    /// Bearer token for the `Authorization` header.
    pub api_token: String,
    /// Identifier of the object type/collection being queried.
    pub schema_key: String,
    /// API base URL (trailing slash tolerated).
    pub base_url: String,
    /// Value for the `Version` header.
    pub api_version: String,
}

/// HTTP client for the record search and template endpoints.
///
/// One instance per widget; holds the reqwest client (with connect/request
/// timeouts) and the resolved credentials. Retries are off by default to
/// keep a single request in flight per page, matching the widget's
/// sequential fetch model.
pub struct SearchClient {
    client: reqwest::Client,
    credentials: ApiCredentials,
    max_retries: u32,
}

impl SearchClient {
    /// Create a client with the given credentials and no retries.
    #[must_use]
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            client: create_http_client(),
            credentials,
            max_retries: 0,
        }
    }

    /// Enable transient-failure retries (exponential backoff, capped).
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Full URL of the search endpoint for the configured schema key.
    fn search_url(&self) -> String {
        format!(
            "{}/objects/{}/records/search",
            self.credentials.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.credentials.schema_key)
        )
    }
}

#[async_trait]
impl RecordSearch for SearchClient {
    async fn search(&self, payload: &SearchPayload) -> Result<Value> {
        let url = self.search_url();
        let builder = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_token),
            )
            .header("Version", &self.credentials.api_version)
            .header("Accept", "application/json")
            .json(payload);

        let (status, text) =
            HttpUtils::execute_request_with_retry(builder, "search", "POST", &url, self.max_retries)
                .await?;

        let body = HttpUtils::parse_lenient(&text);

        if !(200..300).contains(&status) {
            let message = HttpUtils::error_message(&body, status);
            let err = ClientError::RequestFailed {
                endpoint: "search".to_string(),
                status,
                message,
            };
            if err.is_expected() {
                log::warn!("{err}");
            } else {
                log::error!("{err}");
            }
            return Err(err);
        }

        Ok(body)
    }
}

#[async_trait]
impl TemplateSource for SearchClient {
    async fn fetch_template(&self, url: &str) -> Result<String> {
        let builder = self.client.get(url);
        let (status, text) =
            HttpUtils::execute_request_with_retry(builder, "template", "GET", url, self.max_retries)
                .await?;

        if !(200..300).contains(&status) {
            return Err(ClientError::RequestFailed {
                endpoint: "template".to_string(),
                status,
                message: format!("Template request failed ({status})."),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ApiCredentials {
        ApiCredentials {
            api_token: "tok".to_string(),
            schema_key: "custom_objects.service_status_events".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    #[test]
    fn search_url_encodes_schema_key() {
        let client = SearchClient::new(ApiCredentials {
            schema_key: "custom objects/events".to_string(),
            ..credentials()
        });
        assert_eq!(
            client.search_url(),
            "https://services.leadconnectorhq.com/objects/custom%20objects%2Fevents/records/search"
        );
    }

    #[test]
    fn search_url_trims_trailing_slash() {
        let client = SearchClient::new(ApiCredentials {
            base_url: "https://example.com/".to_string(),
            ..credentials()
        });
        assert_eq!(
            client.search_url(),
            "https://example.com/objects/custom_objects.service_status_events/records/search"
        );
    }
}
