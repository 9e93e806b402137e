/*!
 * Google Translate web endpoint client.
 *
 * Talks to the same unauthenticated `translate_a/single` endpoint the
 * popular client libraries use. Responses come back as deeply nested JSON
 * arrays rather than objects, so parsing walks `serde_json::Value` and
 * concatenates the translated segments.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Endpoint used by the web clients
const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Desktop user agent; the endpoint rejects obviously non-browser clients
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Client for the Google Translate web API
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for making requests
    client: Client,
    /// Request timeout in seconds
    timeout_secs: u64,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl GoogleTranslate {
    /// Create a client with the given request timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            timeout_secs,
            max_retries: 3,
            backoff_base_ms: 500,
        }
    }

    /// Create a client with explicit retry settings
    pub fn with_retries(timeout_secs: u64, max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base_ms,
            ..Self::new(timeout_secs)
        }
    }

    async fn request_once(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimitExceeded(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        extract_translation(&body)
    }
}

/// Concatenate the translated segments out of the nested-array response.
///
/// The payload shape is `[[ [segment, original, ...], ... ], ...]`; the
/// translation is the first element of each inner entry of `body[0]`.
fn extract_translation(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(part);
        }
    }
    Ok(translated)
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay_ms = self.backoff_base_ms * 2u64.pow(attempt - 1);
                debug!("Retrying engine request in {} ms (attempt {})", delay_ms, attempt + 1);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            match self.request_once(text, source, target).await {
                Ok(translated) => return Ok(translated),
                // Client-side API errors won't get better on retry
                Err(e @ ProviderError::ApiError { status_code, .. }) if status_code < 500 => {
                    error!("Engine rejected request: {}", e);
                    return Err(e);
                }
                Err(e) if attempt >= self.max_retries => {
                    error!(
                        "Engine request failed after {} attempts: {}",
                        attempt + 1,
                        e
                    );
                    return Err(e);
                }
                Err(e) => {
                    error!(
                        "Engine request failed: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                }
            }
            attempt += 1;
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.request_once("hello", "en", "es").await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
