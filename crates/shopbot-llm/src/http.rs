//! Shared request loop for the HTTP providers

use crate::LlmError;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::warn;

/// Send a request, retrying transport errors, 429 and non-404 failures
///
/// `build` is called once per attempt. A 404 means the model does not exist
/// and is returned immediately. Waits 1s, 2s, 4s... between attempts.
pub(crate) async fn send_with_retry<F>(
    provider: &str,
    model: &str,
    max_attempts: u32,
    build: F,
) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        match build().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                } else if status == StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                } else if status == StatusCode::TOO_MANY_REQUESTS {
                    last_error = Some(LlmError::RateLimitExceeded);
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_attempts {
            warn!("{} attempt {} failed, retrying", provider, attempts);
            let delay = Duration::from_secs(2u64.saturating_pow(attempts - 1));
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| LlmError::Communication("Max attempts exceeded".to_string())))
}
