use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::multipart::Form;
use serde::Serialize;
use tracing::debug;

use crate::error::ProviderError;

/// Sends a JSON body once. No retries.
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    payload: &T,
    timeout_secs: Option<u64>,
) -> Result<reqwest::Response, ProviderError> {
    let request = client.post(url).bearer_auth(api_key).json(payload);
    send(request, url, timeout_secs).await
}

/// Sends a multipart form once. No retries.
pub(crate) async fn post_multipart(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    form: Form,
    timeout_secs: Option<u64>,
) -> Result<reqwest::Response, ProviderError> {
    let request = client.post(url).bearer_auth(api_key).multipart(form);
    send(request, url, timeout_secs).await
}

async fn send(
    mut request: RequestBuilder,
    url: &str,
    timeout_secs: Option<u64>,
) -> Result<reqwest::Response, ProviderError> {
    if let Some(timeout_secs) = timeout_secs {
        request = request.timeout(Duration::from_secs(timeout_secs));
    }

    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Request {
            endpoint: url.to_string(),
            source,
        })?;

    let status = response.status();
    debug!(%status, url, "received response");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Api { status, body })
}
