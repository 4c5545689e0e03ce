/*!
 * Shared HTTP call primitives for the provider adapters.
 *
 * Every primitive accepts a cancellation token. Triggering it aborts the
 * underlying network operation as soon as the runtime allows and surfaces
 * `ProviderError::Cancelled`, which the dispatcher keeps distinguishable
 * from provider-reported failures.
 */

use std::time::Duration;

use futures_util::StreamExt;
use log::error;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::errors::ProviderError;

/// Build an HTTP client with the given request timeout
pub fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

/// GET with query parameters, returning the raw response body
pub async fn get_with_query(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
    cancel: &CancellationToken,
) -> Result<String, ProviderError> {
    if cancel.is_cancelled() {
        return Err(ProviderError::Cancelled);
    }

    let request = client.get(url).query(params).send();
    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
        result = request => result.map_err(|e| ProviderError::Transport(e.to_string()))?,
    };

    read_body(response, cancel).await
}

/// POST a JSON body with custom headers, returning the raw response body
pub async fn post_json(
    client: &Client,
    url: &str,
    body: &serde_json::Value,
    headers: &[(&str, String)],
    cancel: &CancellationToken,
) -> Result<String, ProviderError> {
    if cancel.is_cancelled() {
        return Err(ProviderError::Cancelled);
    }

    let mut builder = client.post(url).json(body);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }

    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
        result = builder.send() => result.map_err(|e| ProviderError::Transport(e.to_string()))?,
    };

    read_body(response, cancel).await
}

/// POST a JSON body and read the response progressively
///
/// `on_fragment` receives each network-level chunk decoded as text, in
/// arrival order. Cancellation is checked at every fragment boundary; once
/// cancelled no further fragments are delivered.
pub async fn post_streaming(
    client: &Client,
    url: &str,
    body: &serde_json::Value,
    headers: &[(&str, String)],
    on_fragment: &mut (dyn FnMut(&str) + Send),
    cancel: &CancellationToken,
) -> Result<(), ProviderError> {
    if cancel.is_cancelled() {
        return Err(ProviderError::Cancelled);
    }

    let mut builder = client.post(url).json(body);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }

    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
        result = builder.send() => result.map_err(|e| ProviderError::Transport(e.to_string()))?,
    };

    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("Streaming API error ({}): {}", status, message);
        return Err(ProviderError::Api {
            status_code: status.as_u16(),
            message,
        });
    }

    let mut stream = response.bytes_stream();
    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
            next = stream.next() => next,
        };
        match chunk {
            Some(Ok(bytes)) => {
                let fragment = String::from_utf8_lossy(&bytes);
                on_fragment(&fragment);
            }
            Some(Err(e)) => return Err(ProviderError::Transport(e.to_string())),
            None => return Ok(()),
        }
    }
}

/// Check status and drain the response body, observing cancellation
async fn read_body(
    response: reqwest::Response,
    cancel: &CancellationToken,
) -> Result<String, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("API error ({}): {}", status, message);
        return Err(ProviderError::Api {
            status_code: status.as_u16(),
            message,
        });
    }

    tokio::select! {
        _ = cancel.cancelled() => Err(ProviderError::Cancelled),
        body = response.text() => body.map_err(|e| ProviderError::Transport(e.to_string())),
    }
}
