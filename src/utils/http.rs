use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on a single back-off sleep.
const MAX_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("network request failed after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// retries a request closure with exponential backoff starting at `base_delay`
/// Retries on:
/// - Network errors
/// - 429 Too Many Requests (respects Retry-After header)
/// - 5xx Server Errors
///
/// Returns the last Response (even if error status) or the last network error.
pub async fn request_with_retry<F, Fut>(
    mut task: F,
    max_retries: u32,
    base_delay: Duration,
) -> Result<reqwest::Response, HttpError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    let mut delay = base_delay;

    loop {
        attempt += 1;
        match task().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || attempt > max_retries {
                    return Ok(response);
                }

                if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    let retry_delay = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(delay)
                        .min(MAX_DELAY);

                    warn!(
                        "[HTTP] Request failed with status {}, retrying in {:?} (attempt {}/{})",
                        status, retry_delay, attempt, max_retries
                    );
                    tokio::time::sleep(retry_delay).await;
                    delay = std::cmp::min(delay * 2, MAX_DELAY);
                    continue;
                }

                // Other client errors (400, 401, 404) are permanent
                return Ok(response);
            }
            Err(e) => {
                if attempt > max_retries {
                    return Err(HttpError::Network {
                        attempts: attempt,
                        message: e.to_string(),
                    });
                }
                warn!(
                    "[HTTP] Network error: {}, retrying in {:?} (attempt {}/{})",
                    e, delay, attempt, max_retries
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, MAX_DELAY);
            }
        }
    }
}

/// [`request_with_retry`], then require a success status and decode the
/// JSON body into `T`. A failing status carries the response text.
pub async fn fetch_json_with_retry<T, F, Fut>(
    task: F,
    max_retries: u32,
    base_delay: Duration,
) -> Result<T, HttpError>
where
    T: DeserializeOwned,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let response = request_with_retry(task, max_retries, base_delay).await?;
    let status = response.status();
    debug!(
        "[HTTP] status={} request-id={:?}",
        status,
        response.headers().get("x-request-id")
    );
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(HttpError::Status { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| HttpError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn call(server: &MockServer, retries: u32) -> (reqwest::Response, u32) {
        let client = reqwest::Client::new();
        let url = format!("{}/classify", server.uri());
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);
        let response = request_with_retry(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                let client = client.clone();
                let url = url.clone();
                async move { client.post(&url).send().await }
            },
            retries,
            Duration::from_millis(5),
        )
        .await
        .unwrap();
        (response, attempts.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn retries_server_errors_until_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/classify"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (response, attempts) = call(&server, 2).await;
        assert_eq!(response.status(), 503);
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/classify"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (response, attempts) = call(&server, 3).await;
        assert_eq!(response.status(), 401);
        assert_eq!(attempts, 1);
    }

    async fn fetch(url: String, retries: u32) -> Result<serde_json::Value, HttpError> {
        let client = reqwest::Client::new();
        fetch_json_with_retry(
            move || {
                let client = client.clone();
                let url = url.clone();
                async move { client.get(&url).send().await }
            },
            retries,
            Duration::from_millis(5),
        )
        .await
    }

    #[tokio::test]
    async fn fetch_decodes_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scores"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })),
            )
            .mount(&server)
            .await;

        let value = fetch(format!("{}/scores", server.uri()), 0).await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn fetch_reports_status_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such model"))
            .mount(&server)
            .await;

        match fetch(format!("{}/scores", server.uri()), 2).await.unwrap_err() {
            HttpError::Status { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "no such model");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = fetch(format!("{}/scores", server.uri()), 0).await.unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_counts_network_attempts() {
        let err = fetch("http://127.0.0.1:9/scores".to_string(), 1)
            .await
            .unwrap_err();
        match err {
            HttpError::Network { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/classify"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/classify"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (response, attempts) = call(&server, 2).await;
        assert!(response.status().is_success());
        assert_eq!(attempts, 2);
    }
}
