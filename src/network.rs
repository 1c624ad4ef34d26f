//! HTTP execution - sends one request and normalizes the result

use std::time::Instant;

use tracing::info;

use crate::models::Request;

/// Response data captured from a completed round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseDetail {
    pub status: u16,
    pub status_text: String,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub time_ms: u64,
}

/// Normalized result of executing a request.
///
/// Only 2xx statuses count as Success; any other status is a Failure that
/// still carries the server's response so the caller can show the
/// diagnostic payload. Transport failures carry no response.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(ResponseDetail),
    Failure {
        message: String,
        response: Option<ResponseDetail>,
    },
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Execute a request and return the normalized outcome.
///
/// Exactly one attempt, no retries. Headers with empty values are skipped;
/// a non-empty body is sent for any method (the POST/PUT rule only applies
/// to the curl preview).
pub async fn execute(client: &reqwest::Client, request: &Request) -> Outcome {
    let start = Instant::now();

    let method = match reqwest::Method::from_bytes(request.method.as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return Outcome::Failure {
                message: format!("invalid HTTP method: {}", request.method),
                response: None,
            }
        }
    };

    let mut builder = client.request(method, &request.url);
    for (key, value) in &request.headers {
        if !value.is_empty() {
            builder = builder.header(key.as_str(), value.as_str());
        }
    }
    if let Some(body) = request.body_text() {
        builder = builder.body(body.to_string());
    }

    info!(url = %request.url, method = %request.method, "executing request");

    match builder.send().await {
        Ok(resp) => {
            let status = resp.status();
            let headers = resp
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();

            match resp.text().await {
                Ok(body) => {
                    let detail = ResponseDetail {
                        status: status.as_u16(),
                        status_text: status.canonical_reason().unwrap_or("").to_string(),
                        headers,
                        body: format_body(body),
                        time_ms: start.elapsed().as_millis() as u64,
                    };
                    info!(status = detail.status, time_ms = detail.time_ms, "request completed");
                    if status.is_success() {
                        Outcome::Success(detail)
                    } else {
                        Outcome::Failure {
                            message: format!(
                                "server responded with {} {}",
                                detail.status, detail.status_text
                            ),
                            response: Some(detail),
                        }
                    }
                }
                Err(e) => Outcome::Failure {
                    message: format!("Error reading body: {}", e),
                    response: None,
                },
            }
        }
        Err(e) => {
            let message = if e.is_timeout() {
                "Request timed out (30s)".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            info!(url = %request.url, message = %message, "request failed");
            Outcome::Failure {
                message,
                response: None,
            }
        }
    }
}

/// Pretty-print bodies that parse as JSON, pass everything else through.
fn format_body(body: String) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
        serde_json::to_string_pretty(&json).unwrap_or(body)
    } else {
        body
    }
}
