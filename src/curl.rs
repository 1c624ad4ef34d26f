use anyhow::{anyhow, ensure, Result};
use indexmap::IndexMap;

use crate::models::Request;

/// Format a request as a shell-ready cURL command.
///
/// Every value is wrapped in single quotes verbatim; embedded single quotes
/// are not escaped. Headers with an empty value are skipped. The body clause
/// is only emitted for POST and PUT, matching curl usage conventions, even
/// though the executor will send a body for any method.
pub fn to_curl(request: &Request) -> String {
    let mut parts = vec![format!("curl -X {} '{}'", request.method, request.url)];

    for (key, value) in &request.headers {
        if !value.is_empty() {
            parts.push(format!("-H '{}: {}'", key, value));
        }
    }

    if matches!(request.method.as_str(), "POST" | "PUT") {
        if let Some(body) = request.body_text() {
            parts.push(format!("-d '{}'", body));
        }
    }

    parts.join(" \\\n  ")
}

/// Parse a cURL command into a transient Request
pub fn parse_curl(input: &str) -> Result<Request> {
    // Remove line continuations and normalize
    let normalized = input.replace("\\\r\n", " ").replace("\\\n", " ");

    let mut tokens = tokenize(&normalized);

    // Skip 'curl' command if present
    if tokens.first().map(|s| s.as_str()) == Some("curl") {
        tokens.remove(0);
    }

    let mut url = String::new();
    let mut method: Option<String> = None;
    let mut headers: IndexMap<String, String> = IndexMap::new();
    let mut body: Option<String> = None;

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].as_str() {
            "-X" | "--request" => {
                if i + 1 < tokens.len() {
                    method = Some(tokens[i + 1].to_uppercase());
                    i += 1;
                }
            }
            "-H" | "--header" => {
                if i + 1 < tokens.len() {
                    let (key, value) = tokens[i + 1]
                        .split_once(':')
                        .ok_or_else(|| anyhow!("Invalid header format: {}", tokens[i + 1]))?;
                    let key = key.trim();
                    // Don't overwrite duplicate headers
                    if !headers.contains_key(key) {
                        headers.insert(key.to_string(), value.trim().to_string());
                    }
                    i += 1;
                }
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" => {
                if i + 1 < tokens.len() {
                    body = Some(tokens[i + 1].clone());
                    i += 1;
                }
            }
            "--compressed" | "-k" | "--insecure" | "-L" | "--location" | "-s" | "--silent"
            | "-v" | "--verbose" => {
                // Ignored flags
            }
            token => {
                if !token.starts_with('-')
                    && (token.starts_with("http://") || token.starts_with("https://"))
                {
                    url = token.to_string();
                }
            }
        }
        i += 1;
    }

    ensure!(!url.is_empty(), "no URL found in curl command");

    // A body without an explicit method means POST
    let method =
        method.unwrap_or_else(|| if body.is_some() { "POST" } else { "GET" }.to_string());

    Ok(Request {
        name: String::new(),
        url,
        method,
        headers,
        body,
        timestamp: None,
    })
}

/// Tokenize a curl command, respecting quotes
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        match c {
            '\\' if !in_single_quote => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            ' ' | '\t' | '\n' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    tokens.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_request_serializes_to_one_line() {
        let request = Request::new("http://example.com", "GET").unwrap();
        assert_eq!(to_curl(&request), "curl -X GET 'http://example.com'");
    }

    #[test]
    fn post_with_header_and_body() {
        let mut request = Request::new("http://x", "POST").unwrap();
        request
            .headers
            .insert("Content-Type".into(), "application/json".into());
        request.body = Some(r#"{"a":1}"#.into());

        assert_eq!(
            to_curl(&request),
            "curl -X POST 'http://x' \\\n  -H 'Content-Type: application/json' \\\n  -d '{\"a\":1}'"
        );
    }

    #[test]
    fn body_only_emitted_for_post_and_put() {
        for method in ["GET", "DELETE", "HEAD"] {
            let mut request = Request::new("http://x", method).unwrap();
            request.body = Some("ignored".into());
            assert!(!to_curl(&request).contains("-d"), "method {}", method);
        }

        let mut request = Request::new("http://x", "PUT").unwrap();
        request.body = Some("sent".into());
        assert!(to_curl(&request).ends_with("-d 'sent'"));
    }

    #[test]
    fn empty_header_values_are_skipped_and_order_kept() {
        let mut request = Request::new("http://x", "GET").unwrap();
        request.headers.insert("B-Header".into(), "two".into());
        request.headers.insert("Skipped".into(), String::new());
        request.headers.insert("A-Header".into(), "one".into());

        assert_eq!(
            to_curl(&request),
            "curl -X GET 'http://x' \\\n  -H 'B-Header: two' \\\n  -H 'A-Header: one'"
        );
    }

    #[test]
    fn parse_simple_get() {
        let curl = "curl https://api.example.com/users";
        let request = parse_curl(curl).unwrap();
        assert_eq!(request.url, "https://api.example.com/users");
        assert_eq!(request.method, "GET");
        assert!(request.is_transient());
    }

    #[test]
    fn parse_post_with_data() {
        let curl = r#"curl -X POST -H "Content-Type: application/json" -d '{"name":"test"}' https://api.example.com/users"#;
        let request = parse_curl(curl).unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"test"}"#));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn parse_infers_post_from_body() {
        let request = parse_curl("curl -d 'x=1' https://api.example.com").unwrap();
        assert_eq!(request.method, "POST");
    }

    #[test]
    fn parse_keeps_first_duplicate_header() {
        let curl = "curl -H 'Accept: application/json' -H 'Accept: text/plain' https://x.dev";
        let request = parse_curl(curl).unwrap();
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn parse_requires_a_url() {
        assert!(parse_curl("curl -X GET").is_err());
    }

    #[test]
    fn parse_handles_line_continuations() {
        let curl = "curl -X PUT 'https://x.dev/item' \\\n  -H 'Accept: */*' \\\n  -d 'v'";
        let request = parse_curl(curl).unwrap();
        assert_eq!(request.method, "PUT");
        assert_eq!(request.url, "https://x.dev/item");
        assert_eq!(request.body.as_deref(), Some("v"));
    }
}
