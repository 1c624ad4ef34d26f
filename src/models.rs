use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single HTTP request description.
///
/// Header order is preserved so the generated curl command and the saved
/// file stay reproducible. `timestamp` is stamped by the store when the
/// request is saved; a request without one is transient and lives only for
/// the current session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub name: String,
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Request {
    /// Create a transient request. The URL must be non-empty; everything
    /// else is passed through untouched.
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Result<Self> {
        let url = url.into();
        ensure!(!url.is_empty(), "request URL must not be empty");
        Ok(Request {
            name: String::new(),
            url,
            method: method.into(),
            headers: IndexMap::new(),
            body: None,
            timestamp: None,
        })
    }

    /// True until the store stamps a timestamp.
    pub fn is_transient(&self) -> bool {
        self.timestamp.is_none()
    }

    /// Body text, treating an empty string the same as no body.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    /// Copy for re-execution. Saved records are never edited in place;
    /// replay works on a fresh transient copy.
    pub fn transient_copy(&self) -> Request {
        Request {
            timestamp: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_url() {
        assert!(Request::new("", "GET").is_err());
    }

    #[test]
    fn empty_body_counts_as_none() {
        let mut request = Request::new("http://example.com", "POST").unwrap();
        assert_eq!(request.body_text(), None);
        request.body = Some(String::new());
        assert_eq!(request.body_text(), None);
        request.body = Some("payload".into());
        assert_eq!(request.body_text(), Some("payload"));
    }

    #[test]
    fn transient_copy_clears_timestamp_only() {
        let mut request = Request::new("http://example.com", "PUT").unwrap();
        request.name = "original".into();
        request.headers.insert("Accept".into(), "*/*".into());
        request.body = Some("data".into());
        request.timestamp = Some(Utc::now());

        let copy = request.transient_copy();
        assert!(copy.is_transient());
        assert_eq!(copy.name, request.name);
        assert_eq!(copy.url, request.url);
        assert_eq!(copy.method, request.method);
        assert_eq!(copy.headers, request.headers);
        assert_eq!(copy.body, request.body);
    }

    #[test]
    fn serde_round_trip_keeps_header_order() {
        let mut request = Request::new("http://example.com", "GET").unwrap();
        request.headers.insert("Z-First".into(), "1".into());
        request.headers.insert("A-Second".into(), "2".into());
        request.headers.insert("M-Third".into(), "3".into());

        let json = serde_json::to_string(&request).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
        let keys: Vec<&String> = back.headers.keys().collect();
        assert_eq!(keys, ["Z-First", "A-Second", "M-Third"]);
    }
}
