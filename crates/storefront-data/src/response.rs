//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response with a fully buffered body.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    fn make_response_with_headers(
        status: u16,
        headers: Vec<(&str, &str)>,
        body: &[u8],
    ) -> Response {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Response::new(status, headers, body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Rating {
            rate: f64,
            count: u64,
        }

        let resp = make_response(200, br#"{"rate": 3.9, "count": 120}"#);
        let data: Rating = resp.json().unwrap();
        assert_eq!(data, Rating { rate: 3.9, count: 120 });
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"not json");
        let result: Result<Vec<String>, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let resp = make_response_with_headers(200, vec![("Content-Type", "application/json")], b"");
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_response_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());

        match make_response(503, b"down").error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
