//! Transport port.
//!
//! A minimal blocking request/response contract. Implementations can be
//! real HTTP clients, scripted stubs, etc.

use std::sync::Arc;

/// HTTP methods used by the Pix API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A request relative to the service base URL.
///
/// `path` holds raw, unencoded segments; the transport is responsible for
/// percent-encoding them, so keys like `+5511987654321` or `ana@x.com`
/// can be passed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a GET request for the given path segments.
    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: HttpMethod::Get,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request carrying a JSON body.
    pub fn post_json<I, S>(path: I, body: serde_json::Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: HttpMethod::Post,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Returns the path as a `/`-joined string, without encoding.
    pub fn path_string(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

/// A response as seen by the client: status code and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the Pix domain: the service could not be reached or
/// answered with something the client cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Port trait for the blocking transport used by the Pix client.
pub trait PixTransport: Send + Sync {
    /// Sends one request and returns the response, whatever its status.
    ///
    /// Only failures to obtain a response are errors here; status codes are
    /// interpreted by the caller.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: PixTransport + ?Sized> PixTransport for Arc<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: PixTransport + ?Sized> PixTransport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let req = HttpRequest::get(["search"]).with_query("key", "ana@example.com");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path_string(), "/search");
        assert_eq!(req.query, vec![("key".to_string(), "ana@example.com".to_string())]);

        let req = HttpRequest::post_json(["transactions"], serde_json::json!({"a": 1}));
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.body.is_some());
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
