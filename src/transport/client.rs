use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::Envelope;

/// HTTP method used by the managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request handed to the injected [`HttpClient`].
///
/// JSON bodies imply a `Content-Type: application/json` header.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::with_body(Method::Post, url.into(), body)
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::with_body(Method::Put, url.into(), body)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Delete,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_body(method: Method, url: String, body: Value) -> Self {
        HttpRequest {
            method,
            url,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

/// Error type for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response (connection refused, timeout, …).
    Network(String),
    /// A response arrived but was not a valid envelope.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {}", msg),
            TransportError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// The fetch-like capability injected into every manager.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a request and decode the response envelope.
    async fn request(&self, request: HttpRequest) -> Result<Envelope, TransportError>;
}
