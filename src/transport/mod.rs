//! Transport seam between the API client and a server.
//!
//! `MockTransport` drives the office router in process with no network and
//! no latency. `HttpTransport` talks to a running server. The client only
//! sees the `Transport` trait, so switching backends is a wiring change.

mod http;
mod mock;

pub use http::*;
pub use mock::*;

use async_trait::async_trait;
use axum::http::Method;
use serde::Serialize;

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the server root, e.g. `/office/{id}`
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, TransportError> {
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            body: Some(encode(body)?),
        })
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, TransportError> {
        Ok(Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(encode(body)?),
        })
    }
}

/// Raw answer from the server.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(format!("Network error: {}", err))
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError(format!("JSON error: {}", err))
    }
}

/// Sends requests somewhere that speaks the office routes.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError>;
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, TransportError> {
    Ok(serde_json::to_value(body)?)
}
