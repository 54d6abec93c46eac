//! In-process fake server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    Router,
};
use tower::ServiceExt;

use super::{ApiReply, ApiRequest, Transport, TransportError};
use crate::config::Config;
use crate::store::{MemoryStore, RecordStore};
use crate::{create_router, AppState};

/// Serves requests from the office router without opening a socket.
pub struct MockTransport {
    router: Router,
    store: Arc<dyn RecordStore>,
    calls: AtomicU64,
}

impl MockTransport {
    /// Fake server over `store`.
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        let state = AppState {
            store: store.clone(),
            config: Arc::new(config),
        };

        Self {
            router: create_router(state),
            store,
            calls: AtomicU64::new(0),
        }
    }

    /// Fake server over a freshly seeded in-memory store.
    pub fn seeded() -> Self {
        Self::new(Arc::new(MemoryStore::seeded()), Config::default())
    }

    /// The store behind the fake server.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Number of requests served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let mut builder = Request::builder()
            .method(request.method)
            .uri(request.path.as_str());
        let body = match request.body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };
        let http_request = builder
            .body(body)
            .map_err(|e| TransportError(format!("Invalid request: {}", e)))?;

        let response = match self.router.clone().oneshot(http_request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status().as_u16();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| TransportError(format!("Failed to read body: {}", e)))?;

        Ok(ApiReply {
            status,
            body: body.to_vec(),
        })
    }
}
