//! API client for the office routes.
//!
//! Every operation decodes the `{code, message, data?}` envelope and maps
//! failures through [`ClientError::from_status`], so create, update and
//! delete report errors the same way.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::errors::{Action, ClientError};
use crate::models::{Envelope, OfficeBody, OfficeRecord};
use crate::transport::{ApiReply, ApiRequest, Transport};

/// Typed client over any [`Transport`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET /offices
    pub async fn fetch_offices(&self) -> Result<Vec<OfficeRecord>, ClientError> {
        let envelope: Envelope<Vec<OfficeRecord>> = self
            .call(Action::Fetch, ApiRequest::get("/offices"), None)
            .await?;
        envelope
            .data
            .ok_or_else(|| ClientError::transport(Action::Fetch, "response carried no offices"))
    }

    /// POST /office
    pub async fn add_office(&self, body: &OfficeBody) -> Result<OfficeRecord, ClientError> {
        let request = ApiRequest::post("/office", body)
            .map_err(|e| ClientError::transport(Action::Add, e))?;
        let envelope: Envelope<OfficeRecord> = self.call(Action::Add, request, None).await?;
        envelope
            .data
            .ok_or_else(|| ClientError::transport(Action::Add, "response carried no office"))
    }

    /// PUT /office/{id}
    pub async fn update_office(&self, id: &str, body: &OfficeBody) -> Result<String, ClientError> {
        let request = ApiRequest::put(office_path(id), body)
            .map_err(|e| ClientError::transport(Action::Update, e))?;
        let envelope: Envelope<serde_json::Value> =
            self.call(Action::Update, request, Some(id)).await?;
        Ok(envelope.message)
    }

    /// DELETE /office/{id}
    pub async fn delete_office(&self, id: &str) -> Result<String, ClientError> {
        let request = ApiRequest::delete(office_path(id));
        let envelope: Envelope<serde_json::Value> =
            self.call(Action::Delete, request, Some(id)).await?;
        Ok(envelope.message)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        action: Action,
        request: ApiRequest,
        id: Option<&str>,
    ) -> Result<Envelope<T>, ClientError> {
        let reply = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("{} request failed: {}", action.as_str(), e);
            ClientError::transport(action, e)
        })?;

        if !reply.is_success() {
            let message = error_message(&reply);
            tracing::debug!(status = reply.status, "{} rejected: {}", action.as_str(), message);
            return Err(ClientError::from_status(action, reply.status, id, &message));
        }

        let envelope: Envelope<T> = serde_json::from_slice(&reply.body)
            .map_err(|e| ClientError::transport(action, format!("malformed response: {}", e)))?;

        // An envelope can still carry a failure code under a 200 status.
        if envelope.code >= 400 {
            return Err(ClientError::from_status(
                action,
                envelope.code,
                id,
                &envelope.message,
            ));
        }

        Ok(envelope)
    }
}

/// `/office/{id}` with the id encoded as a single path segment.
fn office_path(id: &str) -> String {
    format!("/office/{}", urlencoding::encode(id))
}

fn error_message(reply: &ApiReply) -> String {
    match serde_json::from_slice::<Envelope<serde_json::Value>>(&reply.body) {
        Ok(envelope) => envelope.message,
        Err(_) => String::from_utf8_lossy(&reply.body).trim().to_string(),
    }
}
