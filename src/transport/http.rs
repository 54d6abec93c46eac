//! Transport for a real server reachable over HTTP.

use async_trait::async_trait;
use reqwest::Client;

use super::{ApiReply, ApiRequest, Transport, TransportError};

/// Sends requests to `base_url` with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        let mut builder = self
            .client
            .request(request.method, self.url(&request.path));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(ApiReply {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = HttpTransport::new("http://127.0.0.1:8080/");

        assert_eq!(transport.url("/offices"), "http://127.0.0.1:8080/offices");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is never served in test environments.
        let transport = HttpTransport::new("http://127.0.0.1:9");

        let result = transport.send(ApiRequest::get("/offices")).await;

        assert!(result.is_err());
    }
}
