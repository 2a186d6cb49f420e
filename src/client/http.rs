use reqwest::{Client, StatusCode};
use rocket::async_trait;

use super::{Transport, TransportError};
use crate::types::WebhookPayload;

/// Posts submissions to a running server.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/webhook", server.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: &WebhookPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Failed(format!("HTTP request failed: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(TransportError::Unauthorized),
            status => Err(TransportError::Failed(format!("Server returned status: {status}"))),
        }
    }
}
