use std::{sync::Arc, time::Duration};

use reqwest::{Client, header::ACCEPT};
use rocket::async_trait;
use thiserror::Error;

use crate::types::ForwardPayload;

pub type SharedForwarder = Arc<dyn Forwarder>;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        // The destination URL is as sensitive as the secret.
        ForwardError::Transport(err.without_url())
    }
}

/// Delivers a selection to the external webhook.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, url: &str, payload: &ForwardPayload<'_>) -> Result<(), ForwardError>;
}

/// Forwards over HTTP with a single shared client.
pub struct HttpForwarder {
    client: Client,
}

impl HttpForwarder {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, url: &str, payload: &ForwardPayload<'_>) -> Result<(), ForwardError> {
        // `.json` sets Content-Type. The response, status included, is not inspected.
        self.client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        Ok(())
    }
}
