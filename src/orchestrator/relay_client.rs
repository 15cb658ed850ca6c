use std::sync::Arc;

use crate::errors::{RelayError, SubmitError};
use crate::models::FormData;
use crate::relay::{RelayResponse, RelayService};

use super::Relay;

/// Relays straight into the in-process relay service.
pub struct LocalRelay {
    service: Arc<RelayService>,
}

impl LocalRelay {
    pub fn new(service: Arc<RelayService>) -> Self {
        Self { service }
    }
}

impl Relay for LocalRelay {
    async fn relay(&self, payload: &FormData) -> Result<(), SubmitError> {
        self.service
            .accept(payload.clone())
            .await
            .map(|_| ())
            .map_err(|e| {
                if let RelayError::Internal(detail) = &e {
                    log::error!("Relay internal error: {detail}");
                }
                SubmitError::Rejected(e.public_message().to_string())
            })
    }
}

/// Relays to a relay endpoint over HTTP.
pub struct HttpRelay {
    client: reqwest::Client,
    url: String,
}

impl HttpRelay {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Relay for HttpRelay {
    async fn relay(&self, payload: &FormData) -> Result<(), SubmitError> {
        let resp = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        log::info!("Relay response status: {}", resp.status());

        let body: RelayResponse = resp
            .json()
            .await
            .map_err(|e| SubmitError::Network(format!("unreadable relay response: {e}")))?;

        if body.success {
            Ok(())
        } else {
            Err(SubmitError::Rejected(
                body.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

/// The relay picked at startup.
pub enum RelayClient {
    Local(LocalRelay),
    Http(HttpRelay),
}

impl Relay for RelayClient {
    async fn relay(&self, payload: &FormData) -> Result<(), SubmitError> {
        match self {
            RelayClient::Local(relay) => relay.relay(payload).await,
            RelayClient::Http(relay) => relay.relay(payload).await,
        }
    }
}
