use crate::error::{ImageGenError, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

/// One JSON POST to a provider endpoint. Implementations perform a single
/// attempt; retrying is the caller's business.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, endpoint: &str, api_key: &SecretString, body: &Value)
        -> Result<Value>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        api_key: &SecretString,
        body: &Value,
    ) -> Result<Value> {
        log::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| ImageGenError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::debug!("Error response body ({}): {}", status, error_text);
            return Err(ImageGenError::http_status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ImageGenError::NetworkFailure {
                status: Some(status.as_u16()),
                message: format!("Invalid JSON body: {}", e),
            })
    }
}
