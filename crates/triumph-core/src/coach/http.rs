//! Remote classifier over HTTP.
//!
//! POSTs the request as JSON and expects `{message, sentiment}` back.

use reqwest::Client;

use super::classifier::SentimentClassifier;
use super::types::{ClassifierRequest, CoachMessage};
use crate::error::ClassifierError;
use crate::storage::ClassifierConfig;

pub struct HttpClassifier {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Build from config, reading the bearer token from the configured
    /// environment variable. Returns `None` when no endpoint is set.
    pub fn from_config(config: &ClassifierConfig) -> Option<Self> {
        if config.endpoint.trim().is_empty() {
            return None;
        }
        let token = std::env::var(&config.api_key_env)
            .ok()
            .filter(|t| !t.is_empty());
        Some(Self::new(config.endpoint.trim()).with_token(token))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SentimentClassifier for HttpClassifier {
    async fn classify(&self, request: &ClassifierRequest) -> Result<CoachMessage, ClassifierError> {
        if self.endpoint.is_empty() {
            return Err(ClassifierError::NotConfigured);
        }

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let message: CoachMessage =
            serde_json::from_str(&text).map_err(|e| ClassifierError::Malformed(e.to_string()))?;
        if message.message.trim().is_empty() {
            return Err(ClassifierError::Malformed("empty message".into()));
        }
        Ok(message)
    }
}
