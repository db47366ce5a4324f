use crate::adapters::parse_envelope;
use crate::domain::model::{ApiInput, ApiResponse};
use crate::domain::ports::Interface;
use crate::utils::error::{HarnessError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Runs commands against the server's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpInterface {
    client: Client,
    url: String,
}

impl HttpInterface {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Interface for HttpInterface {
    async fn run_input(&self, input: &ApiInput) -> Result<ApiResponse> {
        tracing::debug!("POST {} app={} action={}", self.url, input.app, input.action);

        let response = self
            .client
            .post(&self.url)
            .query(&[("app", input.app.as_str()), ("action", input.action.as_str())])
            .form(&input.params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);
        let body = response.text().await?;

        parse_envelope(&body).map_err(|e| match e {
            HarnessError::InterfaceError { message } => HarnessError::InterfaceError {
                message: format!("HTTP {}: {}", status, message),
            },
            other => other,
        })
    }
}
