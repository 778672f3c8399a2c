//! HTTP client for the arithmetic service
//!
//! Routes:
//! - `GET {base}/{operation}?operand1=..&operand2=..` → `{"result": n}`
//! - `GET {base}/history` → array of history records
//! - `POST {base}/history/reset`

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{ArithmeticService, CalculationResponse, ServiceError, ServiceResult};
use crate::config::ClientConfig;
use crate::core::{format_number, HistoryEntry, Operation};

/// `reqwest`-backed implementation of [`ArithmeticService`]
#[derive(Debug, Clone)]
pub struct HttpArithmeticService {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpArithmeticService {
    /// Creates a client from configuration.
    ///
    /// The base URL is validated up front; a timeout is only applied when
    /// one is configured.
    pub fn new(config: &ClientConfig) -> ServiceResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Self::with_client(config, client)
    }

    /// Creates a client with a custom `reqwest::Client`
    pub fn with_client(config: &ClientConfig, client: reqwest::Client) -> ServiceResult<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            token: config.token.clone(),
            client,
        })
    }

    /// Returns the base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> ServiceResult<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ServiceResult<T> {
        let response = self.authorize(request).send().await?;
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ArithmeticService for HttpArithmeticService {
    async fn calculate(
        &self,
        operation: Operation,
        operand1: f64,
        operand2: f64,
    ) -> ServiceResult<f64> {
        let url = self.url(operation.path());
        tracing::info!(
            operation = operation.path(),
            operand1,
            operand2,
            "requesting calculation"
        );

        let request = self.client.get(&url).query(&[
            ("operand1", format_number(operand1)),
            ("operand2", format_number(operand2)),
        ]);
        let response: CalculationResponse = self.get_json(request).await?;
        Ok(response.result)
    }

    async fn history(&self) -> ServiceResult<Vec<HistoryEntry>> {
        tracing::info!("requesting history");
        let request = self.client.get(self.url("history"));
        // An empty history may be encoded as `null`
        let entries: Option<Vec<HistoryEntry>> = self.get_json(request).await?;
        Ok(entries.unwrap_or_default())
    }

    async fn reset_history(&self) -> ServiceResult<()> {
        tracing::info!("resetting history");
        let request = self.authorize(self.client.post(self.url("history/reset")));
        let response = request.send().await?;
        Self::read_body(response).await.map(|_| ())
    }
}
