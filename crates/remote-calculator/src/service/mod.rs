//! The remote arithmetic and history service
//!
//! All arithmetic happens on the other side of this trait. The HTTP
//! implementation talks to the real backend; the scripted implementation
//! replays canned responses for tests and demos.

mod http;
mod scripted;

pub use http::HttpArithmeticService;
pub use scripted::{ScriptedCall, ScriptedService};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::core::{HistoryEntry, Operation};

/// Result type for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from the arithmetic service.
///
/// Callers in this crate do not distinguish between the variants; they exist
/// for logging.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service error {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A scripted service ran out of responses
    #[error("No scripted response for {0}")]
    Unscripted(String),
}

/// Body of a successful calculation response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Value computed by the service
    pub result: f64,
}

/// Remote service performing arithmetic and keeping the operation history
#[async_trait]
pub trait ArithmeticService: Send + Sync {
    /// Applies `operation` to the two operands
    async fn calculate(
        &self,
        operation: Operation,
        operand1: f64,
        operand2: f64,
    ) -> ServiceResult<f64>;

    /// Returns past operations, newest first
    async fn history(&self) -> ServiceResult<Vec<HistoryEntry>>;

    /// Clears the stored history
    async fn reset_history(&self) -> ServiceResult<()>;
}

#[async_trait]
impl<S: ArithmeticService + ?Sized> ArithmeticService for std::sync::Arc<S> {
    async fn calculate(
        &self,
        operation: Operation,
        operand1: f64,
        operand2: f64,
    ) -> ServiceResult<f64> {
        (**self).calculate(operation, operand1, operand2).await
    }

    async fn history(&self) -> ServiceResult<Vec<HistoryEntry>> {
        (**self).history().await
    }

    async fn reset_history(&self) -> ServiceResult<()> {
        (**self).reset_history().await
    }
}
