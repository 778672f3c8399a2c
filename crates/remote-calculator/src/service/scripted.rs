//! Scripted service for testing front ends without a backend

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ArithmeticService, ServiceError, ServiceResult};
use crate::core::{HistoryEntry, Operation};

/// A call received by [`ScriptedService`]
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedCall {
    /// `calculate(operation, operand1, operand2)`
    Calculate {
        /// Requested operation
        operation: Operation,
        /// Left operand as sent
        operand1: f64,
        /// Right operand as sent
        operand2: f64,
    },
    /// `history()`
    History,
    /// `reset_history()`
    ResetHistory,
}

#[derive(Debug, Default)]
struct Script {
    calculations: VecDeque<Result<f64, String>>,
    histories: VecDeque<Result<Vec<HistoryEntry>, String>>,
    calls: Vec<ScriptedCall>,
}

/// Service that answers from queued responses and records every call
#[derive(Debug, Default)]
pub struct ScriptedService {
    script: Mutex<Script>,
}

impl ScriptedService {
    /// Creates a service with nothing queued
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a successful calculation result
    #[must_use]
    pub fn with_result(self, result: f64) -> Self {
        self.script().calculations.push_back(Ok(result));
        self
    }

    /// Queues a failed calculation
    #[must_use]
    pub fn with_failure(self, message: &str) -> Self {
        self.script().calculations.push_back(Err(message.to_string()));
        self
    }

    /// Queues a successful history response
    #[must_use]
    pub fn with_history(self, entries: Vec<HistoryEntry>) -> Self {
        self.script().histories.push_back(Ok(entries));
        self
    }

    /// Queues a failed history response
    #[must_use]
    pub fn with_history_failure(self, message: &str) -> Self {
        self.script().histories.push_back(Err(message.to_string()));
        self
    }

    /// Calls received so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.script().calls.clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.script().calls.len()
    }

    fn failure(message: String) -> ServiceError {
        ServiceError::Status {
            status: 500,
            body: message,
        }
    }
}

#[async_trait]
impl ArithmeticService for ScriptedService {
    async fn calculate(
        &self,
        operation: Operation,
        operand1: f64,
        operand2: f64,
    ) -> ServiceResult<f64> {
        let mut script = self.script();
        script.calls.push(ScriptedCall::Calculate {
            operation,
            operand1,
            operand2,
        });
        match script.calculations.pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(Self::failure(message)),
            None => Err(ServiceError::Unscripted(operation.path().to_string())),
        }
    }

    async fn history(&self) -> ServiceResult<Vec<HistoryEntry>> {
        let mut script = self.script();
        script.calls.push(ScriptedCall::History);
        match script.histories.pop_front() {
            Some(Ok(entries)) => Ok(entries),
            Some(Err(message)) => Err(Self::failure(message)),
            None => Err(ServiceError::Unscripted("history".to_string())),
        }
    }

    async fn reset_history(&self) -> ServiceResult<()> {
        self.script().calls.push(ScriptedCall::ResetHistory);
        Ok(())
    }
}
