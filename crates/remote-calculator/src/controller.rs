//! Calculation requestor
//!
//! Owns the operand state and the display text. Evaluation is split into
//! [`Calculator::begin_calculation`] and [`Calculator::finish_calculation`] so
//! that a response can arrive after newer input: only the most recently
//! issued ticket may touch the state, older responses are dropped.

use crate::core::{
    format_number, parse_operand, CalculatorState, Operation, ERROR_DISPLAY, INITIAL_DISPLAY,
};
use crate::service::{ArithmeticService, ServiceResult};

/// A calculation request that has been issued but not yet applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationTicket {
    sequence: u64,
    /// Operation sent to the service
    pub operation: Operation,
    /// Parsed first operand
    pub operand1: f64,
    /// Parsed second operand
    pub operand2: f64,
}

impl CalculationTicket {
    /// Position of this request in issue order
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// What happened to a calculation response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalculationOutcome {
    /// The result was stored and displayed
    Applied(f64),
    /// The request failed; the error text is displayed and operands kept
    Failed,
    /// A newer request or a reset superseded this one
    Stale,
}

/// Keypad calculator whose arithmetic runs on a remote service
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    display: String,
    issued: u64,
    in_flight: Option<u64>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator in its initial state, display `0`
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CalculatorState::new(),
            display: INITIAL_DISPLAY.to_string(),
            issued: 0,
            in_flight: None,
        }
    }

    /// Current operand state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns true while a request is awaiting its response
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Appends a digit or decimal point to the active operand.
    ///
    /// Other characters are ignored and return `false`.
    pub fn press_digit(&mut self, ch: char) -> bool {
        if !(ch.is_ascii_digit() || ch == '.') {
            tracing::debug!(%ch, "ignoring non-digit input");
            return false;
        }
        self.display = self.state.append_digit_or_decimal(ch).to_string();
        true
    }

    /// Selects the pending operator; the display is left as is
    pub fn select_operator(&mut self, operator: Operation) {
        self.state.select_operator(operator);
    }

    /// Selects the pending operator by keypad symbol.
    ///
    /// Unknown symbols are ignored and return `false`.
    pub fn select_operator_symbol(&mut self, symbol: &str) -> bool {
        let selected = self.state.select_operator_symbol(symbol);
        if !selected {
            tracing::debug!(symbol, "ignoring unknown operator");
        }
        selected
    }

    /// Clears all input, shows `0` and abandons any in-flight request
    pub fn reset(&mut self) {
        self.display = self.state.reset().to_string();
        self.in_flight = None;
    }

    /// Validates the input and issues a ticket for one service request.
    ///
    /// Returns `None` without touching the state when an operand or the
    /// operator is missing.
    pub fn begin_calculation(&mut self) -> Option<CalculationTicket> {
        let Some(operation) = self.state.operator() else {
            tracing::debug!("evaluate ignored: no operator selected");
            return None;
        };
        if !self.state.is_ready() {
            tracing::debug!("evaluate ignored: missing operand");
            return None;
        }

        self.issued += 1;
        self.in_flight = Some(self.issued);
        Some(CalculationTicket {
            sequence: self.issued,
            operation,
            operand1: parse_operand(self.state.first_operand()),
            operand2: parse_operand(self.state.second_operand()),
        })
    }

    /// Applies the service response for `ticket`.
    ///
    /// On success the result becomes the display and the new first operand.
    /// On failure the display shows the error text and the operands stay as
    /// they were.
    pub fn finish_calculation(
        &mut self,
        ticket: &CalculationTicket,
        response: ServiceResult<f64>,
    ) -> CalculationOutcome {
        if self.in_flight != Some(ticket.sequence) {
            tracing::debug!(sequence = ticket.sequence, "dropping stale calculation response");
            return CalculationOutcome::Stale;
        }
        self.in_flight = None;

        match response {
            Ok(result) => {
                self.display = self.state.complete(result).to_string();
                tracing::debug!(result = %format_number(result), "calculation applied");
                CalculationOutcome::Applied(result)
            }
            Err(err) => {
                tracing::warn!(
                    operation = ticket.operation.path(),
                    error = %err,
                    "calculation request failed"
                );
                self.display = ERROR_DISPLAY.to_string();
                CalculationOutcome::Failed
            }
        }
    }

    /// Evaluates the pending calculation against `service`.
    ///
    /// Returns `None` when the input was incomplete and no request was made.
    pub async fn evaluate<S>(&mut self, service: &S) -> Option<CalculationOutcome>
    where
        S: ArithmeticService + ?Sized,
    {
        let ticket = self.begin_calculation()?;
        let response = service
            .calculate(ticket.operation, ticket.operand1, ticket.operand2)
            .await;
        Some(self.finish_calculation(&ticket, response))
    }
}
