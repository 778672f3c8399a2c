//! Operand accumulator: the keypad input state machine
//!
//! Digits go to the first operand until an operator is chosen, then to the
//! second. Selecting another operator before typing simply replaces the
//! pending one; nothing is evaluated locally.

use super::operations::Operation;
use super::{format_number, INITIAL_DISPLAY};

/// Two string operands and at most one pending operator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorState {
    first_operand: String,
    operator: Option<Operation>,
    second_operand: String,
}

impl CalculatorState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state from its parts
    #[must_use]
    pub fn from_parts(first: &str, operator: Option<Operation>, second: &str) -> Self {
        Self {
            first_operand: first.to_string(),
            operator,
            second_operand: second.to_string(),
        }
    }

    /// The first operand as typed
    #[must_use]
    pub fn first_operand(&self) -> &str {
        &self.first_operand
    }

    /// The pending operator, if any
    #[must_use]
    pub fn operator(&self) -> Option<Operation> {
        self.operator
    }

    /// The second operand as typed
    #[must_use]
    pub fn second_operand(&self) -> &str {
        &self.second_operand
    }

    /// Returns true once an operator has been selected
    #[must_use]
    pub fn has_operator(&self) -> bool {
        self.operator.is_some()
    }

    /// Returns true when both operands and the operator are present
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.first_operand.is_empty() && self.operator.is_some() && !self.second_operand.is_empty()
    }

    /// Returns true when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_operand.is_empty() && self.operator.is_none() && self.second_operand.is_empty()
    }

    /// Appends a digit or decimal point to the active operand.
    ///
    /// Repeated decimal points are accepted as typed. Returns the operand
    /// being edited, which is what the display should show.
    pub fn append_digit_or_decimal(&mut self, ch: char) -> &str {
        if self.operator.is_none() {
            self.first_operand.push(ch);
            &self.first_operand
        } else {
            self.second_operand.push(ch);
            &self.second_operand
        }
    }

    /// Sets the pending operator, replacing any previous one
    pub fn select_operator(&mut self, operator: Operation) {
        self.operator = Some(operator);
    }

    /// Sets the pending operator from a keypad symbol.
    ///
    /// Unknown symbols leave the state untouched and return `false`.
    pub fn select_operator_symbol(&mut self, symbol: &str) -> bool {
        match Operation::from_symbol(symbol) {
            Some(op) => {
                self.select_operator(op);
                true
            }
            None => false,
        }
    }

    /// Clears every field and returns the display text for an empty state
    pub fn reset(&mut self) -> &'static str {
        self.first_operand.clear();
        self.operator = None;
        self.second_operand.clear();
        INITIAL_DISPLAY
    }

    /// Stores a service result as the new first operand, ready for chaining
    pub fn complete(&mut self, result: f64) -> &str {
        self.first_operand = format_number(result);
        self.operator = None;
        self.second_operand.clear();
        &self.first_operand
    }
}
