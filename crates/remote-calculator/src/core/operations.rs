//! Operator symbol and service endpoint translation
//!
//! The keypad speaks in symbols (`+`, `×`, ...), the service routes on
//! lowercase path segments (`add`, `multiply`, ...) and history records name
//! the operation in capitalized form (`Add`, `Multiply`, ...). `Operation`
//! is the single table tying the three together.

use serde::{Deserialize, Serialize};

/// Arithmetic operation supported by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Modulo (%)
    Modulo,
    /// Power (^)
    Power,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
    ];

    /// Returns the operator symbol shown on the keypad and in history lines
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }

    /// Returns the request path segment (`GET {base}/{path}`)
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Power => "power",
        }
    }

    /// Returns the capitalized endpoint name used by history records
    #[must_use]
    pub const fn endpoint_name(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Modulo => "Modulo",
            Self::Power => "Power",
        }
    }

    /// Looks up an operation by keypad symbol.
    ///
    /// `*` and `/` are accepted as keyboard aliases for `×` and `÷`.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "×" | "*" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            "%" => Some(Self::Modulo),
            "^" => Some(Self::Power),
            _ => None,
        }
    }

    /// Looks up an operation by endpoint name, ignoring ASCII case
    #[must_use]
    pub fn from_endpoint_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.endpoint_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Maps a keypad symbol to the service operation, if known
#[must_use]
pub fn operator_to_endpoint(symbol: &str) -> Option<Operation> {
    Operation::from_symbol(symbol)
}

/// Maps an endpoint name from a history record back to its keypad symbol
#[must_use]
pub fn endpoint_to_operator(endpoint_name: &str) -> Option<&'static str> {
    Operation::from_endpoint_name(endpoint_name).map(|op| op.symbol())
}
