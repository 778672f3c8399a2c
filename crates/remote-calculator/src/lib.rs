//! Remote Calculator
//!
//! A keypad calculator whose arithmetic runs on a remote HTTP service. The
//! front end only accumulates operands, picks an operator, sends the pair to
//! the service and shows whatever comes back. A history panel lists past
//! operations as recorded by the service.
//!
//! # Layers
//!
//! - [`core`]: operand accumulation, operator/endpoint translation, history
//!   records
//! - [`service`]: the [`ArithmeticService`](service::ArithmeticService) seam
//!   and its HTTP implementation
//! - [`controller`] and [`presenter`]: display and history panel state, with
//!   stale responses dropped by ticket
//! - [`ui`]: in-memory page model and the driver routing clicks and keys
//!
//! # Example
//!
//! ```rust
//! use remote_calculator::prelude::*;
//!
//! # tokio_test_block(async {
//! let service = ScriptedService::new().with_result(15.0);
//! let mut calc = Calculator::new();
//!
//! calc.press_digit('1');
//! calc.press_digit('2');
//! calc.select_operator(Operation::Add);
//! calc.press_digit('3');
//!
//! let outcome = calc.evaluate(&service).await;
//! assert_eq!(outcome, Some(CalculationOutcome::Applied(15.0)));
//! assert_eq!(calc.display(), "15");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod core;
pub mod presenter;
pub mod service;
pub mod ui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ClientConfig, ConfigError, ConfigResult};
    pub use crate::controller::{CalculationOutcome, CalculationTicket, Calculator};
    pub use crate::core::{CalculatorState, HistoryEntry, Operation};
    pub use crate::presenter::{HistoryPresenter, HistoryTicket, PanelOutcome};
    pub use crate::service::{
        ArithmeticService, HttpArithmeticService, ScriptedCall, ScriptedService, ServiceError,
        ServiceResult,
    };
    pub use crate::ui::{ActionOutcome, Keypad, KeypadAction, MockDom, UiDriver};
}
