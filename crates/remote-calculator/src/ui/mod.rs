//! Calculator page: element model, keypad and the driver wiring them to the
//! calculator and history panel.

pub mod dom;
pub mod driver;
pub mod keypad;

pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::{ActionOutcome, UiDriver};
pub use keypad::{Keypad, KeypadAction, KeypadButtonDef};
