//! Calculator keypad
//!
//! Layout:
//! ```text
//! [ 7 ] [ 8 ] [ 9 ] [ ÷ ]
//! [ 4 ] [ 5 ] [ 6 ] [ × ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ 0 ] [ . ] [ = ] [ + ]
//! [ C ] [ % ] [ ^ ] [History]
//! ```

use super::dom::{DomElement, MockDom, HISTORY_BUTTON_ID};
use crate::core::Operation;

/// Id of the keypad container
pub const KEYPAD_ID: &str = "calc-keypad";

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Append a digit (0-9)
    Digit(u8),
    /// Append a decimal point
    Decimal,
    /// Select an operator
    Operator(Operation),
    /// Evaluate through the service
    Equals,
    /// Clear the input
    Clear,
    /// Show or hide the history panel
    ToggleHistory,
}

impl KeypadAction {
    /// Returns the character this action appends to an operand
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(_) | Self::Equals | Self::Clear | Self::ToggleHistory => None,
        }
    }

    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::ToggleHistory => "History".to_string(),
        }
    }

    /// Maps a button label back to its action.
    ///
    /// Labels are matched after trimming surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if let Some(op) = Operation::from_symbol(label) {
            return Some(Self::Operator(op));
        }
        match label {
            "." => Some(Self::Decimal),
            "=" => Some(Self::Equals),
            "C" => Some(Self::Clear),
            "History" => Some(Self::ToggleHistory),
            _ => digit_action(label),
        }
    }
}

fn digit_action(key: &str) -> Option<KeypadAction> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => ch
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(KeypadAction::Digit),
        _ => None,
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op.path()),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::Clear => "btn-clear".to_string(),
            KeypadAction::ToggleHistory => HISTORY_BUTTON_ID.to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }
}

/// Keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Clear, Decimal, Digit, Equals, Operator, ToggleHistory};

        let layout = [
            [Digit(7), Digit(8), Digit(9), Operator(Operation::Divide)],
            [Digit(4), Digit(5), Digit(6), Operator(Operation::Multiply)],
            [Digit(1), Digit(2), Digit(3), Operator(Operation::Subtract)],
            [Digit(0), Decimal, Equals, Operator(Operation::Add)],
            [
                Clear,
                Operator(Operation::Modulo),
                Operator(Operation::Power),
                ToggleHistory,
            ],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing `action`
    #[must_use]
    pub fn find_button_by_action(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Creates DOM elements for all keypad buttons
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("keypad-btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
                    .with_attr("data-action", &format!("{:?}", btn.action))
            })
            .collect()
    }

    /// Creates the keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div").with_id(KEYPAD_ID).with_class("keypad"),
            DomElement::with_child,
        )
    }

    /// Maps a clicked element to its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "c" | "C" => Some(KeypadAction::Clear),
            "h" | "H" => Some(KeypadAction::ToggleHistory),
            "." => Some(KeypadAction::Decimal),
            _ => Operation::from_symbol(key)
                .map(KeypadAction::Operator)
                .or_else(|| digit_action(key)),
        }
    }

    /// Maps the visible text of a button to its action
    #[must_use]
    pub fn label_to_action(label: &str) -> Option<KeypadAction> {
        KeypadAction::from_label(label)
    }
}

impl MockDom {
    /// Registers the keypad container and each of its buttons
    pub fn add_keypad(&mut self, keypad: &Keypad) {
        self.register_element(keypad.create_keypad_element());
        for button in keypad.create_dom_elements() {
            self.register_element(button);
        }
    }
}
