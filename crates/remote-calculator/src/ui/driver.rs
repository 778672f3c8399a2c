//! Page driver
//!
//! Routes clicks and key presses through the keypad to the calculator and
//! history panel, then mirrors their state into the DOM.

use chrono::{Local, TimeZone};

use super::dom::{DomElement, DomEvent, MockDom, DISPLAY_ID, HISTORY_LIST_ID};
use super::keypad::{Keypad, KeypadAction};
use crate::controller::{CalculationOutcome, Calculator};
use crate::presenter::{HistoryPresenter, PanelOutcome};
use crate::service::{ArithmeticService, ServiceResult};

/// What a user action did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// Operand, operator or clear input was applied
    Input,
    /// The action had no effect
    Ignored,
    /// A calculation request completed
    Calculation(CalculationOutcome),
    /// The history panel was toggled
    Panel(PanelOutcome),
}

/// Calculator page bound to an arithmetic service
#[derive(Debug)]
pub struct UiDriver<S, Tz: TimeZone = Local> {
    service: S,
    calculator: Calculator,
    presenter: HistoryPresenter<Tz>,
    keypad: Keypad,
    dom: MockDom,
}

impl<S: ArithmeticService> UiDriver<S, Local> {
    /// Creates a page rendering history in the local time zone
    #[must_use]
    pub fn new(service: S) -> Self {
        Self::with_zone(service, Local)
    }
}

impl<S: ArithmeticService, Tz: TimeZone> UiDriver<S, Tz> {
    /// Creates a page rendering history timestamps in `zone`
    #[must_use]
    pub fn with_zone(service: S, zone: Tz) -> Self {
        Self {
            service,
            calculator: Calculator::new(),
            presenter: HistoryPresenter::with_zone(zone),
            keypad: Keypad::new(),
            dom: MockDom::calculator(),
        }
    }

    /// The service requests go to
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The calculator behind the display
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The history panel
    #[must_use]
    pub fn presenter(&self) -> &HistoryPresenter<Tz> {
        &self.presenter
    }

    /// The page DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Display element text
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Text of every history list item, top to bottom
    #[must_use]
    pub fn history_items(&self) -> Vec<&str> {
        self.dom
            .get_element(HISTORY_LIST_ID)
            .map(DomElement::child_texts)
            .unwrap_or_default()
    }

    /// Returns true when the history list is shown
    #[must_use]
    pub fn is_history_visible(&self) -> bool {
        !self.dom.is_hidden(HISTORY_LIST_ID)
    }

    /// Clicks the element with `element_id`
    pub async fn click(&mut self, element_id: &str) -> ActionOutcome {
        self.dom.dispatch_event(DomEvent::click(element_id));
        match self.keypad.handle_click(element_id) {
            Some(action) => self.perform(action).await,
            None => {
                tracing::debug!(element_id, "click on non-keypad element");
                ActionOutcome::Ignored
            }
        }
    }

    /// Presses a keyboard key
    pub async fn press_key(&mut self, key: &str) -> ActionOutcome {
        self.dom.dispatch_event(DomEvent::key_press(key));
        match Keypad::key_to_action(key) {
            Some(action) => self.perform(action).await,
            None => {
                tracing::debug!(key, "unmapped key");
                ActionOutcome::Ignored
            }
        }
    }

    /// Clicks the keypad button whose text is `label`
    pub async fn press_label(&mut self, label: &str) -> ActionOutcome {
        let Some(action) = Keypad::label_to_action(label) else {
            tracing::debug!(label, "no button with this label");
            return ActionOutcome::Ignored;
        };
        let id = self
            .keypad
            .find_button_by_action(action)
            .map(|btn| btn.id.clone());
        if let Some(id) = id {
            self.dom.dispatch_event(DomEvent::click(&id));
        }
        self.perform(action).await
    }

    /// Applies a keypad action and syncs the DOM
    pub async fn perform(&mut self, action: KeypadAction) -> ActionOutcome {
        let outcome = match action {
            KeypadAction::Digit(_) | KeypadAction::Decimal => match action.to_char() {
                Some(ch) if self.calculator.press_digit(ch) => ActionOutcome::Input,
                _ => ActionOutcome::Ignored,
            },
            KeypadAction::Operator(op) => {
                self.calculator.select_operator(op);
                ActionOutcome::Input
            }
            KeypadAction::Clear => {
                self.calculator.reset();
                ActionOutcome::Input
            }
            KeypadAction::Equals => self
                .calculator
                .evaluate(&self.service)
                .await
                .map_or(ActionOutcome::Ignored, ActionOutcome::Calculation),
            KeypadAction::ToggleHistory => {
                ActionOutcome::Panel(self.presenter.toggle(&self.service).await)
            }
        };
        self.sync_dom();
        outcome
    }

    /// Clears the stored history on the service and empties the list
    pub async fn reset_history(&mut self) -> ServiceResult<()> {
        let result = self.presenter.reset_history(&self.service).await;
        self.sync_dom();
        result
    }

    fn sync_dom(&mut self) {
        self.dom
            .set_element_text(DISPLAY_ID, self.calculator.display());

        self.dom.clear_children(HISTORY_LIST_ID);
        for (i, line) in self.presenter.lines().iter().enumerate() {
            let item = DomElement::new("li")
                .with_id(&format!("history-{i}"))
                .with_text(line);
            self.dom.append_child(HISTORY_LIST_ID, item);
        }
        self.dom
            .set_hidden(HISTORY_LIST_ID, !self.presenter.is_visible());
    }
}
