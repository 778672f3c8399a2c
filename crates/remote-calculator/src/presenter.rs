//! History panel
//!
//! A single visibility flag plus the rendered lines. Showing the panel
//! always re-fetches; hiding it never does. A failed fetch is only logged
//! and leaves the panel exactly as it was.

use chrono::{Local, TimeZone};

use crate::core::HistoryEntry;
use crate::service::{ArithmeticService, ServiceResult};

/// A history fetch that has been issued but not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryTicket {
    sequence: u64,
}

/// What a toggle or fetch did to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The panel was hidden
    Hidden,
    /// The panel was populated with this many entries and shown
    Shown(usize),
    /// The fetch failed; the panel is unchanged
    Failed,
    /// A newer fetch superseded this one
    Stale,
}

/// Fetches and renders the operation history
#[derive(Debug, Clone)]
pub struct HistoryPresenter<Tz: TimeZone = Local> {
    zone: Tz,
    visible: bool,
    entries: Vec<HistoryEntry>,
    lines: Vec<String>,
    issued: u64,
    in_flight: Option<u64>,
}

impl Default for HistoryPresenter<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryPresenter<Local> {
    /// Creates a hidden panel rendering in the local time zone
    #[must_use]
    pub fn new() -> Self {
        Self::with_zone(Local)
    }
}

impl<Tz: TimeZone> HistoryPresenter<Tz> {
    /// Creates a hidden panel rendering timestamps in `zone`
    #[must_use]
    pub fn with_zone(zone: Tz) -> Self {
        Self {
            zone,
            visible: false,
            entries: Vec::new(),
            lines: Vec::new(),
            issued: 0,
            in_flight: None,
        }
    }

    /// Returns true when the panel is shown
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Entries from the last successful fetch, in received order
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Rendered lines, one per entry
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Hides the panel, keeping the rendered lines
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replaces the rendered lines with `entries`, in the order given
    pub fn render(&mut self, entries: Vec<HistoryEntry>) {
        self.lines = entries.iter().map(|e| e.display(&self.zone)).collect();
        self.entries = entries;
    }

    /// Issues a ticket for one history fetch
    pub fn begin_fetch(&mut self) -> HistoryTicket {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        HistoryTicket {
            sequence: self.issued,
        }
    }

    /// Applies the history response for `ticket`
    pub fn finish_fetch(
        &mut self,
        ticket: HistoryTicket,
        response: ServiceResult<Vec<HistoryEntry>>,
    ) -> PanelOutcome {
        if self.in_flight != Some(ticket.sequence) {
            tracing::debug!(sequence = ticket.sequence, "dropping stale history response");
            return PanelOutcome::Stale;
        }
        self.in_flight = None;

        match response {
            Ok(entries) => {
                let count = entries.len();
                self.render(entries);
                self.visible = true;
                PanelOutcome::Shown(count)
            }
            Err(err) => {
                tracing::error!(error = %err, "Error fetching history");
                PanelOutcome::Failed
            }
        }
    }

    /// Shows the panel with fresh history if hidden, hides it otherwise
    pub async fn toggle<S>(&mut self, service: &S) -> PanelOutcome
    where
        S: ArithmeticService + ?Sized,
    {
        if self.visible {
            self.hide();
            return PanelOutcome::Hidden;
        }
        let ticket = self.begin_fetch();
        let response = service.history().await;
        self.finish_fetch(ticket, response)
    }

    /// Clears the stored history on the service and empties the panel
    pub async fn reset_history<S>(&mut self, service: &S) -> ServiceResult<()>
    where
        S: ArithmeticService + ?Sized,
    {
        service.reset_history().await?;
        self.in_flight = None;
        self.entries.clear();
        self.lines.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::parse_timestamp;
    use crate::service::{ScriptedCall, ScriptedService, ServiceError};
    use chrono::Utc;

    fn entry(ts: &str, op: &str, a: f64, b: f64, r: f64) -> HistoryEntry {
        HistoryEntry::new(parse_timestamp(ts), op, a, b, r)
    }

    fn sample() -> Vec<HistoryEntry> {
        vec![
            entry("2024-03-01T14:05:00Z", "Add", 3.0, 4.0, 7.0),
            entry("2024-02-28T09:30:00Z", "Multiply", 6.0, 7.0, 42.0),
        ]
    }

    #[test]
    fn test_new_is_hidden_and_empty() {
        let presenter = HistoryPresenter::with_zone(Utc);
        assert!(!presenter.is_visible());
        assert!(presenter.lines().is_empty());
    }

    #[test]
    fn test_render_keeps_received_order() {
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.render(sample());
        assert_eq!(
            presenter.lines(),
            &[
                "1/3/24 14.05: 3 + 4 = 7".to_string(),
                "28/2/24 9.30: 6 × 7 = 42".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_does_not_resort() {
        let mut entries = sample();
        entries.reverse();
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.render(entries);
        assert!(presenter.lines()[0].starts_with("28/2/24"));
    }

    #[test]
    fn test_render_replaces_previous_lines() {
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.render(sample());
        presenter.render(vec![entry("2024-03-02T00:00:00Z", "Power", 2.0, 3.0, 8.0)]);
        assert_eq!(presenter.lines(), &["2/3/24 0.00: 2 ^ 3 = 8".to_string()]);
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut presenter = HistoryPresenter::with_zone(Utc);
        let first = presenter.begin_fetch();
        let second = presenter.begin_fetch();
        assert_eq!(presenter.finish_fetch(first, Ok(sample())), PanelOutcome::Stale);
        assert!(!presenter.is_visible());
        assert_eq!(presenter.finish_fetch(second, Ok(vec![])), PanelOutcome::Shown(0));
        assert!(presenter.is_visible());
    }

    #[test]
    fn test_failed_fetch_keeps_stale_lines() {
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.render(sample());
        let ticket = presenter.begin_fetch();
        let outcome = presenter.finish_fetch(
            ticket,
            Err(ServiceError::Unscripted("history".to_string())),
        );
        assert_eq!(outcome, PanelOutcome::Failed);
        assert_eq!(presenter.lines().len(), 2);
        assert!(!presenter.is_visible());
    }

    #[tokio::test]
    async fn test_toggle_fetches_and_shows() {
        let service = ScriptedService::new().with_history(sample());
        let mut presenter = HistoryPresenter::with_zone(Utc);
        assert_eq!(presenter.toggle(&service).await, PanelOutcome::Shown(2));
        assert!(presenter.is_visible());
        assert_eq!(presenter.lines()[0], "1/3/24 14.05: 3 + 4 = 7");
    }

    #[tokio::test]
    async fn test_toggle_hides_without_refetch() {
        let service = ScriptedService::new().with_history(sample());
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.toggle(&service).await;
        assert_eq!(presenter.toggle(&service).await, PanelOutcome::Hidden);
        assert!(!presenter.is_visible());
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_toggle_refetches_when_shown_again() {
        let service = ScriptedService::new()
            .with_history(sample())
            .with_history(vec![]);
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.toggle(&service).await;
        presenter.toggle(&service).await;
        assert_eq!(presenter.toggle(&service).await, PanelOutcome::Shown(0));
        assert!(presenter.lines().is_empty());
        assert_eq!(service.call_count(), 2);
    }

    #[tokio::test]
    async fn test_toggle_failure_stays_hidden() {
        let service = ScriptedService::new().with_history_failure("offline");
        let mut presenter = HistoryPresenter::with_zone(Utc);
        assert_eq!(presenter.toggle(&service).await, PanelOutcome::Failed);
        assert!(!presenter.is_visible());
    }

    #[tokio::test]
    async fn test_reset_history_clears_panel() {
        let service = ScriptedService::new().with_history(sample());
        let mut presenter = HistoryPresenter::with_zone(Utc);
        presenter.toggle(&service).await;
        presenter.reset_history(&service).await.unwrap();
        assert!(presenter.lines().is_empty());
        assert!(presenter.is_visible());
        assert_eq!(service.calls().last(), Some(&ScriptedCall::ResetHistory));
    }
}
