//! Output formatting

use console::{style, Term};
use remote_calculator::core::ERROR_DISPLAY;
use serde::{Deserialize, Serialize};

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Renders the display line shown after every key
#[must_use]
pub fn format_display(display: &str, use_color: bool) -> String {
    if !use_color {
        return format!("[ {display} ]");
    }
    let text = if display == ERROR_DISPLAY {
        style(display).red().bold().to_string()
    } else {
        style(display).bold().to_string()
    };
    format!("[ {text} ]")
}

/// Renders the history panel: a header followed by one line per entry
#[must_use]
pub fn format_history(lines: &[String], use_color: bool) -> Vec<String> {
    let header = if use_color {
        style("History").bold().underlined().to_string()
    } else {
        "=== History ===".to_string()
    };

    let mut out = Vec::with_capacity(lines.len() + 1);
    out.push(header);
    if lines.is_empty() {
        out.push("  (empty)".to_string());
    }
    out.extend(lines.iter().map(|line| format!("  {line}")));
    out
}

/// Status messages on stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_format_display_plain() {
        assert_eq!(format_display("15", false), "[ 15 ]");
        assert_eq!(format_display("Error occurred", false), "[ Error occurred ]");
    }

    #[test]
    fn test_format_display_colored_keeps_text() {
        assert!(format_display("15", true).contains("15"));
    }

    #[test]
    fn test_format_history_plain() {
        let lines = vec!["1/3/24 14.05: 3 + 4 = 7".to_string()];
        assert_eq!(
            format_history(&lines, false),
            vec!["=== History ===", "  1/3/24 14.05: 3 + 4 = 7"]
        );
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(
            format_history(&[], false),
            vec!["=== History ===", "  (empty)"]
        );
    }

    #[test]
    fn test_reporter_new() {
        let reporter = Reporter::new(false, true);
        assert!(!reporter.use_color);
        assert!(reporter.quiet);
    }

    #[test]
    fn test_reporter_default() {
        let reporter = Reporter::default();
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_reporter_warning() {
        let reporter = Reporter::new(false, false);
        reporter.warning("careful");
        Reporter::new(true, true).warning("suppressed");
    }
}
