//! Interactive keypad session
//!
//! Reads whitespace-separated keys from a line-oriented input and feeds them
//! to a [`UiDriver`]. After every key the display is printed, followed by the
//! history panel while it is shown.

use chrono::{Local, TimeZone};
use remote_calculator::service::ArithmeticService;
use remote_calculator::ui::{Keypad, UiDriver};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::CliResult;
use crate::output::{format_display, format_history, Reporter};

/// One parsed input token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A key the keypad understands
    Key(String),
    /// End the session
    Quit,
    /// Anything else
    Unknown(String),
}

/// Splits an input line into tokens.
///
/// Runs of digits and decimal points such as `12.5` expand to one key per
/// character.
#[must_use]
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        if word.eq_ignore_ascii_case("q") || word.eq_ignore_ascii_case("quit") {
            tokens.push(Token::Quit);
        } else if Keypad::key_to_action(word).is_some() {
            tokens.push(Token::Key(word.to_string()));
        } else if word.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
            tokens.extend(word.chars().map(|ch| Token::Key(ch.to_string())));
        } else {
            tokens.push(Token::Unknown(word.to_string()));
        }
    }
    tokens
}

/// Interactive session over a page
#[derive(Debug)]
pub struct Session<S, Tz: TimeZone = Local> {
    page: UiDriver<S, Tz>,
    use_color: bool,
    reporter: Reporter,
}

impl<S: ArithmeticService, Tz: TimeZone> Session<S, Tz> {
    /// Creates a session around `page`
    #[must_use]
    pub fn new(page: UiDriver<S, Tz>, use_color: bool, quiet: bool) -> Self {
        Self {
            page,
            use_color,
            reporter: Reporter::new(use_color, quiet),
        }
    }

    /// The page being driven
    #[must_use]
    pub fn page(&self) -> &UiDriver<S, Tz> {
        &self.page
    }

    fn print_state<W: Write>(&self, out: &mut W) -> CliResult<()> {
        writeln!(out, "{}", format_display(self.page.display_text(), self.use_color))?;
        if self.page.is_history_visible() {
            for line in format_history(self.page.presenter().lines(), self.use_color) {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }

    /// Runs until `q` or end of input
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> CliResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.print_state(out)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            for token in tokenize(&line) {
                match token {
                    Token::Quit => {
                        tracing::debug!("session ended by user");
                        return Ok(());
                    }
                    Token::Key(key) => {
                        let outcome = self.page.press_key(&key).await;
                        tracing::debug!(key = key.as_str(), ?outcome, "key handled");
                        self.print_state(out)?;
                    }
                    Token::Unknown(word) => {
                        self.reporter.warning(&format!("unknown key '{word}'"));
                    }
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}
