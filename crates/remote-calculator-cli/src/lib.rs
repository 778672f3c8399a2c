//! remote-calc CLI library
//!
//! Command-line front end for the remote calculator: an interactive keypad
//! session on stdin plus one-shot `calc`, `history` and `config` commands.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
pub mod session;

pub use commands::{CalcArgs, Cli, ColorArg, Commands, ConfigArgs, FormatArg, HistoryArgs};
pub use config::{CliConfig, ColorChoice, ConnectionArgs, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{format_display, format_history, OutputFormat, Reporter};
pub use session::{tokenize, Session, Token};
