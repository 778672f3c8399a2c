//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{CliConfig, ColorChoice, ConnectionArgs, Verbosity};
use crate::output::OutputFormat;

/// remote-calc: keypad calculator backed by a remote arithmetic service
#[derive(Parser, Debug)]
#[command(name = "remote-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Service base URL, e.g. http://localhost:8080
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in milliseconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `interactive`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// CLI configuration from the global flags
    #[must_use]
    pub fn cli_config(&self) -> CliConfig {
        let format = match &self.command {
            Some(Commands::History(args)) => args.format.into(),
            Some(Commands::Config(args)) => args.format.into(),
            _ => OutputFormat::Text,
        };
        CliConfig::new()
            .with_verbosity(Verbosity::from_flags(self.quiet, self.verbose))
            .with_color(self.color.into())
            .with_format(format)
    }

    /// Connection flags
    #[must_use]
    pub fn connection(&self) -> ConnectionArgs {
        ConnectionArgs {
            config_file: self.config.clone(),
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read keys from stdin and show the display after each one
    ///
    /// Keys: 0-9 . + - × * ÷ / % ^ = C H, separated by whitespace.
    /// Runs of digits may be typed together; q quits.
    Interactive,

    /// Run a single calculation
    Calc(CalcArgs),

    /// Show or reset the operation history
    History(HistoryArgs),

    /// Show the resolved connection configuration
    Config(ConfigArgs),
}

/// Arguments for the calc command
#[derive(Args, Debug, Clone)]
pub struct CalcArgs {
    /// First operand, as typed on the keypad
    pub operand1: String,

    /// Operator symbol (+ - × * ÷ / % ^)
    pub operator: String,

    /// Second operand, as typed on the keypad
    pub operand2: String,
}

/// Arguments for the history command
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Clear the stored history instead of listing it
    #[arg(long)]
    pub reset: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the config command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Output format (text prints YAML)
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
