//! One-shot command handlers

use chrono::TimeZone;
use remote_calculator::config::ClientConfig;
use remote_calculator::controller::{CalculationOutcome, Calculator};
use remote_calculator::core::Operation;
use remote_calculator::presenter::HistoryPresenter;
use remote_calculator::service::ArithmeticService;
use std::io::Write;

use crate::commands::{CalcArgs, HistoryArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{format_history, OutputFormat};

const MASKED_TOKEN: &str = "********";

fn type_operand(calc: &mut Calculator, operand: &str, position: &str) -> CliResult<()> {
    if operand.is_empty() || !operand.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return Err(CliError::invalid_argument(format!(
            "{position} operand '{operand}' may only contain digits and '.'"
        )));
    }
    for ch in operand.chars() {
        calc.press_digit(ch);
    }
    Ok(())
}

/// Runs `calc`: types both operands on a fresh calculator and evaluates.
///
/// Prints the display afterwards, which is the result or the error text.
pub async fn run_calc<S, W>(service: &S, args: &CalcArgs, out: &mut W) -> CliResult<()>
where
    S: ArithmeticService + ?Sized,
    W: Write,
{
    let operation = Operation::from_symbol(args.operator.trim()).ok_or_else(|| {
        CliError::invalid_argument(format!("unknown operator '{}'", args.operator))
    })?;

    let mut calc = Calculator::new();
    type_operand(&mut calc, &args.operand1, "first")?;
    calc.select_operator(operation);
    type_operand(&mut calc, &args.operand2, "second")?;

    let outcome = calc.evaluate(service).await;
    writeln!(out, "{}", calc.display())?;
    match outcome {
        Some(CalculationOutcome::Applied(_)) => Ok(()),
        Some(CalculationOutcome::Failed) => Err(CliError::CalculationFailed),
        Some(CalculationOutcome::Stale) | None => {
            Err(CliError::invalid_argument("incomplete calculation"))
        }
    }
}

/// Runs `history`: lists the stored operations, or clears them with `--reset`
pub async fn run_history<S, Tz, W>(
    service: &S,
    args: &HistoryArgs,
    config: &CliConfig,
    zone: Tz,
    out: &mut W,
) -> CliResult<()>
where
    S: ArithmeticService + ?Sized,
    Tz: TimeZone,
    W: Write,
{
    let mut presenter = HistoryPresenter::with_zone(zone);

    if args.reset {
        presenter.reset_history(service).await?;
        writeln!(out, "History cleared")?;
        return Ok(());
    }

    let entries = service.history().await?;
    match config.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        }
        OutputFormat::Text => {
            presenter.render(entries);
            let use_color = config.color.should_color();
            for line in format_history(presenter.lines(), use_color) {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}

/// Runs `config`: prints the resolved connection settings with the token masked
pub fn run_config<W: Write>(
    client: &ClientConfig,
    config: &CliConfig,
    out: &mut W,
) -> CliResult<()> {
    let mut shown = client.clone();
    if shown.token.is_some() {
        shown.token = Some(MASKED_TOKEN.to_string());
    }

    let rendered = match config.format {
        OutputFormat::Json => serde_json::to_string_pretty(&shown)?,
        OutputFormat::Text => serde_yaml_ng::to_string(&shown)?,
    };
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use chrono::Utc;
    use remote_calculator::core::history::parse_timestamp;
    use remote_calculator::core::HistoryEntry;
    use remote_calculator::service::{ScriptedCall, ScriptedService};

    fn calc_args(a: &str, op: &str, b: &str) -> CalcArgs {
        CalcArgs {
            operand1: a.to_string(),
            operator: op.to_string(),
            operand2: b.to_string(),
        }
    }

    fn history_args(reset: bool) -> HistoryArgs {
        HistoryArgs {
            reset,
            format: crate::commands::FormatArg::Text,
        }
    }

    fn plain() -> CliConfig {
        CliConfig::new().with_color(ColorChoice::Never)
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    mod calc_tests {
        use super::*;

        #[tokio::test]
        async fn test_calc_prints_result() {
            let service = ScriptedService::new().with_result(36.0);
            let mut out = Vec::new();
            run_calc(&service, &calc_args("12", "×", "3"), &mut out)
                .await
                .unwrap();
            assert_eq!(output(out), "36\n");
            assert_eq!(
                service.calls(),
                vec![ScriptedCall::Calculate {
                    operation: Operation::Multiply,
                    operand1: 12.0,
                    operand2: 3.0
                }]
            );
        }

        #[tokio::test]
        async fn test_calc_keyboard_alias() {
            let service = ScriptedService::new().with_result(4.0);
            let mut out = Vec::new();
            run_calc(&service, &calc_args("8", "/", "2"), &mut out)
                .await
                .unwrap();
            assert!(matches!(
                service.calls()[0],
                ScriptedCall::Calculate {
                    operation: Operation::Divide,
                    ..
                }
            ));
        }

        #[tokio::test]
        async fn test_calc_failure_prints_error_text() {
            let service = ScriptedService::new().with_failure("boom");
            let mut out = Vec::new();
            let err = run_calc(&service, &calc_args("1", "÷", "0"), &mut out)
                .await
                .unwrap_err();
            assert!(matches!(err, CliError::CalculationFailed));
            assert_eq!(output(out), "Error occurred\n");
        }

        #[tokio::test]
        async fn test_calc_rejects_unknown_operator() {
            let service = ScriptedService::new();
            let mut out = Vec::new();
            let err = run_calc(&service, &calc_args("1", "x", "2"), &mut out)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("unknown operator 'x'"));
            assert_eq!(service.call_count(), 0);
        }

        #[tokio::test]
        async fn test_calc_rejects_signed_operand() {
            let service = ScriptedService::new();
            let mut out = Vec::new();
            let err = run_calc(&service, &calc_args("-1", "+", "2"), &mut out)
                .await
                .unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
            assert!(out.is_empty());
        }

        #[tokio::test]
        async fn test_calc_sends_truncated_decimal() {
            let service = ScriptedService::new().with_result(2.2);
            let mut out = Vec::new();
            run_calc(&service, &calc_args("1.2.3", "+", "1"), &mut out)
                .await
                .unwrap();
            assert!(matches!(
                service.calls()[0],
                ScriptedCall::Calculate { operand1, .. } if (operand1 - 1.2).abs() < f64::EPSILON
            ));
        }
    }

    mod history_tests {
        use super::*;

        fn entries() -> Vec<HistoryEntry> {
            vec![
                HistoryEntry::new(
                    parse_timestamp("2024-03-01T14:05:00Z"),
                    "Add",
                    3.0,
                    4.0,
                    7.0,
                ),
                HistoryEntry::new(None, "Modulo", 10.0, 4.0, 2.0),
            ]
        }

        #[tokio::test]
        async fn test_history_text() {
            let service = ScriptedService::new().with_history(entries());
            let mut out = Vec::new();
            run_history(&service, &history_args(false), &plain(), Utc, &mut out)
                .await
                .unwrap();
            assert_eq!(
                output(out),
                "=== History ===\n  1/3/24 14.05: 3 + 4 = 7\n  Invalid Date: 10 % 4 = 2\n"
            );
        }

        #[tokio::test]
        async fn test_history_json() {
            let service = ScriptedService::new().with_history(entries());
            let config = plain().with_format(OutputFormat::Json);
            let mut out = Vec::new();
            run_history(&service, &history_args(false), &config, Utc, &mut out)
                .await
                .unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&output(out)).unwrap();
            assert_eq!(parsed[0]["Operation"], "Add");
            assert_eq!(parsed[1]["Result"], 2.0);
        }

        #[tokio::test]
        async fn test_history_failure_is_an_error() {
            let service = ScriptedService::new().with_history_failure("down");
            let mut out = Vec::new();
            let err = run_history(&service, &history_args(false), &plain(), Utc, &mut out)
                .await
                .unwrap_err();
            assert!(matches!(err, CliError::Service(_)));
        }

        #[tokio::test]
        async fn test_history_reset() {
            let service = ScriptedService::new();
            let mut out = Vec::new();
            run_history(&service, &history_args(true), &plain(), Utc, &mut out)
                .await
                .unwrap();
            assert_eq!(output(out), "History cleared\n");
            assert_eq!(service.calls(), vec![ScriptedCall::ResetHistory]);
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_config_masks_token() {
            let client = ClientConfig::new().with_token("super-secret");
            let mut out = Vec::new();
            run_config(&client, &plain(), &mut out).unwrap();
            let text = output(out);
            assert!(text.contains("base_url:"));
            assert!(text.contains("http://localhost:8080"));
            assert!(text.contains(MASKED_TOKEN));
            assert!(!text.contains("super-secret"));
        }

        #[test]
        fn test_config_json() {
            let client = ClientConfig::new().with_base_url("https://calc.example.com");
            let config = plain().with_format(OutputFormat::Json);
            let mut out = Vec::new();
            run_config(&client, &config, &mut out).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&output(out)).unwrap();
            assert_eq!(parsed["base_url"], "https://calc.example.com");
            assert!(parsed["token"].is_null());
        }
    }
}
