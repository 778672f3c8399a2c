//! Core calculator state: operand accumulation, operator translation and
//! history records. Nothing here touches the network.

pub mod accumulator;
pub mod history;
mod operations;

pub use accumulator::CalculatorState;
pub use history::HistoryEntry;
pub use operations::{endpoint_to_operator, operator_to_endpoint, Operation};

/// Text shown on the display after a reset
pub const INITIAL_DISPLAY: &str = "0";

/// Text shown on the display when a calculation request fails
pub const ERROR_DISPLAY: &str = "Error occurred";

/// Text `format_number` uses for positive infinity
const INFINITY_TEXT: &str = "Infinity";

/// Parses an operand string into a number.
///
/// Reads the longest leading `[sign]digits[.digits][e[sign]digits]` prefix,
/// so `"1.2.3"` reads as `1.2` and a stored result such as `"-5"` or
/// `"1e+21"` reads back as the same number. `Infinity` and `-Infinity` are
/// recognised. A string with no leading digits becomes `NaN`.
#[must_use]
pub fn parse_operand(operand: &str) -> f64 {
    let text = operand.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with(INFINITY_TEXT) {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    // The exponent only counts when it has digits: "2e" reads as 2
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Formats a number the way the display and history lines show it.
///
/// Magnitudes in `[1e-6, 1e21)` print as plain decimals: integers without a
/// fractional part, other values in the shortest form that round-trips.
/// Anything outside that range uses exponent notation such as `1e+21` or
/// `1.5e-7`. Non-finite values print as `NaN`, `Infinity` and `-Infinity`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n.is_sign_positive() {
            INFINITY_TEXT.to_string()
        } else {
            format!("-{INFINITY_TEXT}")
        }
    } else if n == 0.0 {
        // Collapses -0 as well
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        format!("{n}")
    } else {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    }
}
