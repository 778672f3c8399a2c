//! History records returned by the service and their display lines

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::format_number;
use super::operations::endpoint_to_operator;

/// Date part shown for a record whose timestamp could not be read
pub const INVALID_DATE: &str = "Invalid Date";

/// One past calculation as reported by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryEntry {
    /// When the operation was performed
    #[serde(with = "lenient_timestamp", default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Capitalized endpoint name, e.g. `Add`
    pub operation: String,
    /// Left operand
    pub operand1: f64,
    /// Right operand
    pub operand2: f64,
    /// Result computed by the service
    pub result: f64,
}

impl HistoryEntry {
    /// Creates an entry
    #[must_use]
    pub fn new(
        timestamp: Option<DateTime<FixedOffset>>,
        operation: &str,
        operand1: f64,
        operand2: f64,
        result: f64,
    ) -> Self {
        Self {
            timestamp,
            operation: operation.to_string(),
            operand1,
            operand2,
            result,
        }
    }

    /// Keypad symbol for the operation, or an empty string when unknown
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        endpoint_to_operator(&self.operation).unwrap_or("")
    }

    /// Formats the timestamp as `D/M/YY H.MM` in the given zone
    #[must_use]
    pub fn format_timestamp<Tz: TimeZone>(&self, zone: &Tz) -> String {
        match &self.timestamp {
            Some(ts) => {
                let local = ts.with_timezone(zone);
                format!(
                    "{}/{}/{:02} {}.{:02}",
                    local.day(),
                    local.month(),
                    local.year().rem_euclid(100),
                    local.hour(),
                    local.minute()
                )
            }
            None => INVALID_DATE.to_string(),
        }
    }

    /// Renders the history line `D/M/YY H.MM: a op b = result`
    #[must_use]
    pub fn display<Tz: TimeZone>(&self, zone: &Tz) -> String {
        format!(
            "{}: {} {} {} = {}",
            self.format_timestamp(zone),
            format_number(self.operand1),
            self.symbol(),
            format_number(self.operand2),
            format_number(self.result)
        )
    }
}

/// Parses a timestamp the way the service may send it.
///
/// Tries RFC 3339 first, then RFC 2822, then a zone-less
/// `YYYY-MM-DDTHH:MM:SS[.f]` read as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

mod lenient_timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_timestamp))
    }
}
