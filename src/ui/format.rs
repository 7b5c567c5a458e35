//! Display formatting for table cells.
//!
//! Pure string helpers: number grouping, timestamps, placeholders for absent
//! values and the colour class of audit statuses and methods.

use crate::domain::audit::AuditLogEntry;
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown for an audit entry without a user.
pub const ANONYMOUS: &str = "Anonymous";

/// Shown for any other absent audit value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Timestamp layout used in tables.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fraction digits kept by [`group_thousands`].
pub const MAX_FRACTION_DIGITS: u32 = 3;

/// Colour class of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    Primary,
    Success,
    Info,
    Warning,
    Error,
}

/// Class of an HTTP response status.
///
/// ```
/// use opsconsole::ui::format::{status_tone, Tone};
///
/// assert_eq!(status_tone(204), Tone::Success);
/// assert_eq!(status_tone(302), Tone::Info);
/// assert_eq!(status_tone(404), Tone::Warning);
/// assert_eq!(status_tone(503), Tone::Error);
/// ```
#[must_use]
pub const fn status_tone(status: u16) -> Tone {
    match status {
        200..=299 => Tone::Success,
        300..=399 => Tone::Info,
        400..=499 => Tone::Warning,
        500..=u16::MAX => Tone::Error,
        _ => Tone::Default,
    }
}

/// Class of an HTTP method name.
#[must_use]
pub fn method_tone(method: &str) -> Tone {
    match method {
        "GET" => Tone::Primary,
        "POST" => Tone::Success,
        "PUT" => Tone::Warning,
        "DELETE" => Tone::Error,
        _ => Tone::Default,
    }
}

/// Groups the integer part in thousands and drops trailing fraction zeros.
///
/// The fraction is rounded half away from zero to at most three places
/// before grouping, so `1234.5678` renders as `1,234.568`.
///
/// ```
/// use opsconsole::ui::format::group_thousands;
/// use rust_decimal::Decimal;
///
/// assert_eq!(group_thousands(Decimal::new(1_234_567_50, 2)), "1,234,567.5");
/// assert_eq!(group_thousands(Decimal::new(-950, 0)), "-950");
/// ```
#[must_use]
pub fn group_thousands(value: Decimal) -> String {
    let text = value
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, unsigned) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Optional amount, empty when absent.
#[must_use]
pub fn amount(value: Option<Decimal>) -> String {
    value.map(group_thousands).unwrap_or_default()
}

/// Audit timestamp as `YYYY-MM-DD HH:MM:SS`, or the raw text if unparseable.
#[must_use]
pub fn audit_timestamp(entry: &AuditLogEntry) -> String {
    entry.recorded_at().map_or_else(
        || entry.timestamp.clone(),
        |ts| ts.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
    )
}

/// Audit user, or [`ANONYMOUS`].
#[must_use]
pub fn audit_user(entry: &AuditLogEntry) -> String {
    entry
        .user_identifier
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string()
}

/// Optional value, or [`NOT_AVAILABLE`].
#[must_use]
pub fn or_not_available<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Duration cell: absent or zero shows [`NOT_AVAILABLE`].
#[must_use]
pub fn duration_ms(value: Option<u64>) -> String {
    or_not_available(value.filter(|ms| *ms > 0))
}

/// `"Page 2 of 5 (42 total)"`, one-based for display.
#[must_use]
pub fn page_summary(page: u32, page_count: u64, total: u64) -> String {
    let shown_count = page_count.max(1);
    format!("Page {} of {shown_count} ({total} total)", u64::from(page) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_small_and_large_numbers() {
        assert_eq!(group_thousands(Decimal::new(0, 0)), "0");
        assert_eq!(group_thousands(Decimal::new(999, 0)), "999");
        assert_eq!(group_thousands(Decimal::new(1000, 0)), "1,000");
        assert_eq!(group_thousands(Decimal::new(1_250_000, 2)), "12,500");
        assert_eq!(group_thousands(Decimal::new(-1_234_567, 0)), "-1,234,567");
    }

    #[test]
    fn fraction_is_rounded_to_three_places() {
        assert_eq!(group_thousands(Decimal::new(1_234_5678, 4)), "1,234.568");
        assert_eq!(group_thousands(Decimal::new(10_0005, 4)), "10.001");
        assert_eq!(group_thousands(Decimal::new(-2_5004, 4)), "-2.5");
        assert_eq!(group_thousands(Decimal::new(550_000, 2)), "5,500");
    }

    #[test]
    fn audit_placeholders() {
        let entry: AuditLogEntry = serde_json::from_str(
            r#"{"id":"1","timestamp":"2024-03-15T09:30:01.5","apiEndpoint":"/api/tier","httpMethod":"GET","userIdentifier":""}"#,
        )
        .unwrap();
        assert_eq!(audit_user(&entry), ANONYMOUS);
        assert_eq!(duration_ms(entry.request_duration_ms), NOT_AVAILABLE);
        assert_eq!(or_not_available(entry.client_ip.as_deref()), NOT_AVAILABLE);
        assert_eq!(audit_timestamp(&entry), "2024-03-15 09:30:01");
    }

    #[test]
    fn tones() {
        assert_eq!(method_tone("DELETE"), Tone::Error);
        assert_eq!(method_tone("PATCH"), Tone::Default);
        assert_eq!(status_tone(100), Tone::Default);
    }

    #[test]
    fn page_summary_is_one_based() {
        assert_eq!(page_summary(0, 0, 0), "Page 1 of 1 (0 total)");
        assert_eq!(page_summary(1, 5, 42), "Page 2 of 5 (42 total)");
    }
}
