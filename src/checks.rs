//! Secondary checks: holder name, expiry window, and CVV length.
//!
//! Each check is an independent predicate; the pipeline applies them
//! conditionally based on the request's enable flags.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default holder-name pattern: letters, spaces, comma, period,
/// apostrophe, and hyphen, case-insensitive.
pub static DEFAULT_HOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z ,.'-]+$").unwrap());

/// A calendar month, used as the expiry check's notion of "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    /// Four-digit year.
    pub year: i32,
    /// Month, 1-12.
    pub month: i32,
}

impl YearMonth {
    /// The current year and month, derived from the system clock.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        // 365-day years and 30-day months: the result can run up to
        // about two weeks ahead near a year boundary. Callers that
        // need an exact month boundary supply their own YearMonth
        // through validate_at.
        let days = secs / 86400;
        let years = days / 365;
        let year = 1970 + years as i32;
        let day_of_year = days % 365;
        let month = (day_of_year / 30).min(11) as i32 + 1;

        Self { year, month }
    }
}

/// Validates a card holder name against a pattern.
///
/// True iff the name is non-empty and fully matches. Use
/// [`DEFAULT_HOLDER_PATTERN`] unless the caller configures its own.
///
/// # Example
///
/// ```
/// use cardcheck::checks::{is_valid_holder, DEFAULT_HOLDER_PATTERN};
///
/// assert!(is_valid_holder("John A. O'Neill-Smith", &DEFAULT_HOLDER_PATTERN));
/// assert!(!is_valid_holder("", &DEFAULT_HOLDER_PATTERN));
/// assert!(!is_valid_holder("J0hn", &DEFAULT_HOLDER_PATTERN));
/// ```
pub fn is_valid_holder(name: &str, pattern: &Regex) -> bool {
    !name.is_empty() && pattern.is_match(name)
}

/// Validates an expiry month/year pair against `now`.
///
/// True iff the month is in 1-12, the pair is strictly after
/// `(now.year, now.month)`, and the year is below `now.year + 10`.
/// The current month is rejected as already expired, and acceptance is
/// bounded to a ten-year forward window.
///
/// # Example
///
/// ```
/// use cardcheck::checks::{is_valid_expiry, YearMonth};
///
/// let now = YearMonth { year: 2024, month: 6 };
/// assert!(is_valid_expiry(7, 2024, now));
/// assert!(!is_valid_expiry(6, 2024, now)); // current month
/// assert!(!is_valid_expiry(6, 2034, now)); // past the 10-year window
/// ```
pub fn is_valid_expiry(month: i32, year: i32, now: YearMonth) -> bool {
    (1..=12).contains(&month)
        && (year > now.year || (year == now.year && month > now.month))
        && year < now.year + 10
}

/// Validates a CVV against an issuer's accepted lengths.
///
/// True iff the CVV is non-empty, consists entirely of ASCII digits,
/// and its digit count is one of `accepted_lengths`.
///
/// # Example
///
/// ```
/// use cardcheck::checks::is_valid_cvv;
///
/// assert!(is_valid_cvv("123", &[3, 4]));
/// assert!(is_valid_cvv("1234", &[3, 4]));
/// assert!(!is_valid_cvv("12", &[3, 4]));
/// assert!(!is_valid_cvv("12a", &[3, 4]));
/// ```
pub fn is_valid_cvv(cvv: &str, accepted_lengths: &[u8]) -> bool {
    !cvv.is_empty()
        && cvv.bytes().all(|b| b.is_ascii_digit())
        && accepted_lengths.iter().any(|&l| usize::from(l) == cvv.len())
}
