//! Common regex patterns for statement-line tokenization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Amount-shaped token: optional sign, optional currency symbol, digits
    /// with optional grouping and decimals. Tested per whitespace token, not
    /// anchored, so a token merely containing a digit run qualifies.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"[+-]?\$?\d[\d,]*\.?\d*"
    ).unwrap();

    /// Leading date-time: M/D/YYYY with optional comma, H:MM, optional
    /// seconds, optional AM/PM marker.
    pub static ref DATETIME_PREFIX: Regex = Regex::new(
        r"^(\d{1,2}/\d{1,2}/\d{4},?\s*\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM|am|pm)?)"
    ).unwrap();

    /// Token that looks like a slash date.
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"\d{1,2}/\d{1,2}/\d{4}"
    ).unwrap();

    /// Token that looks like a clock time.
    pub static ref TIME_TOKEN: Regex = Regex::new(
        r"\d{1,2}:\d{2}"
    ).unwrap();

    /// Leading transaction-type keyword.
    pub static ref TYPE_KEYWORD: Regex = Regex::new(
        r"(?i)^(INCOME|EXPENSE|CREDIT|DEBIT)"
    ).unwrap();

    /// Whole-token type keyword, used after stripping trailing punctuation.
    pub static ref TYPE_KEYWORD_EXACT: Regex = Regex::new(
        r"(?i)^(income|expense|credit|debit)$"
    ).unwrap();

    /// First `{...}`-shaped substring of a model response (greedy, spans
    /// lines).
    pub static ref JSON_OBJECT: Regex = Regex::new(
        r"(?s)\{.*\}"
    ).unwrap();
}
