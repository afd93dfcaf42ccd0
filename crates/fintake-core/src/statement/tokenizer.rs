//! Line splitting and best-effort field extraction for statement text.

use crate::models::CandidateRecord;

use super::rules::patterns::{
    AMOUNT_TOKEN, DATETIME_PREFIX, DATE_TOKEN, TIME_TOKEN, TYPE_KEYWORD, TYPE_KEYWORD_EXACT,
};

/// Split raw extracted text into trimmed, non-empty lines, order preserved.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Best-effort extraction of record fields from one statement line.
///
/// Order-dependent: each step consumes part of the line and shrinks the
/// working string. Fields that cannot be located stay empty strings so
/// downstream validation sees a uniform shape.
pub fn tokenize_line(line: &str) -> CandidateRecord {
    let mut record = CandidateRecord::default();
    let mut working = line.trim().to_string();

    // 1. Amount: the last whitespace token that looks amount-shaped, removed
    //    from the line at its last occurrence.
    let amount_token = working
        .split_whitespace()
        .rev()
        .find(|token| AMOUNT_TOKEN.is_match(token))
        .map(str::to_string);
    if let Some(token) = amount_token {
        if let Some(idx) = working.rfind(&token) {
            working.truncate(idx);
        }
        working = working.trim().to_string();
        record.amount_raw = token;
    }

    // 2. Date-time: a leading M/D/YYYY H:MM[:SS][ AM|PM] prefix, or failing
    //    that, the first two tokens when they independently look like a date
    //    and a time.
    if let Some(matched) = DATETIME_PREFIX.find(&working) {
        let end = matched.end();
        record.occurred_at_raw = matched.as_str().trim().to_string();
        working = working[end..].trim().to_string();
    } else {
        let parts: Vec<&str> = working.split_whitespace().collect();
        if parts.len() >= 2 && DATE_TOKEN.is_match(parts[0]) && TIME_TOKEN.is_match(parts[1]) {
            record.occurred_at_raw = format!("{} {}", parts[0], parts[1]);
            working = parts[2..].join(" ");
        }
    }

    // 3. Type keyword at the head of the remainder, tolerating trailing
    //    punctuation stuck to the token.
    let tokens: Vec<&str> = working.split_whitespace().collect();
    let mut rest = tokens.as_slice();
    if let Some(&first) = rest.first() {
        if let Some(caps) = TYPE_KEYWORD.captures(first) {
            record.type_raw = caps[1].to_ascii_uppercase();
            rest = &rest[1..];
        } else {
            let stripped: String = first
                .chars()
                .filter(|c| !matches!(c, ':' | ';' | ','))
                .collect();
            if TYPE_KEYWORD_EXACT.is_match(&stripped) {
                record.type_raw = stripped.to_ascii_uppercase();
                rest = &rest[1..];
            }
        }
    }

    // 4. Next token is the category, the remainder joins into the
    //    description.
    if let Some(&category) = rest.first() {
        record.category = category.to_string();
        rest = &rest[1..];
    }
    if !rest.is_empty() {
        record.description = rest.join(" ");
    }

    record
}
