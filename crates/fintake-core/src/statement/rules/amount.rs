//! Amount normalization into signed minor units.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidAmount;
use crate::models::{NormalizedAmount, Sign};

/// Normalize a free-form amount string (`+$12000.00`, `(45.00)`, `1,234.56`)
/// into absolute minor units plus a sign.
///
/// Every character except digits, `.`, `+`, `-` is stripped before parsing.
/// A parenthesized original is negative regardless of the stripped sign;
/// otherwise the sign comes from a leading `-`. Cents are rounded half-up.
/// Zero amounts fail: on statement lines they are parse noise, not data.
pub fn normalize_amount(raw: &str) -> Result<NormalizedAmount, InvalidAmount> {
    let trimmed = raw.trim();
    let parenthesized = trimmed.len() >= 2 && trimmed.starts_with('(') && trimmed.ends_with(')');

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        .collect();

    let negative_prefix = cleaned.starts_with('-');
    let magnitude = cleaned
        .trim_start_matches(['+', '-'])
        .trim_end_matches('.');

    let value = Decimal::from_str(magnitude).map_err(|_| InvalidAmount {
        raw: raw.to_string(),
    })?;

    let minor_units = (value.abs() * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| InvalidAmount {
            raw: raw.to_string(),
        })?;

    if minor_units == 0 {
        return Err(InvalidAmount {
            raw: raw.to_string(),
        });
    }

    let sign = if parenthesized || negative_prefix {
        Sign::Negative
    } else {
        Sign::Positive
    };

    Ok(NormalizedAmount { minor_units, sign })
}
