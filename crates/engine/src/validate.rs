//! Field validators for the expense form.
//!
//! Each validator turns one raw text field into a typed value or a [`ValidationError`] the
//! caller shows to the user before aborting the add operation.
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::{Amount, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a positive decimal amount.
///
/// Accepts an optional sign, a decimal point and scientific notation (`1e3`). Surrounding
/// whitespace is ignored. The returned amount is the exact decimal value of the text; text
/// whose value does not fit in a [`Decimal`] without rounding is rejected as
/// [`ValidationError::NotANumber`].
///
/// ```rust
/// use engine::{ValidationError, parse_amount};
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("12.345").unwrap().value(), Decimal::new(12_345, 3));
/// assert!(matches!(parse_amount("-5"), Err(ValidationError::NonPositive(_))));
/// assert!(matches!(parse_amount("abc"), Err(ValidationError::NotANumber(_))));
/// ```
pub fn parse_amount(text: &str) -> Result<Amount, ValidationError> {
    let trimmed = text.trim();
    let not_a_number = || ValidationError::NotANumber(trimmed.to_string());

    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        || !trimmed.chars().any(|c| c.is_ascii_digit())
    {
        return Err(not_a_number());
    }

    let value = exact_decimal(trimmed).ok_or_else(not_a_number)?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositive(value));
    }
    Ok(Amount::new(value.normalize()))
}

/// Parses a `YYYY-MM-DD` date that must not be later than today's local date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    parse_date_on(text, Local::now().date_naive())
}

/// Parses a `YYYY-MM-DD` date that must not be later than `today`.
///
/// The format is strict: a four digit year, a two digit month and a two digit day. `today`
/// itself is accepted.
pub fn parse_date_on(text: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let trimmed = text.trim();
    let bad_format = || ValidationError::BadFormat(trimmed.to_string());

    if !has_date_shape(trimmed) {
        return Err(bad_format());
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| bad_format())?;

    if date > today {
        return Err(ValidationError::FutureDate(date));
    }
    Ok(date)
}

/// Formats a date the way [`parse_date_on`] reads it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses `text` without losing any digit, or returns `None`.
fn exact_decimal(text: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (text, 0),
    };
    let mantissa = Decimal::from_str_exact(trim_fraction_zeros(mantissa))
        .ok()?
        .normalize();
    if mantissa.is_zero() {
        return Some(mantissa);
    }

    if exponent >= 0 {
        (0..exponent).try_fold(mantissa, |value, _| value.checked_mul(Decimal::TEN))
    } else {
        let mut value = mantissa;
        let scale = mantissa.scale().checked_add(exponent.unsigned_abs())?;
        value.set_scale(scale).ok()?;
        Some(value)
    }
}

/// Strips zeros trailing the decimal point, which do not change the value.
fn trim_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
