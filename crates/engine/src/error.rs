//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`ValidationError`] returned by the field validators. The add operation is aborted and
//!   nothing is mutated.
//! - [`ConversionError`] returned when the rate provider cannot convert an amount, or when the
//!   converted amount no longer fits in the running total. The expense is still recorded but the
//!   running total is left untouched.
//! - [`EngineError`] for anything else the engine rejects.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Rejection of a raw form field.
///
/// The messages are meant to be shown to the user as they are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount \"{0}\". Please enter a valid number.")]
    NotANumber(String),
    #[error("Invalid amount {0}. The amount must be greater than zero.")]
    NonPositive(Decimal),
    #[error("Invalid date \"{0}\". Please enter a date in YYYY-MM-DD format.")]
    BadFormat(String),
    #[error("Invalid date {0}. The date cannot be in the future.")]
    FutureDate(NaiveDate),
}

/// The rate provider could not convert an amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The provider answered with a failure status.
    #[error("conversion unavailable: provider returned {status}: {message}")]
    Status { status: u16, message: String },
    /// No response was obtained.
    #[error("conversion unavailable: {0}")]
    Transport(String),
    /// The provider answered but the body could not be used.
    #[error("conversion unavailable: invalid response: {0}")]
    InvalidResponse(String),
    /// The converted amount would push the running total past the largest representable value.
    #[error("running total overflow: cannot add {0}")]
    TotalOverflow(Decimal),
}
