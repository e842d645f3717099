//! Expense tracking engine.
//!
//! Raw form fields go through the validators ([`parse_amount`], [`parse_date`]), valid expenses are
//! appended to a [`Ledger`] and their amount is converted into the reference currency by a
//! [`CurrencyConverter`] to keep a running total. [`Tracker`] bundles the pieces for one session
//! and exposes [`Tracker::validate_and_add`] to the presentation layer.
//!
//! The engine does no I/O itself: the external rate service is reached through the
//! [`RateProvider`] trait.
pub use convert::{CurrencyConverter, RateProvider};
pub use currency::Currency;
pub use error::{ConversionError, EngineError, ValidationError};
pub use expense::{CATEGORIES, ExpenseRecord, PAYMENT_METHODS};
pub use ledger::{Appended, Ledger, LedgerEntry};
pub use money::Amount;
pub use tracker::{RawExpense, Tracker, TrackerBuilder};
pub use validate::{format_date, parse_amount, parse_date, parse_date_on};

mod convert;
mod currency;
mod error;
mod expense;
mod ledger;
mod money;
mod tracker;
mod validate;
