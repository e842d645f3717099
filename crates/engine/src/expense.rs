//! The module contains the `ExpenseRecord` type, one committed row of the ledger.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{Amount, Currency};

/// Categories offered by the form. Categories are free labels, this is only the suggested list.
pub const CATEGORIES: [&str; 8] = [
    "Life Expenses",
    "Electricity",
    "Gas",
    "Rental",
    "Grocery",
    "Savings",
    "Education",
    "Charity",
];

/// Payment methods offered by the form.
pub const PAYMENT_METHODS: [&str; 3] = ["Cash", "Credit Card", "Paypal"];

/// A validated expense. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    amount: Amount,
    currency: Currency,
    category: String,
    payment_method: String,
    date: NaiveDate,
}

impl ExpenseRecord {
    pub(crate) fn new(
        amount: Amount,
        currency: Currency,
        category: impl Into<String>,
        payment_method: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            currency,
            category: category.into(),
            payment_method: payment_method.into(),
            date,
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl core::fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.amount.format(self.currency),
            self.category,
            self.payment_method
        )
    }
}
