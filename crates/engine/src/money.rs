use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::Currency;

/// Exact decimal money amount.
///
/// Amounts entered in the form and amounts returned by the rate provider both land here. The
/// stored value is never rounded; only [`Display`](fmt::Display) and [`Amount::format`] round to
/// two fraction digits.
///
/// # Examples
///
/// ```rust
/// use engine::{Amount, Currency};
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(12_345, 3));
/// assert_eq!(amount.value(), Decimal::new(12_345, 3));
/// assert_eq!(amount.to_string(), "12.35");
/// assert_eq!(amount.format(Currency::Usd), "12.35 USD");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the exact decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Exact sum, or `None` when it does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Formats the amount followed by the currency code, e.g. `50.00 USD`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        format!("{self} {currency}")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.2}")
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}
