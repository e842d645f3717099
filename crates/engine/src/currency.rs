use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO currency code selectable for an expense.
///
/// The set is closed: the form only offers these codes, so an expense can never carry a
/// currency the tracker does not know about. One of them is the *reference* currency the
/// running total is expressed in (`USD` unless configured otherwise).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Aed,
    Sar,
}

impl Currency {
    /// Every selectable currency, in the order the form lists them.
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Aed, Currency::Sar];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "AED" => Ok(Currency::Aed),
            "SAR" => Ok(Currency::Sar),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}
