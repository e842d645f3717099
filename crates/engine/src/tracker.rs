//! The session object the presentation layer talks to.
use chrono::{Local, NaiveDate};

use crate::{
    Appended, Currency, CurrencyConverter, Ledger, RateProvider, ValidationError,
    validate::{parse_amount, parse_date_on},
};

type Clock = Box<dyn Fn() -> NaiveDate + Send>;

/// Raw field values as typed into the expense form.
///
/// Currency is already typed since the form only lets the user pick a listed one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawExpense {
    pub amount: String,
    pub currency: Currency,
    pub category: String,
    pub payment_method: String,
    pub date: String,
}

/// Owns the ledger of one running session and the converter feeding its total.
pub struct Tracker<P> {
    ledger: Ledger,
    converter: CurrencyConverter<P>,
    clock: Clock,
}

impl<P: RateProvider> Tracker<P> {
    /// Return a builder for `Tracker`.
    pub fn builder(provider: P) -> TrackerBuilder<P> {
        TrackerBuilder {
            provider,
            reference: Currency::default(),
            clock: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Current ledger, to be rendered after every add.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn converter(&self) -> &CurrencyConverter<P> {
        &self.converter
    }

    /// Today's date according to the session clock.
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Validates the raw form fields and, if they are valid, appends the expense.
    ///
    /// A validation error leaves the ledger untouched. A conversion failure does not: the
    /// expense is recorded and the failure is reported in [`Appended::conversion`].
    pub async fn validate_and_add(&mut self, raw: &RawExpense) -> Result<Appended, ValidationError> {
        let amount = parse_amount(&raw.amount)?;
        let date = parse_date_on(&raw.date, self.today())?;

        Ok(self
            .ledger
            .add_expense(
                &self.converter,
                amount,
                raw.currency,
                &raw.category,
                &raw.payment_method,
                date,
            )
            .await)
    }
}

pub struct TrackerBuilder<P> {
    provider: P,
    reference: Currency,
    clock: Clock,
}

impl<P: RateProvider> TrackerBuilder<P> {
    /// Currency of the running total. Defaults to USD.
    pub fn reference(mut self, reference: Currency) -> Self {
        self.reference = reference;
        self
    }

    /// Source of "today" for the date validator. Defaults to the local date.
    pub fn clock(mut self, clock: impl Fn() -> NaiveDate + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Construct `Tracker`
    pub fn build(self) -> Tracker<P> {
        Tracker {
            ledger: Ledger::new(self.reference),
            converter: CurrencyConverter::new(self.provider, self.reference),
            clock: self.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, ConversionError};

    struct Identity;

    impl RateProvider for Identity {
        async fn convert(
            &self,
            amount: Amount,
            _from: Currency,
            _to: Currency,
        ) -> Result<Amount, ConversionError> {
            Ok(amount)
        }
    }

    #[test]
    fn ledger_and_converter_share_reference() {
        for reference in Currency::ALL {
            let tracker = Tracker::builder(Identity).reference(reference).build();
            assert_eq!(tracker.ledger().reference(), reference);
            assert_eq!(tracker.converter().reference(), reference);
        }
    }
}
