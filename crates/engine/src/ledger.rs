//! The append-only list of expenses recorded during one session.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{Amount, ConversionError, Currency, CurrencyConverter, ExpenseRecord, RateProvider};

/// One committed expense together with what it contributed to the running total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub record: ExpenseRecord,
    /// Amount in the reference currency added to the total, `None` if the conversion failed.
    pub converted: Option<Amount>,
}

/// Outcome of [`Tracker::validate_and_add`](crate::Tracker::validate_and_add).
///
/// The record is always committed. `conversion` tells whether it reached the total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appended {
    pub record: ExpenseRecord,
    pub conversion: Result<Amount, ConversionError>,
    pub total: Amount,
}

/// Ordered expenses plus their running total in the reference currency.
///
/// Insertion order is display order. There is no way to remove or edit an entry, and the total
/// only ever grows: it is the sum of every entry's converted amount at the time it was added.
#[derive(Clone, Debug, Serialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    total: Amount,
    reference: Currency,
}

impl Ledger {
    pub fn new(reference: Currency) -> Self {
        Self {
            entries: Vec::new(),
            total: Amount::ZERO,
            reference,
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running total, expressed in [`Ledger::reference`].
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn reference(&self) -> Currency {
        self.reference
    }

    /// Number of entries left out of the total because their conversion failed.
    pub fn unconverted(&self) -> usize {
        self.entries.iter().filter(|e| e.converted.is_none()).count()
    }

    /// Appends an already validated expense and adds its converted amount to the total.
    ///
    /// The record is kept even when the conversion fails; in that case the total is unchanged
    /// and the error is returned in [`Appended::conversion`]. `converter` must convert into
    /// [`Ledger::reference`], which [`Tracker`](crate::Tracker) guarantees by building both.
    pub(crate) async fn add_expense<P: RateProvider>(
        &mut self,
        converter: &CurrencyConverter<P>,
        amount: Amount,
        currency: Currency,
        category: &str,
        payment_method: &str,
        date: NaiveDate,
    ) -> Appended {
        debug_assert_eq!(converter.reference(), self.reference);

        let record = ExpenseRecord::new(amount, currency, category, payment_method, date);
        let conversion = converter.convert(amount, currency).await.and_then(|value| {
            self.total = self
                .total
                .checked_add(value)
                .ok_or(ConversionError::TotalOverflow(value.value()))?;
            Ok(value)
        });

        let converted = match &conversion {
            Ok(value) => Some(*value),
            Err(err) => {
                tracing::warn!(%record, "expense recorded without conversion: {err}");
                None
            }
        };
        self.entries.push(LedgerEntry {
            record: record.clone(),
            converted,
        });
        tracing::debug!(entries = self.entries.len(), total = %self.total, "expense appended");

        Appended {
            record,
            conversion,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    /// Converts at a fixed rate of 2 reference units per unit.
    struct Doubling;

    impl RateProvider for Doubling {
        async fn convert(
            &self,
            amount: Amount,
            _from: Currency,
            _to: Currency,
        ) -> Result<Amount, ConversionError> {
            Ok(Amount::new(amount.value() * Decimal::TWO))
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new(Currency::Usd);
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Amount::ZERO);
        assert_eq!(ledger.unconverted(), 0);
    }

    #[tokio::test]
    async fn entry_keeps_converted_amount() {
        let converter = CurrencyConverter::new(Doubling, Currency::Usd);
        let mut ledger = Ledger::new(Currency::Usd);

        let appended = ledger
            .add_expense(
                &converter,
                Amount::new(Decimal::new(10, 0)),
                Currency::Sar,
                "Gas",
                "Cash",
                date(),
            )
            .await;

        assert_eq!(appended.conversion, Ok(Amount::new(Decimal::new(20, 0))));
        assert_eq!(appended.total, Amount::new(Decimal::new(20, 0)));
        assert_eq!(ledger.entries()[0].record.currency(), Currency::Sar);
        assert_eq!(ledger.entries()[0].record.amount().value(), Decimal::new(10, 0));
        assert_eq!(
            ledger.entries()[0].converted,
            Some(Amount::new(Decimal::new(20, 0)))
        );
    }
}
