//! Conversion of expense amounts into the reference currency.
use std::future::Future;

use crate::{Amount, ConversionError, Currency};

/// External service able to convert an amount between two currencies.
///
/// Implementations perform one lookup per call: no retries and no caching of rates.
pub trait RateProvider {
    fn convert(
        &self,
        amount: Amount,
        from: Currency,
        to: Currency,
    ) -> impl Future<Output = Result<Amount, ConversionError>> + Send;
}

/// Converts amounts into a fixed reference currency through a [`RateProvider`].
#[derive(Debug, Clone)]
pub struct CurrencyConverter<P> {
    provider: P,
    reference: Currency,
}

impl<P: RateProvider> CurrencyConverter<P> {
    pub fn new(provider: P, reference: Currency) -> Self {
        Self {
            provider,
            reference,
        }
    }

    /// The currency every converted amount is expressed in.
    pub fn reference(&self) -> Currency {
        self.reference
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Converts `amount` from `source` into the reference currency.
    ///
    /// Amounts already in the reference currency are returned unchanged without calling the
    /// provider.
    pub async fn convert(&self, amount: Amount, source: Currency) -> Result<Amount, ConversionError> {
        if source == self.reference {
            return Ok(amount);
        }
        tracing::debug!(%amount, %source, reference = %self.reference, "requesting conversion");
        self.provider.convert(amount, source, self.reference).await
    }
}
