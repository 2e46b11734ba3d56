use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::rate_resolver::RateResolver;
use crate::accounts::Balance;
use crate::constants::{BTC_CURRENCY, PIVOT_CURRENCY};

/// Converts amounts between fiat codes, "BTC" and the pivot currency.
///
/// Every cross-currency conversion goes through the pivot. A missing or zero
/// rate fails the conversion; nothing is ever valued at zero by default.
#[derive(Debug, Clone, Copy)]
pub struct ValuationConverter<'a> {
    resolver: RateResolver<'a>,
}

impl<'a> ValuationConverter<'a> {
    pub fn new(resolver: RateResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn convert(
        &self,
        amount: Decimal,
        from_code: &str,
        to_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        if from_code == to_code {
            return Ok(amount);
        }

        let in_pivot = if from_code == BTC_CURRENCY {
            mul(amount, self.resolver.btc_price_at(date)?)?
        } else {
            self.fiat_to_pivot(amount, from_code, date)?
        };

        if to_code == BTC_CURRENCY {
            let price = self.resolver.btc_price_at(date)?;
            return div(in_pivot, price, BTC_CURRENCY, date);
        }
        self.pivot_to_fiat(in_pivot, to_code, date)
    }

    /// Values an account balance in `to_code`. Sats are converted as whole
    /// bitcoin.
    pub fn convert_balance(
        &self,
        balance: Balance,
        account_currency: &str,
        to_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        match balance {
            Balance::Fiat(amount) => self.convert(amount, account_currency, to_code, date),
            Balance::Sats(_) => self.convert(balance.to_decimal(), BTC_CURRENCY, to_code, date),
        }
    }

    fn fiat_to_pivot(
        &self,
        amount: Decimal,
        from_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if from_code == PIVOT_CURRENCY {
            return Ok(amount);
        }
        let rate = self.resolver.rate_at(date, from_code)?;
        div(amount, rate, from_code, date)
    }

    fn pivot_to_fiat(
        &self,
        amount: Decimal,
        to_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if to_code == PIVOT_CURRENCY {
            return Ok(amount);
        }
        mul(amount, self.resolver.rate_at(date, to_code)?)
    }
}

fn mul(amount: Decimal, rate: Decimal) -> Result<Decimal, FxError> {
    amount
        .checked_mul(rate)
        .ok_or_else(|| FxError::ConversionError(format!("{} x {} overflows", amount, rate)))
}

fn div(amount: Decimal, rate: Decimal, currency: &str, date: NaiveDate) -> Result<Decimal, FxError> {
    if rate.is_zero() {
        return Err(FxError::ZeroRate {
            currency: currency.to_string(),
            date,
        });
    }
    amount
        .checked_div(rate)
        .ok_or_else(|| FxError::ConversionError(format!("{} / {} overflows", amount, rate)))
}
