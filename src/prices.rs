//! Prices

use std::{fmt, ops::Deref};

use rusty_money::{Money, iso::Currency};

/// A price in minor currency units (pence/cents) with its currency.
///
/// Displays as a symbol followed by the amount with two fraction digits and
/// no thousands separator, e.g. `$1975.94`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    minor_units: i64,
    currency: &'static Currency,
}

impl Price {
    /// Creates a new Price
    pub fn new(minor_units: i64, currency: &'static Currency) -> Self {
        Price {
            minor_units,
            currency,
        }
    }

    /// Currency of the price
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Converts into a money amount.
    pub fn to_money(self) -> Money<'static, Currency> {
        Money::from_minor(self.minor_units, self.currency)
    }
}

impl From<Money<'static, Currency>> for Price {
    fn from(money: Money<'static, Currency>) -> Self {
        Price::new(money.to_minor_units(), money.currency())
    }
}

impl Deref for Price {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.minor_units
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs_minor = self.minor_units.unsigned_abs();
        let major_units = abs_minor / 100;
        let fractional = abs_minor % 100;
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let code = self.currency.iso_alpha_code;

        match currency_symbol(code) {
            Some(symbol) => write!(f, "{sign}{symbol}{major_units}.{fractional:02}"),
            None => write!(f, "{sign}{major_units}.{fractional:02} {code}"),
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "AUD" | "USD" => Some("$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        _ => None,
    }
}
