//! Receipt

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{checkout::CheckoutError, prices::Price, products::ProductId};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One purchased product on a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product id
    pub product: ProductId,

    /// Product name
    pub name: String,

    /// Units purchased
    pub quantity: u64,

    /// Cost at full unit price
    pub subtotal: Price,

    /// Amount charged
    pub total: Price,

    /// Description of the pricing strategy applied, if any
    pub strategy: Option<String>,
}

impl ReceiptLine {
    /// Amount saved on this line.
    pub fn savings(&self) -> Price {
        Price::new(
            self.subtotal.saturating_sub(*self.total),
            self.subtotal.currency(),
        )
    }
}

/// Final receipt for a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    subtotal: Price,
    total: Price,
}

impl Receipt {
    /// Create a receipt from priced lines.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Overflow`] if the totals overflow.
    pub fn new(lines: Vec<ReceiptLine>, currency: &'static Currency) -> Result<Self, CheckoutError> {
        let (subtotal, total) = lines.iter().try_fold((0_i64, 0_i64), |(subtotal, total), line| {
            subtotal
                .checked_add(*line.subtotal)
                .zip(total.checked_add(*line.total))
                .ok_or(CheckoutError::Overflow)
        })?;

        Ok(Receipt {
            lines,
            subtotal: Price::new(subtotal, currency),
            total: Price::new(total, currency),
        })
    }

    /// Purchased lines in catalog order
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total cost before any pricing strategies
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Total amount charged
    pub fn total(&self) -> Price {
        self.total
    }

    /// Amount saved by pricing strategies
    pub fn savings(&self) -> Price {
        Price::new(
            self.subtotal.saturating_sub(*self.total),
            self.total.currency(),
        )
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Base Price", "Price", "Savings", "Pricing"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                line.subtotal.to_string(),
                line.total.to_string(),
                line.savings().to_string(),
                line.strategy.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..5), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        for (label, value) in [
            ("Subtotal:", self.subtotal),
            ("Total:", self.total),
            ("Savings:", self.savings()),
        ] {
            writeln!(out, "{label:>10} {:>12}", value.to_string())
                .map_err(|_err| ReceiptError::IO)?;
        }

        Ok(())
    }
}
