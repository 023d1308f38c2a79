//! Pure order pricing computations.
//!
//! Everything in this module operates on records already loaded from the
//! repository and has no side effects. Amounts are stored as integer cents;
//! arithmetic runs on [`Decimal`] at full precision and is rounded half-up to
//! two decimal places only where a storable amount is produced.

use rust_decimal::prelude::*;

pub mod line;
pub mod resolver;
pub mod totals;

pub use line::{LineRequest, build_line};
pub use resolver::{ResolvedPrice, resolve};
pub use totals::{OrderTotals, aggregate};

/// Monetary values are rounded to 2 decimal places, half-up.
const DECIMAL_PLACES: u32 = 2;

/// Interpret integer cents as a decimal amount.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Round an amount half-up to 2 decimal places and convert to integer cents.
pub fn decimal_to_cents(value: Decimal) -> i64 {
    let rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    (rounded * Decimal::ONE_HUNDRED).to_i64().unwrap_or_default()
}

/// Turn a percentage (for example `10.0`) into a multiplier (`0.1`).
pub fn percentage(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default() / Decimal::ONE_HUNDRED
}
