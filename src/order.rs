//! # Order Line Model
//!
//! The structured, priced result of parsing one clause.

use crate::units::BaseUnit;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One priced item of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Canonical id of the catalog product
    pub product_id: String,
    /// Quantity in `unit`, always positive
    pub quantity: Decimal,
    pub unit: BaseUnit,
    /// Catalog price per base unit at parse time
    pub unit_price: Decimal,
    /// `quantity * unit_price`, rounded half-up to 2 places
    pub line_total: Decimal,
}

impl OrderLine {
    /// Create a line, computing its total from quantity and price
    ///
    /// Returns `None` when the total does not fit in a [`Decimal`].
    pub fn new(product_id: &str, quantity: Decimal, unit: BaseUnit, unit_price: Decimal) -> Option<Self> {
        let line_total = quantity.checked_mul(unit_price)?;
        Some(Self {
            product_id: product_id.to_string(),
            quantity,
            unit,
            unit_price,
            line_total: round_money(line_total),
        })
    }
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {} = {}",
            self.quantity.normalize(),
            self.unit,
            self.product_id,
            self.unit_price,
            self.line_total
        )
    }
}

/// Round to 2 decimal places, halves away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_rounds_half_up() {
        // 0.0125 * 18 = 0.225
        let line = OrderLine::new("salt", Decimal::new(125, 4), BaseUnit::Kilogram, Decimal::from(18)).unwrap();
        assert_eq!(line.line_total, Decimal::new(23, 2));
        assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_money(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn test_display() {
        let line = OrderLine::new("sugar", Decimal::new(50, 2), BaseUnit::Kilogram, Decimal::from(40)).unwrap();
        assert_eq!(line.to_string(), "0.5 kg sugar @ 40 = 20.00");
    }

    #[test]
    fn test_total_overflow_is_none() {
        assert!(OrderLine::new("sugar", Decimal::MAX, BaseUnit::Kilogram, Decimal::from(40)).is_none());
        assert!(OrderLine::new("sugar", Decimal::MAX, BaseUnit::Kilogram, Decimal::ONE).is_some());
    }
}
