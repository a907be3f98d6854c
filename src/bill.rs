//! # Bill Module
//!
//! Caller-side accumulator for order lines. The parser keeps no state, so a
//! running bill is owned by whoever feeds it utterances.

use crate::order::OrderLine;
use chrono::{DateTime, Local};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An ordered list of order lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    items: Vec<OrderLine>,
    /// When the bill was started or last cleared
    pub created_at: DateTime<Local>,
}

impl Bill {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            created_at: Local::now(),
        }
    }

    /// Append lines in order, returning how many were added
    ///
    /// A line that would push the bill total past [`Decimal::MAX`] is skipped.
    pub fn append(&mut self, lines: Vec<OrderLine>) -> usize {
        let mut total = self.total();
        let mut added = 0;
        for line in lines {
            match total.checked_add(line.line_total) {
                Some(sum) => {
                    total = sum;
                    self.items.push(line);
                    added += 1;
                }
                None => warn!("Skipping {}: bill total would overflow", line),
            }
        }
        info!("Added {} items to bill ({} total)", added, self.items.len());
        added
    }

    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    /// Remove every line and restart the bill
    pub fn clear(&mut self) {
        info!("Clearing bill with {} items", self.items.len());
        self.items.clear();
        self.created_at = Local::now();
    }

    /// Sum of line totals
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::BaseUnit;

    fn line(product_id: &str, quantity: Decimal, unit_price: Decimal) -> OrderLine {
        OrderLine::new(product_id, quantity, BaseUnit::Kilogram, unit_price).unwrap()
    }

    #[test]
    fn test_append_keeps_order_and_totals() {
        let mut bill = Bill::new();
        let added = bill.append(vec![
            line("rice", Decimal::ONE, Decimal::from(60)),
            line("salt", Decimal::new(5, 1), Decimal::from(18)),
        ]);
        assert_eq!(added, 2);
        assert_eq!(bill.items()[1].product_id, "salt");
        assert_eq!(bill.total(), Decimal::from(69));
    }

    #[test]
    fn test_append_skips_line_that_overflows_total() {
        let mut bill = Bill::new();
        let huge = line("gold", Decimal::MAX, Decimal::ONE);
        let added = bill.append(vec![huge.clone(), huge, line("rice", Decimal::ONE, Decimal::from(60))]);

        assert_eq!(added, 1);
        assert_eq!(bill.len(), 1);
        assert_eq!(bill.total(), Decimal::MAX);
    }
}
