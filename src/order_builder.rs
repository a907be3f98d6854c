//! # Order Builder Module
//!
//! Turns raw clause triples into priced order lines: resolves the product
//! against the catalog, resolves and converts the unit, computes the total.
//! Triples that cannot be resolved are dropped, never reported as errors.

use crate::catalog::{Catalog, CatalogEntry};
use crate::clause_parser::RawTriple;
use crate::order::OrderLine;
use crate::units::{convert, SubUnit, UnitResolver};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when the spoken unit disagrees with the product's base unit
/// (e.g. "2 piece rice", rice being priced per kilogram)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitMismatchPolicy {
    /// Keep the converted quantity and relabel it with the base unit
    #[default]
    Coerce,
    /// Drop the line
    Reject,
    /// Keep the spoken unit on the line
    PassThrough,
}

impl FromStr for UnitMismatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coerce" => Ok(Self::Coerce),
            "reject" => Ok(Self::Reject),
            "pass-through" | "passthrough" => Ok(Self::PassThrough),
            other => Err(format!("unknown unit mismatch policy '{other}'")),
        }
    }
}

impl fmt::Display for UnitMismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Coerce => "coerce",
            Self::Reject => "reject",
            Self::PassThrough => "pass-through",
        };
        write!(f, "{name}")
    }
}

/// Builds order lines against a borrowed catalog and unit dictionary
#[derive(Debug, Clone, Copy)]
pub struct OrderBuilder<'a> {
    catalog: &'a Catalog,
    units: &'a UnitResolver,
    policy: UnitMismatchPolicy,
}

impl<'a> OrderBuilder<'a> {
    pub fn new(catalog: &'a Catalog, units: &'a UnitResolver) -> Self {
        Self {
            catalog,
            units,
            policy: UnitMismatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnitMismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve every triple, keeping the ones that map to a catalog product
    pub fn build(&self, triples: &[RawTriple]) -> Vec<OrderLine> {
        let lines: Vec<OrderLine> = triples.iter().filter_map(|t| self.build_one(t)).collect();
        debug!("Built {} order lines from {} triples", lines.len(), triples.len());
        lines
    }

    fn build_one(&self, triple: &RawTriple) -> Option<OrderLine> {
        let Some(entry) = self.catalog.resolve_product(&triple.product_text) else {
            debug!("Dropping '{}': no matching product", triple.product_text);
            return None;
        };
        let sub_unit = if triple.unit_hint.is_empty() {
            None
        } else {
            let token = self.units.resolve_token(&triple.unit_hint);
            debug!("Unit hint '{}' resolved to {:?}", token.raw, token.unit);
            Some(token.unit)
        };
        self.line_for(entry, triple.quantity, sub_unit)
    }

    /// Price `quantity` of `entry` spoken in `sub_unit`
    ///
    /// Returns `None` for a quantity that is non-positive before or after
    /// conversion, for a total too large to represent, or for a unit mismatch
    /// under [`UnitMismatchPolicy::Reject`].
    pub fn line_for(&self, entry: &CatalogEntry, quantity: Decimal, sub_unit: Option<SubUnit>) -> Option<OrderLine> {
        if quantity <= Decimal::ZERO {
            debug!("Dropping {}: non-positive quantity {}", entry.canonical_id, quantity);
            return None;
        }

        let (quantity, unit) = convert(quantity, sub_unit, entry.base_unit);
        if quantity.is_zero() {
            debug!("Dropping {}: quantity vanishes when converted to {}", entry.canonical_id, unit);
            return None;
        }
        let unit = if unit == entry.base_unit {
            unit
        } else {
            match self.policy {
                UnitMismatchPolicy::Coerce => {
                    warn!(
                        "Spoken unit {} for {} (priced per {}), pricing as {}",
                        unit, entry.canonical_id, entry.base_unit, entry.base_unit
                    );
                    entry.base_unit
                }
                UnitMismatchPolicy::Reject => {
                    warn!("Rejecting {}: spoken unit {} is not {}", entry.canonical_id, unit, entry.base_unit);
                    return None;
                }
                UnitMismatchPolicy::PassThrough => unit,
            }
        };

        let line = OrderLine::new(&entry.canonical_id, quantity, unit, entry.base_price);
        if line.is_none() {
            debug!("Dropping {}: total of {} x {} overflows", entry.canonical_id, quantity, entry.base_price);
        }
        line
    }

    /// Build a line for an explicitly chosen product (manual entry)
    pub fn manual_line(&self, product_id: &str, quantity: Decimal, sub_unit: Option<SubUnit>) -> Option<OrderLine> {
        let entry = self.catalog.get(product_id)?;
        self.line_for(entry, quantity, sub_unit)
    }
}
