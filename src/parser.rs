//! # Order Parser
//!
//! Entry point of the engine: utterance → clauses → raw triples → order lines.
//!
//! ## Usage
//!
//! ```rust
//! use voice_bill::catalog::Catalog;
//! use voice_bill::parser::OrderParser;
//!
//! let catalog = Catalog::builtin()?;
//! let parser = OrderParser::new(&catalog);
//!
//! let lines = parser.parse("1 kg onion and 2 kg potato");
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].product_id, "onion");
//! assert_eq!(lines[1].product_id, "potato");
//! # Ok::<(), voice_bill::error::CatalogError>(())
//! ```

use crate::catalog::Catalog;
use crate::clause_parser::ClauseParser;
use crate::error::ParserError;
use crate::order::OrderLine;
use crate::order_builder::{OrderBuilder, UnitMismatchPolicy};
use crate::segmenter::Segmenter;
use crate::units::UnitResolver;
use log::{debug, info};

/// Options for the order parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// How to treat a spoken unit that disagrees with the product's base unit
    pub unit_mismatch: UnitMismatchPolicy,
    /// Custom conjunctions to split on. If None, uses the English + Hindi defaults
    pub conjunctions: Option<Vec<String>>,
    /// Custom unit dictionary. If None, uses the built-in keywords
    pub units: Option<UnitResolver>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            unit_mismatch: UnitMismatchPolicy::Coerce,
            conjunctions: None,
            units: None,
        }
    }
}

/// Stateless order parser over a borrowed catalog
#[derive(Debug, Clone)]
pub struct OrderParser<'c> {
    catalog: &'c Catalog,
    units: UnitResolver,
    segmenter: Segmenter,
    clauses: ClauseParser,
    config: ParserConfig,
}

impl<'c> OrderParser<'c> {
    /// Parser with the default unit dictionary and conjunctions
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            units: UnitResolver::new(),
            segmenter: Segmenter::new(),
            clauses: ClauseParser::new(),
            config: ParserConfig::default(),
        }
    }

    /// Parser with custom options
    pub fn with_config(catalog: &'c Catalog, config: ParserConfig) -> Result<Self, ParserError> {
        let segmenter = match &config.conjunctions {
            Some(words) => {
                let words: Vec<&str> = words.iter().map(String::as_str).collect();
                Segmenter::with_conjunctions(&words)?
            }
            None => Segmenter::new(),
        };
        let (units, clauses) = match &config.units {
            Some(units) => (units.clone(), ClauseParser::with_units(units.clone())?),
            None => (UnitResolver::new(), ClauseParser::new()),
        };
        info!(
            "Creating OrderParser: unit_mismatch={}, conjunctions={:?}, unit keywords={}",
            config.unit_mismatch,
            config.conjunctions.as_deref().unwrap_or(&[]),
            units.keywords().count()
        );
        Ok(Self {
            catalog,
            units,
            segmenter,
            clauses,
            config,
        })
    }

    /// Parser with a custom unit dictionary and otherwise default options
    pub fn with_units(catalog: &'c Catalog, units: UnitResolver) -> Result<Self, ParserError> {
        Self::with_config(
            catalog,
            ParserConfig {
                units: Some(units),
                ..Default::default()
            },
        )
    }

    /// Order builder sharing this parser's catalog, units and policy
    pub fn builder(&self) -> OrderBuilder<'_> {
        OrderBuilder::new(self.catalog, &self.units).with_policy(self.config.unit_mismatch)
    }

    /// Parse an utterance into order lines, in spoken order
    ///
    /// Never fails: empty input and clauses that cannot be understood simply
    /// contribute no lines.
    pub fn parse(&self, utterance: &str) -> Vec<OrderLine> {
        let builder = self.builder();
        let lines: Vec<OrderLine> = self
            .segmenter
            .segment(utterance)
            .iter()
            .flat_map(|clause| builder.build(&self.clauses.parse_clause(clause)))
            .collect();

        debug!("Parsed '{}' into {} order lines", utterance, lines.len());
        lines
    }
}

/// Parse `utterance` against `catalog` with default options
pub fn parse_order(catalog: &Catalog, utterance: &str) -> Vec<OrderLine> {
    OrderParser::new(catalog).parse(utterance)
}
