//! # Clause Parser Module
//!
//! Extracts raw (quantity, unit hint, product text) triples from a single
//! order clause.
//!
//! ## Patterns
//!
//! Two patterns are applied to every clause, in this order, and both may
//! contribute triples:
//!
//! 1. **Quantity-first**: `2 kg sugar`, `500 ग्राम दाल`, `1 kg of rice`
//! 2. **Product-first**: `sugar 2 kg`, `चीनी 2 किलो`
//!
//! The unit slot accepts only keywords from the [`UnitResolver`] dictionary,
//! as a whole word. Letters are ASCII letters plus the Devanagari block.

use crate::units::UnitResolver;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::str::FromStr;

/// ASCII letters plus the Devanagari block
const LETTERS: &str = r"a-zA-Z\x{0900}-\x{097F}";
const NUMBER: &str = r"\d+(?:\.\d+)?";
/// Words allowed between the unit and the product ("2 kg of rice", "2 किलो का आटा")
const CONNECTORS: &[&str] = &["of", "का", "की", "के"];

lazy_static! {
    static ref DEFAULT_PATTERNS: ClausePatterns = ClausePatterns::compile(&UnitResolver::new())
        .expect("Default clause patterns should be valid");
}

/// A quantity, unit hint and product phrase taken from one pattern match
#[derive(Debug, Clone, PartialEq)]
pub struct RawTriple {
    pub quantity: Decimal,
    /// Unit text as spoken, empty when no unit was given
    pub unit_hint: String,
    pub product_text: String,
}

impl RawTriple {
    /// Build a triple from the three groups of a match
    ///
    /// A first group starting with a digit is read as quantity-first
    /// (`quantity, unit, product`), anything else as product-first
    /// (`product, quantity, unit`). Returns `None` when the quantity does not
    /// parse as a decimal.
    pub fn from_groups(first: &str, second: &str, third: &str) -> Option<Self> {
        let quantity_first = first.chars().next().is_some_and(|c| c.is_ascii_digit());
        let (quantity, unit_hint, product_text) = if quantity_first {
            (first, second, third)
        } else {
            (second, third, first)
        };

        match Decimal::from_str(quantity.trim()) {
            Ok(quantity) => Some(Self {
                quantity,
                unit_hint: unit_hint.trim().to_string(),
                product_text: product_text.trim().to_string(),
            }),
            Err(e) => {
                debug!("Discarding match with malformed quantity '{}': {}", quantity, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
struct ClausePatterns {
    quantity_first: Regex,
    product_first: Regex,
}

impl ClausePatterns {
    fn compile(units: &UnitResolver) -> Result<Self, regex::Error> {
        let mut keywords: Vec<&str> = units.keywords().collect();
        // alternation is leftmost-first, so longer keywords must come first
        keywords.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        let unit_alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let connectors = CONNECTORS.join("|");

        let quantity_first = format!(
            r"({NUMBER})\s*(?:({unit_alternation})\b\.?)?\s*(?:(?:{connectors})\b)?\s*([{LETTERS}\s]+)"
        );
        let product_first =
            format!(r"([{LETTERS}\s]+?)\s*({NUMBER})\s*(?:({unit_alternation})\b\.?)?");

        Ok(Self {
            quantity_first: Regex::new(&quantity_first)?,
            product_first: Regex::new(&product_first)?,
        })
    }
}

/// Applies the quantity-first and product-first patterns to a clause
#[derive(Debug, Clone)]
pub struct ClauseParser {
    patterns: ClausePatterns,
    units: UnitResolver,
}

impl ClauseParser {
    /// Parser over the default unit dictionary
    pub fn new() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
            units: UnitResolver::new(),
        }
    }

    /// Parser whose unit slot accepts the keywords of `units`
    pub fn with_units(units: UnitResolver) -> Result<Self, regex::Error> {
        let patterns = ClausePatterns::compile(&units)?;
        Ok(Self { patterns, units })
    }

    /// Extract every triple both patterns find in `clause`
    ///
    /// Matches with a malformed quantity, or whose product phrase is empty or
    /// nothing but a unit keyword or connector, are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use voice_bill::clause_parser::ClauseParser;
    ///
    /// let parser = ClauseParser::new();
    /// let triples = parser.parse_clause("500 grams dal");
    /// assert_eq!(triples.len(), 1);
    /// assert_eq!(triples[0].unit_hint, "grams");
    /// assert_eq!(triples[0].product_text, "dal");
    /// ```
    pub fn parse_clause(&self, clause: &str) -> Vec<RawTriple> {
        let mut triples = Vec::new();

        for pattern in [&self.patterns.quantity_first, &self.patterns.product_first] {
            for captures in pattern.captures_iter(clause) {
                trace!("Pattern matched '{}' in clause '{}'", &captures[0], clause);
                if let Some(triple) = self.triple_from_captures(&captures) {
                    triples.push(triple);
                }
            }
        }

        debug!("Clause '{}' yielded {} raw triples", clause, triples.len());
        triples
    }

    fn triple_from_captures(&self, captures: &Captures<'_>) -> Option<RawTriple> {
        let group = |i: usize| captures.get(i).map_or("", |m| m.as_str());
        let triple = RawTriple::from_groups(group(1), group(2), group(3))?;

        if triple.product_text.is_empty()
            || self.units.is_unit_keyword(&triple.product_text)
            || CONNECTORS.contains(&triple.product_text.as_str())
        {
            trace!("Discarding match without a product phrase: {:?}", triple);
            return None;
        }
        Some(triple)
    }
}

impl Default for ClauseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(quantity: i64, unit_hint: &str, product_text: &str) -> RawTriple {
        RawTriple {
            quantity: Decimal::from(quantity),
            unit_hint: unit_hint.to_string(),
            product_text: product_text.to_string(),
        }
    }

    #[test]
    fn test_quantity_first() {
        let parser = ClauseParser::new();
        assert_eq!(parser.parse_clause("2 kg sugar"), vec![triple(2, "kg", "sugar")]);
        assert_eq!(parser.parse_clause("2kg sugar"), vec![triple(2, "kg", "sugar")]);
        assert_eq!(parser.parse_clause("3 bread"), vec![triple(3, "", "bread")]);
    }

    #[test]
    fn test_connector_is_skipped() {
        let parser = ClauseParser::new();
        assert_eq!(parser.parse_clause("1 kg of rice"), vec![triple(1, "kg", "rice")]);
        assert_eq!(
            parser.parse_clause("2 किलो का आटा"),
            vec![triple(2, "किलो", "आटा")]
        );
    }

    #[test]
    fn test_connector_alone_is_not_a_product() {
        let parser = ClauseParser::new();
        assert!(parser.parse_clause("2 kg of").is_empty());
        assert!(parser.parse_clause("2 किलो का").is_empty());
    }

    #[test]
    fn test_product_first() {
        let parser = ClauseParser::new();
        assert_eq!(parser.parse_clause("sugar 2 kg"), vec![triple(2, "kg", "sugar")]);
        assert_eq!(parser.parse_clause("चीनी 2 किलो"), vec![triple(2, "किलो", "चीनी")]);
    }

    #[test]
    fn test_both_patterns_contribute() {
        let parser = ClauseParser::new();
        assert_eq!(
            parser.parse_clause("sugar 2 kg rice"),
            vec![triple(2, "kg", "rice"), triple(2, "kg", "sugar")]
        );
    }

    #[test]
    fn test_unit_must_be_a_whole_word() {
        let parser = ClauseParser::new();
        // "g" must not be split off "ghee", nor "l" off "lentils"
        assert_eq!(parser.parse_clause("2 ghee"), vec![triple(2, "", "ghee")]);
        assert_eq!(parser.parse_clause("2 lentils"), vec![triple(2, "", "lentils")]);
    }

    #[test]
    fn test_longest_unit_keyword_is_captured() {
        let parser = ClauseParser::new();
        let triples = parser.parse_clause("2 किलोग्राम चावल");
        assert_eq!(triples, vec![triple(2, "किलोग्राम", "चावल")]);
    }

    #[test]
    fn test_decimal_quantity() {
        let parser = ClauseParser::new();
        let triples = parser.parse_clause("1.5 kg rice");
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].quantity, Decimal::new(15, 1));
    }

    #[test]
    fn test_unparseable_clauses_yield_nothing() {
        let parser = ClauseParser::new();
        assert!(parser.parse_clause("some sugar please").is_empty());
        assert!(parser.parse_clause("").is_empty());
        // only a unit after the number, no product phrase
        assert!(parser.parse_clause("2 kg").is_empty());
        // Bengali digits match \d but are not a decimal quantity
        assert!(parser.parse_clause("৩ kg sugar").is_empty());
    }

    #[test]
    fn test_from_groups_disambiguation() {
        assert_eq!(RawTriple::from_groups("2", "kg", "sugar"), Some(triple(2, "kg", "sugar")));
        assert_eq!(RawTriple::from_groups("sugar ", "2", "kg"), Some(triple(2, "kg", "sugar")));
        assert_eq!(RawTriple::from_groups("sugar", "two", "kg"), None);
    }
}
