//! # Unit Resolver Module
//!
//! Maps free-text unit tokens (English and Hindi) to canonical units and
//! converts sub-units into the base units products are priced in.
//!
//! ## Resolution policy
//!
//! `resolve_unit` returns the first dictionary entry whose keyword is a
//! substring of the token. Matching is first-match in declaration order, not
//! longest-match, so dictionaries must be declared most-specific-first
//! (`मिलीलीटर` before `लीटर`, `ml` before `l`, `kg` before `g`).

use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units a product's price can be denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    Kilogram,
    Liter,
    Piece,
}

impl BaseUnit {
    /// Canonical spoken keyword for this unit; resolves back to `self`
    pub fn keyword(&self) -> &'static str {
        match self {
            BaseUnit::Kilogram => "kg",
            BaseUnit::Liter => "liter",
            BaseUnit::Piece => "piece",
        }
    }

    /// Fluent message key used by renderers for the unit label
    pub fn label_key(&self) -> &'static str {
        match self {
            BaseUnit::Kilogram => "unit-kilogram",
            BaseUnit::Liter => "unit-liter",
            BaseUnit::Piece => "unit-piece",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A unit as it may be spoken, before normalization to a base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubUnit {
    Gram,
    Milliliter,
    Kilogram,
    Liter,
    Piece,
    Unknown,
}

impl From<BaseUnit> for SubUnit {
    fn from(unit: BaseUnit) -> Self {
        match unit {
            BaseUnit::Kilogram => SubUnit::Kilogram,
            BaseUnit::Liter => SubUnit::Liter,
            BaseUnit::Piece => SubUnit::Piece,
        }
    }
}

/// A unit hint taken from a clause together with its resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitToken {
    /// Raw text as captured (e.g. "grams", "किलो")
    pub raw: String,
    /// Resolved sub-unit, `Unknown` if no keyword matched
    pub unit: SubUnit,
}

/// Default keyword dictionary, most-specific-first.
pub const DEFAULT_UNIT_KEYWORDS: &[(&str, SubUnit)] = &[
    // kilograms
    ("kilograms", SubUnit::Kilogram),
    ("kilogram", SubUnit::Kilogram),
    ("kilo", SubUnit::Kilogram),
    ("kgs", SubUnit::Kilogram),
    ("kg", SubUnit::Kilogram),
    ("किलोग्राम", SubUnit::Kilogram),
    ("किलो", SubUnit::Kilogram),
    // milliliters
    ("milliliters", SubUnit::Milliliter),
    ("milliliter", SubUnit::Milliliter),
    ("millilitres", SubUnit::Milliliter),
    ("millilitre", SubUnit::Milliliter),
    ("ml", SubUnit::Milliliter),
    ("मिलीलीटर", SubUnit::Milliliter),
    ("मिली", SubUnit::Milliliter),
    // grams
    ("grams", SubUnit::Gram),
    ("gram", SubUnit::Gram),
    ("gm", SubUnit::Gram),
    ("g", SubUnit::Gram),
    ("ग्राम", SubUnit::Gram),
    // liters
    ("liters", SubUnit::Liter),
    ("liter", SubUnit::Liter),
    ("litres", SubUnit::Liter),
    ("litre", SubUnit::Liter),
    ("ltr", SubUnit::Liter),
    ("l", SubUnit::Liter),
    ("लीटर", SubUnit::Liter),
    // pieces
    ("pieces", SubUnit::Piece),
    ("piece", SubUnit::Piece),
    ("pcs", SubUnit::Piece),
    ("pc", SubUnit::Piece),
    ("packets", SubUnit::Piece),
    ("packet", SubUnit::Piece),
    ("units", SubUnit::Piece),
    ("unit", SubUnit::Piece),
    ("पीस", SubUnit::Piece),
    ("टुकड़े", SubUnit::Piece),
    ("पैकेट", SubUnit::Piece),
];

/// Resolves unit tokens against an ordered keyword dictionary
#[derive(Debug, Clone)]
pub struct UnitResolver {
    keywords: Vec<(String, SubUnit)>,
}

impl UnitResolver {
    /// Create a resolver over the default English + Hindi dictionary
    pub fn new() -> Self {
        Self::with_keywords(DEFAULT_UNIT_KEYWORDS.iter().map(|(k, u)| (k.to_string(), *u)))
    }

    /// Create a resolver over a custom dictionary
    ///
    /// Declaration order is the match order, so put the most specific
    /// keywords first.
    pub fn with_keywords<I>(keywords: I) -> Self
    where
        I: IntoIterator<Item = (String, SubUnit)>,
    {
        let keywords = keywords
            .into_iter()
            .map(|(k, u)| (k.trim().to_lowercase(), u))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Keywords in declaration order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|(k, _)| k.as_str())
    }

    /// Resolve a token to the first sub-unit whose keyword it contains
    ///
    /// # Examples
    ///
    /// ```rust
    /// use voice_bill::units::{SubUnit, UnitResolver};
    ///
    /// let units = UnitResolver::new();
    /// assert_eq!(units.resolve_unit("grams"), Some(SubUnit::Gram));
    /// assert_eq!(units.resolve_unit("लीटर"), Some(SubUnit::Liter));
    /// assert_eq!(units.resolve_unit(""), None);
    /// ```
    pub fn resolve_unit(&self, token: &str) -> Option<SubUnit> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }

        let found = self
            .keywords
            .iter()
            .find(|(keyword, _)| token.contains(keyword.as_str()))
            .map(|(_, unit)| *unit);
        trace!("Resolved unit token '{}' -> {:?}", token, found);
        found
    }

    /// Resolve a raw token into a `UnitToken`, `Unknown` when nothing matches
    pub fn resolve_token(&self, raw: &str) -> UnitToken {
        UnitToken {
            raw: raw.to_string(),
            unit: self.resolve_unit(raw).unwrap_or(SubUnit::Unknown),
        }
    }

    /// Whether `text` is exactly one of the dictionary keywords
    pub fn is_unit_keyword(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        self.keywords.iter().any(|(keyword, _)| *keyword == text)
    }
}

impl Default for UnitResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a quantity spoken in `sub_unit` into a base unit
///
/// Grams and milliliters are scaled down by 1000. Kilogram, liter and piece
/// pass through verbatim even when they disagree with `base_unit`; the order
/// builder decides what to do with such mismatches.
///
/// # Examples
///
/// ```rust
/// use rust_decimal::Decimal;
/// use voice_bill::units::{convert, BaseUnit, SubUnit};
///
/// let (qty, unit) = convert(Decimal::from(500), Some(SubUnit::Gram), BaseUnit::Kilogram);
/// assert_eq!(qty, Decimal::new(5, 1));
/// assert_eq!(unit, BaseUnit::Kilogram);
/// ```
pub fn convert(quantity: Decimal, sub_unit: Option<SubUnit>, base_unit: BaseUnit) -> (Decimal, BaseUnit) {
    let thousand = Decimal::from(1000);
    let converted = match sub_unit {
        None => (quantity, base_unit),
        Some(SubUnit::Gram) => (quantity / thousand, BaseUnit::Kilogram),
        Some(SubUnit::Milliliter) => (quantity / thousand, BaseUnit::Liter),
        Some(SubUnit::Kilogram) => (quantity, BaseUnit::Kilogram),
        Some(SubUnit::Liter) => (quantity, BaseUnit::Liter),
        Some(SubUnit::Piece) => (quantity, BaseUnit::Piece),
        Some(SubUnit::Unknown) => (quantity, base_unit),
    };
    debug!(
        "Converted {} {:?} (base {:?}) -> {} {:?}",
        quantity, sub_unit, base_unit, converted.0, converted.1
    );
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_specific_keywords_win() {
        let units = UnitResolver::new();
        assert_eq!(units.resolve_unit("ml"), Some(SubUnit::Milliliter));
        assert_eq!(units.resolve_unit("मिलीलीटर"), Some(SubUnit::Milliliter));
        assert_eq!(units.resolve_unit("kilograms"), Some(SubUnit::Kilogram));
        assert_eq!(units.resolve_unit("किलोग्राम"), Some(SubUnit::Kilogram));
        assert_eq!(units.resolve_unit("ग्राम"), Some(SubUnit::Gram));
        assert_eq!(units.resolve_unit("लीटर"), Some(SubUnit::Liter));
    }

    #[test]
    fn test_first_match_follows_declaration_order() {
        // "l" is declared before "ml" here, so it swallows milliliters
        let units = UnitResolver::with_keywords(vec![
            ("l".to_string(), SubUnit::Liter),
            ("ml".to_string(), SubUnit::Milliliter),
        ]);
        assert_eq!(units.resolve_unit("ml"), Some(SubUnit::Liter));
    }

    #[test]
    fn test_resolve_token_unknown() {
        let units = UnitResolver::new();
        let token = units.resolve_token("dozen");
        assert_eq!(token.raw, "dozen");
        assert_eq!(token.unit, SubUnit::Unknown);
    }

    #[test]
    fn test_is_unit_keyword_is_exact() {
        let units = UnitResolver::new();
        assert!(units.is_unit_keyword("kg"));
        assert!(units.is_unit_keyword(" किलो "));
        assert!(!units.is_unit_keyword("kg sugar"));
    }

    #[test]
    fn test_convert_rules() {
        let two = Decimal::from(2);
        assert_eq!(convert(two, None, BaseUnit::Liter), (two, BaseUnit::Liter));
        assert_eq!(
            convert(Decimal::from(250), Some(SubUnit::Milliliter), BaseUnit::Liter),
            (Decimal::new(25, 2), BaseUnit::Liter)
        );
        assert_eq!(convert(two, Some(SubUnit::Piece), BaseUnit::Kilogram), (two, BaseUnit::Piece));
        assert_eq!(convert(two, Some(SubUnit::Unknown), BaseUnit::Piece), (two, BaseUnit::Piece));
    }
}
