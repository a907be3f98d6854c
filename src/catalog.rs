//! # Product Catalog Module
//!
//! Immutable registry of canonical products with their prices, base units,
//! aliases and display names.
//!
//! ## Product resolution
//!
//! Products are resolved in two phases:
//!
//! 1. Exact alias match on the normalized (lowercase, trimmed) text
//! 2. Ordered linear scan over every alias, in declaration order, returning the
//!    first alias that contains the text or is contained by it
//!
//! The second phase is not a best-match search: when several aliases overlap
//! the text, the one declared first wins.
//!
//! ## Usage
//!
//! ```rust
//! use voice_bill::catalog::Catalog;
//!
//! let catalog = Catalog::builtin()?;
//! assert_eq!(catalog.lookup_alias("चीनी"), Some("sugar"));
//! assert_eq!(catalog.resolve_product("some rice").map(|e| e.canonical_id.as_str()), Some("rice"));
//! # Ok::<(), voice_bill::error::CatalogError>(())
//! ```

use crate::error::CatalogError;
use crate::units::BaseUnit;
use log::{debug, info, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Catalog embedded at build time
const BUILTIN_CATALOG: &str = include_str!("../catalog/default_catalog.json");

/// A canonical product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique key (e.g. "wheat_flour")
    pub canonical_id: String,
    /// Price per base unit
    pub base_price: Decimal,
    /// Unit the price is denominated in
    pub base_unit: BaseUnit,
    /// Surface strings in any language that resolve to this product
    pub aliases: Vec<String>,
    /// Locale tag -> human readable label
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,
}

impl CatalogEntry {
    /// Display name for `locale`, falling back to English, then to the id
    pub fn display_name(&self, locale: &str) -> &str {
        self.display_names
            .get(locale)
            .or_else(|| self.display_names.get("en"))
            .map(String::as_str)
            .unwrap_or(&self.canonical_id)
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<CatalogEntry>,
}

/// Read-only product registry
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// Normalized alias -> entry index
    exact: HashMap<String, usize>,
    /// Every alias with its entry index, in declaration order
    aliases: Vec<(String, usize)>,
}

impl Catalog {
    /// Build a catalog from entries, validating ids, prices and aliases
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut entries = entries;
        for entry in entries.iter_mut() {
            entry.canonical_id = entry.canonical_id.trim().to_string();
            entry.aliases = entry
                .aliases
                .iter()
                .map(|alias| normalize(alias))
                .filter(|alias| !alias.is_empty())
                .collect();
        }

        let mut exact: HashMap<String, usize> = HashMap::new();
        let mut aliases = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.canonical_id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if entries[..index].iter().any(|e| e.canonical_id == entry.canonical_id) {
                return Err(CatalogError::DuplicateProduct(entry.canonical_id.clone()));
            }
            if entry.base_price <= Decimal::ZERO {
                return Err(CatalogError::InvalidPrice(entry.canonical_id.clone()));
            }
            if entry.aliases.is_empty() {
                return Err(CatalogError::NoAliases(entry.canonical_id.clone()));
            }

            for alias in &entry.aliases {
                match exact.get(alias) {
                    // Same alias listed twice on one product is harmless
                    Some(&owner) if owner == index => continue,
                    Some(&owner) => {
                        return Err(CatalogError::DuplicateAlias {
                            alias: alias.clone(),
                            first: entries[owner].canonical_id.clone(),
                            second: entry.canonical_id.clone(),
                        });
                    }
                    None => {
                        exact.insert(alias.clone(), index);
                        aliases.push((alias.clone(), index));
                    }
                }
            }
        }

        info!(
            "Loaded catalog with {} products and {} aliases",
            entries.len(),
            aliases.len()
        );
        Ok(Self {
            entries,
            exact,
            aliases,
        })
    }

    /// Parse a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.products)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a canonical id
    pub fn get(&self, canonical_id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.canonical_id == canonical_id)
    }

    /// Exact alias lookup on normalized text
    pub fn lookup_alias(&self, text: &str) -> Option<&str> {
        self.exact
            .get(&normalize(text))
            .map(|&index| self.entries[index].canonical_id.as_str())
    }

    /// Resolve free text to a product: exact alias first, then the first
    /// declared alias overlapping the text in either direction
    pub fn resolve_product(&self, text: &str) -> Option<&CatalogEntry> {
        let text = normalize(text);
        if text.is_empty() {
            return None;
        }

        if let Some(&index) = self.exact.get(&text) {
            trace!("Exact alias hit '{}' -> {}", text, self.entries[index].canonical_id);
            return Some(&self.entries[index]);
        }

        let found = self
            .aliases
            .iter()
            .find(|(alias, _)| alias.contains(text.as_str()) || text.contains(alias.as_str()))
            .map(|&(_, index)| &self.entries[index]);

        match found {
            Some(entry) => debug!("Partial alias hit '{}' -> {}", text, entry.canonical_id),
            None => debug!("No product matches '{}'", text),
        }
        found
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
