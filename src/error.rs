//! # Error Types Module
//!
//! Errors raised while constructing the parsing engine. Parsing itself never
//! fails: unusable input simply yields fewer order lines.

use thiserror::Error;

/// Errors raised while building or loading a product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    /// Catalog JSON is malformed or misses required fields
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A product has an empty canonical id
    #[error("Catalog entry has an empty canonical id")]
    EmptyId,
    /// Two products share a canonical id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),
    /// An alias is claimed by two different products
    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },
    /// Base price is zero or negative
    #[error("Product '{0}' must have a positive base price")]
    InvalidPrice(String),
    /// A product has no alias and can never be resolved
    #[error("Product '{0}' has no aliases")]
    NoAliases(String),
}

/// Errors raised while compiling the clause and segment patterns
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
