//! # Voice Bill
//!
//! Parses free-form spoken grocery orders, mixing English and Hindi, into
//! priced order lines, and keeps a running bill with localized feedback.
//!
//! ```rust
//! use voice_bill::catalog::Catalog;
//! use voice_bill::parser::parse_order;
//!
//! let catalog = Catalog::builtin()?;
//! let lines = parse_order(&catalog, "2 किलो चीनी और 500 grams dal");
//! assert_eq!(lines.len(), 2);
//! # Ok::<(), voice_bill::error::CatalogError>(())
//! ```

pub mod bill;
pub mod catalog;
pub mod clause_parser;
pub mod config;
pub mod error;
pub mod localization;
pub mod order;
pub mod order_builder;
pub mod parser;
pub mod segmenter;
pub mod summary;
pub mod units;
