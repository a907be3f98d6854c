//! # Application Configuration Module
//!
//! Settings for the command-line bill driver, read from the environment
//! (optionally seeded from a `.env` file).

use crate::order_builder::UnitMismatchPolicy;
use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

pub const LOCALE_VAR: &str = "VOICE_BILL_LOCALE";
pub const CATALOG_VAR: &str = "VOICE_BILL_CATALOG";
pub const UNIT_POLICY_VAR: &str = "VOICE_BILL_UNIT_POLICY";

/// Default feedback language
pub const DEFAULT_LOCALE: &str = "hi";

/// Configuration for the bill driver
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Language for feedback and the bill summary ("en", "hi")
    pub locale: String,
    /// Catalog JSON file. If None, uses the catalog embedded in the binary
    pub catalog_path: Option<PathBuf>,
    /// Unit mismatch handling passed to the parser
    pub unit_mismatch: UnitMismatchPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            catalog_path: None,
            unit_mismatch: UnitMismatchPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    ///
    /// Unset or blank variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(locale) = get(LOCALE_VAR) {
            config.locale = locale.to_lowercase();
        }
        if let Some(path) = get(CATALOG_VAR) {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(policy) = get(UNIT_POLICY_VAR) {
            config.unit_mismatch = policy
                .parse()
                .map_err(|e: String| anyhow!("{UNIT_POLICY_VAR}: {e}"))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.locale, "hi");
    }

    #[test]
    fn test_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (LOCALE_VAR, "EN"),
            (CATALOG_VAR, "/etc/voice-bill/catalog.json"),
            (UNIT_POLICY_VAR, "reject"),
        ]))
        .unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/voice-bill/catalog.json")));
        assert_eq!(config.unit_mismatch, UnitMismatchPolicy::Reject);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[(LOCALE_VAR, "  "), (CATALOG_VAR, "")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_policy_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(UNIT_POLICY_VAR, "strict")])).unwrap_err();
        assert!(err.to_string().contains(UNIT_POLICY_VAR));
    }
}
