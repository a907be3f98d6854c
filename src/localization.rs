use anyhow::{anyhow, Context, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use log::{debug, warn};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Locale used when a requested language has no bundle
pub const DEFAULT_LANGUAGE: &str = "en";

/// Resources embedded at build time, keyed by language
const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("hi", include_str!("../locales/hi/main.ftl")),
];

/// Localization manager for bill feedback and rendering
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a manager with every embedded locale loaded
    pub fn new() -> Result<Self> {
        Self::from_resources(RESOURCES)
    }

    /// Create a manager from `(language, ftl source)` pairs
    pub fn from_resources(resources: &[(&str, &str)]) -> Result<Self> {
        let mut bundles = HashMap::new();

        for (language, source) in resources {
            let locale: LanguageIdentifier = language
                .parse()
                .with_context(|| format!("Invalid locale identifier '{language}'"))?;
            let bundle = Self::create_bundle(&locale, source)?;
            bundles.insert(language.to_string(), bundle);
        }

        debug!("Loaded {} localization bundles", bundles.len());
        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier, source: &str) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Isolation marks would end up in spoken text
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse {} resource: {:?}", locale, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add {} resource: {:?}", locale, errors))?;

        Ok(bundle)
    }

    /// Whether a bundle exists for `language`
    pub fn is_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }

    /// Get a localized message, falling back to English for unknown
    /// languages and for keys the language does not translate
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let found = [language, DEFAULT_LANGUAGE]
            .iter()
            .filter_map(|lang| self.bundles.get(*lang))
            .find_map(|bundle| bundle.get_message(key).map(|msg| (bundle, msg)));

        let (bundle, msg) = match found {
            Some(found) => found,
            None => return format!("Missing translation: {}", key),
        };
        if !self.is_supported(language) {
            debug!("No '{}' bundle, using '{}' for '{}'", language, DEFAULT_LANGUAGE, key);
        }

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();
        let mut errors = vec![];

        if let Some(args) = args {
            let fluent_args = FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut errors);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut errors);
        }

        if !errors.is_empty() {
            warn!("Errors formatting '{}' in '{}': {:?}", key, language, errors);
        }
        value
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIAL: &[(&str, &str)] = &[
        ("en", "bill-title = GROCERY BILL\nbill-empty = Your bill is empty.\n"),
        ("hi", "bill-title = किराना बिल\n"),
    ];

    #[test]
    fn test_untranslated_key_falls_back_to_english() {
        let manager = LocalizationManager::from_resources(PARTIAL).unwrap();

        assert_eq!(manager.get_message_in_language("bill-title", "hi", None), "किराना बिल");
        assert_eq!(manager.get_message_in_language("bill-empty", "hi", None), "Your bill is empty.");
        assert_eq!(
            manager.get_message_in_language("bill-total-label", "hi", None),
            "Missing translation: bill-total-label"
        );
    }

    #[test]
    fn test_invalid_resource_is_an_error() {
        assert!(LocalizationManager::from_resources(&[("en", "= not a message")]).is_err());
    }
}
