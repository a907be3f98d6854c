use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{self, BufRead};
use voice_bill::bill::Bill;
use voice_bill::catalog::Catalog;
use voice_bill::config::AppConfig;
use voice_bill::localization::LocalizationManager;
use voice_bill::parser::{OrderParser, ParserConfig};
use voice_bill::summary;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting voice bill");

    let config = AppConfig::from_env()?;
    info!("Configuration: {:?}", config);

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().context("Failed to load built-in catalog")?,
    };

    let l10n = LocalizationManager::new()?;
    if !l10n.is_supported(&config.locale) {
        warn!("Locale '{}' not available, falling back to English", config.locale);
    }

    let parser = OrderParser::with_config(
        &catalog,
        ParserConfig {
            unit_mismatch: config.unit_mismatch,
            ..Default::default()
        },
    )?;

    // One transcribed utterance per line; "clear" empties the bill
    let mut bill = Bill::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read utterance")?;
        if line.trim().eq_ignore_ascii_case("clear") {
            bill.clear();
            continue;
        }

        let items = parser.parse(&line);
        for item in &items {
            println!("  + {}", item);
        }
        let added = bill.append(items);
        println!("{}", summary::parse_feedback(&l10n, &config.locale, added));
    }

    println!();
    print!("{}", summary::render_receipt(&l10n, &catalog, &config.locale, &bill));
    println!("{}", summary::spoken_summary(&l10n, &catalog, &config.locale, &bill));
    println!("{}", serde_json::to_string_pretty(&bill)?);

    Ok(())
}
