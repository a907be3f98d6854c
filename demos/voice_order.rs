//! # Voice Order Example
//!
//! Parses a few transcribed orders, mixing English and Hindi, and prints the
//! resulting bill in both languages.

use voice_bill::bill::Bill;
use voice_bill::catalog::Catalog;
use voice_bill::localization::LocalizationManager;
use voice_bill::parser::OrderParser;
use voice_bill::summary;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin()?;
    let parser = OrderParser::new(&catalog);
    let l10n = LocalizationManager::new()?;

    let transcripts = [
        "2 किलो चीनी",
        "1.5 kg rice and 500 ग्राम दाल",
        "2 लीटर दूध, bread 2",
        "3 kg widgets",
    ];

    let mut bill = Bill::new();
    for transcript in transcripts {
        println!("🎤 {}", transcript);
        let lines = parser.parse(transcript);
        for line in &lines {
            println!("   • {}", line);
        }
        let added = bill.append(lines);
        println!("   {}", summary::parse_feedback(&l10n, "en", added));
    }

    println!();
    for language in ["en", "hi"] {
        print!("{}", summary::render_receipt(&l10n, &catalog, language, &bill));
        println!("🔊 {}\n", summary::spoken_summary(&l10n, &catalog, language, &bill));
    }

    Ok(())
}
