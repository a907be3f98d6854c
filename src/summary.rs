//! # Bill Summary Module
//!
//! Localized text built from order lines: feedback after an utterance, the
//! spoken bill summary and a plain-text receipt. Spoken amounts are whole
//! rupees.

use crate::bill::Bill;
use crate::catalog::Catalog;
use crate::localization::LocalizationManager;
use crate::order::OrderLine;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Feedback after parsing one utterance
pub fn parse_feedback(l10n: &LocalizationManager, language: &str, added: usize) -> String {
    if added == 0 {
        l10n.get_message_in_language("no-items-found", language, None)
    } else {
        l10n.get_message_with_args("items-added", language, &[("count", &added.to_string())])
    }
}

/// Localized label for a line's product, falling back to its id
pub fn product_label<'a>(catalog: &'a Catalog, line: &'a OrderLine, language: &str) -> &'a str {
    catalog
        .get(&line.product_id)
        .map(|entry| entry.display_name(language))
        .unwrap_or(&line.product_id)
}

/// One line as it is spoken, e.g. "2 kg Sugar for 80 rupees"
pub fn spoken_line(l10n: &LocalizationManager, catalog: &Catalog, language: &str, line: &OrderLine) -> String {
    let unit = l10n.get_message_in_language(line.unit.label_key(), language, None);
    l10n.get_message_with_args(
        "bill-line",
        language,
        &[
            ("quantity", &line.quantity.normalize().to_string()),
            ("unit", &unit),
            ("product", product_label(catalog, line, language)),
            ("amount", &whole_rupees(line.line_total)),
        ],
    )
}

/// Sentence read out for the whole bill
pub fn spoken_summary(l10n: &LocalizationManager, catalog: &Catalog, language: &str, bill: &Bill) -> String {
    if bill.is_empty() {
        return l10n.get_message_in_language("bill-empty", language, None);
    }

    let lines: Vec<String> = bill
        .items()
        .iter()
        .map(|line| spoken_line(l10n, catalog, language, line))
        .collect();
    l10n.get_message_with_args(
        "bill-summary",
        language,
        &[("lines", &lines.join(", ")), ("total", &whole_rupees(bill.total()))],
    )
}

/// Plain-text receipt with one row per line and the total
pub fn render_receipt(l10n: &LocalizationManager, catalog: &Catalog, language: &str, bill: &Bill) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", l10n.get_message_in_language("bill-title", language, None));
    let _ = writeln!(out, "{}", bill.created_at.format("%d/%m/%Y %H:%M:%S"));

    for line in bill.items() {
        let unit = l10n.get_message_in_language(line.unit.label_key(), language, None);
        let _ = writeln!(
            out,
            "{:<20} {:>8} {:<6} ₹{:>8} ₹{:>10}",
            product_label(catalog, line, language),
            line.quantity.normalize(),
            unit,
            line.unit_price,
            line.line_total
        );
    }

    let _ = writeln!(
        out,
        "{}: ₹{:.2}",
        l10n.get_message_in_language("bill-total-label", language, None),
        bill.total()
    );
    out
}

fn whole_rupees(amount: Decimal) -> String {
    amount.trunc().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_rupees_truncates() {
        assert_eq!(whole_rupees(Decimal::new(1875, 2)), "18");
        assert_eq!(whole_rupees(Decimal::from(80)), "80");
    }
}
