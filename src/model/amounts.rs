//! Textual amount fields and the propagation of a committed amount to all other currencies.
//!
//! Amounts are held as text because the user's in-progress input (a trailing decimal point, an
//! empty field) must survive until the field is committed. Committing a field sanitizes and parses
//! its text and recomputes every other currency's amount from the cached rates.

use crate::model::RateTable;
use std::collections::BTreeMap;
use tracing::warn;

/// The textual amount entered or derived for each currency, keyed by currency code.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub(crate) struct AmountSet {
    amounts: BTreeMap<String, String>,
}

impl AmountSet {
    /// Creates an amount set with an empty entry for the base currency.
    pub(crate) fn new(base: impl Into<String>) -> Self {
        let mut amounts = BTreeMap::new();
        amounts.insert(base.into(), String::new());
        Self { amounts }
    }

    /// The current text for `code`, or the empty string if none has been entered or derived.
    pub(crate) fn get(&self, code: &str) -> &str {
        self.amounts.get(code).map(String::as_str).unwrap_or("")
    }

    /// Stores `text` for `code` without sanitizing or propagating. This is the keystroke-level
    /// update; propagation happens only when the field is committed.
    pub(crate) fn set_raw(&mut self, code: &str, text: &str) {
        self.amounts.insert(code.to_string(), text.to_string());
    }

    /// Commits `raw` for the currency `edited` and recomputes every other currency's amount.
    ///
    /// The edited currency keeps the sanitized raw text rather than the parsed, rounded value so
    /// that in-progress typing such as a trailing decimal point is preserved. Every other code in
    /// the rate table gets `round2(value * rate[other] / rate[edited])`.
    ///
    /// If the edited currency's rate is absent, zero, or non-finite, the dependent amounts are
    /// left unchanged rather than being filled with `NaN` or infinities.
    pub(crate) fn propagate(&mut self, edited: &str, raw: &str, rates: &RateTable) {
        let sanitized = sanitize(raw);
        let value = parse_amount(&sanitized);
        self.amounts.insert(edited.to_string(), sanitized);

        let edited_rate = match rates.rate(edited) {
            Some(rate) if rate != 0.0 && rate.is_finite() => rate,
            _ => {
                warn!("No usable rate for {edited}; leaving other amounts unchanged");
                return;
            }
        };

        for (code, rate) in rates.iter() {
            if code == edited {
                continue;
            }
            self.amounts
                .insert(code.to_string(), round2(value * rate / edited_rate));
        }
    }
}

/// Removes every character that is not an ASCII digit, a decimal point, or a minus sign.
pub(crate) fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Parses the longest leading numeric prefix of `text` as a floating-point number: an optional
/// minus sign, digits, and at most one decimal point. Empty or unparseable input yields `0.0`, so
/// `"12.3-4"` parses as `12.3` and `"-"` as `0.0`.
pub(crate) fn parse_amount(text: &str) -> f64 {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    text[..end].parse().unwrap_or(0.0)
}

/// Rounds to two decimal places and renders as fixed-point text, e.g. `20.0` -> `"20.00"`.
pub(crate) fn round2(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_table() -> RateTable {
        let mut rates = BTreeMap::new();
        rates.insert("BRL".to_string(), 1.0);
        rates.insert("USD".to_string(), 0.2);
        rates.insert("EUR".to_string(), 0.18);
        let mut table = RateTable::new("BRL");
        table.replace(rates);
        table
    }

    #[test]
    fn test_sanitize_strips_non_numeric_characters() {
        assert_eq!(sanitize("12a.3-4"), "12.3-4");
        assert_eq!(sanitize("R$ 1.234,56"), "1.23456");
        assert_eq!(sanitize("abc"), "");
        assert_eq!(sanitize("-50.00"), "-50.00");
    }

    #[test]
    fn test_parse_amount_takes_leading_numeric_prefix() {
        assert_eq!(parse_amount("12.3-4"), 12.3);
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount("-50.5"), -50.5);
        assert_eq!(parse_amount("1.2.3"), 1.2);
        assert_eq!(parse_amount("-.5"), -0.5);
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-."), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(20.0), "20.00");
        assert_eq!(round2(18.004), "18.00");
        assert_eq!(round2(0.0), "0.00");
    }

    #[test]
    fn test_propagate_sample_scenario() {
        // Rates {BRL: 1, USD: 0.2, EUR: 0.18}; entering 100 into BRL makes USD 20.00 and
        // EUR 18.00.
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "100", &rates);
        assert_eq!(amounts.get("BRL"), "100");
        assert_eq!(amounts.get("USD"), "20.00");
        assert_eq!(amounts.get("EUR"), "18.00");
    }

    #[test]
    fn test_propagate_from_non_base_currency() {
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("USD", "20", &rates);
        assert_eq!(amounts.get("USD"), "20");
        assert_eq!(amounts.get("BRL"), "100.00");
        assert_eq!(amounts.get("EUR"), "18.00");
    }

    #[test]
    fn test_propagate_keeps_sanitized_raw_text_for_edited_field() {
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "100.", &rates);
        assert_eq!(amounts.get("BRL"), "100.");
        assert_eq!(amounts.get("USD"), "20.00");
    }

    #[test]
    fn test_propagate_sanitizes_before_storing() {
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "12a.3-4", &rates);
        assert_eq!(amounts.get("BRL"), "12.3-4");
        assert_eq!(amounts.get("USD"), round2(12.3 * 0.2));
    }

    #[test]
    fn test_propagate_unparseable_input_is_zero() {
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "abc", &rates);
        assert_eq!(amounts.get("BRL"), "");
        assert_eq!(amounts.get("USD"), "0.00");
        assert_eq!(amounts.get("EUR"), "0.00");
    }

    #[test]
    fn test_propagate_with_missing_rate_leaves_others_unchanged() {
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "100", &rates);
        amounts.propagate("GBP", "7", &rates);
        assert_eq!(amounts.get("GBP"), "7");
        assert_eq!(amounts.get("USD"), "20.00");
        assert_eq!(amounts.get("EUR"), "18.00");
    }

    #[test]
    fn test_propagate_with_zero_rate_leaves_others_unchanged() {
        let mut raw = BTreeMap::new();
        raw.insert("BRL".to_string(), 1.0);
        raw.insert("XXX".to_string(), 0.0);
        let mut rates = RateTable::new("BRL");
        rates.replace(raw);

        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "100", &rates);
        let brl_before = amounts.get("BRL").to_string();

        amounts.propagate("XXX", "5", &rates);
        assert_eq!(amounts.get("XXX"), "5");
        assert_eq!(amounts.get("BRL"), brl_before);
    }

    #[test]
    fn test_propagate_with_empty_rate_table() {
        let rates = RateTable::new("BRL");
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("BRL", "100", &rates);
        assert_eq!(amounts.get("BRL"), "100");
        assert_eq!(amounts.get("USD"), "");
    }

    #[test]
    fn test_set_raw_does_not_propagate() {
        let mut amounts = AmountSet::new("BRL");
        amounts.set_raw("BRL", "10x");
        assert_eq!(amounts.get("BRL"), "10x");
        assert_eq!(amounts.get("USD"), "");
    }

    #[test]
    fn test_pairwise_consistency() {
        // For any pair with nonzero rates, committing x into A makes B equal to
        // round2(x * rate[B] / rate[A]).
        let rates = sample_table();
        let mut amounts = AmountSet::new("BRL");
        amounts.propagate("EUR", "9", &rates);
        assert_eq!(amounts.get("USD"), round2(9.0 * 0.2 / 0.18));
        assert_eq!(amounts.get("BRL"), round2(9.0 * 1.0 / 0.18));
    }
}
