//! The tracked currency list and its filter/reorder operations.
//!
//! The list is an ordered sequence; order is display order and is user-adjustable. Filtering is a
//! pure projection over the canonical list so that reorders and filters can never desynchronize:
//! there is no second, independently-mutated "filtered" list.

use serde::{Deserialize, Serialize};

/// A currency tracked by the converter. Identity is `code`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct Currency {
    /// ISO-4217-like identifier, unique within the list, e.g. `BRL`.
    code: String,

    /// Display label, e.g. `Real`.
    name: String,

    /// Optional reference to a flag image for this currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<String>,
}

impl Currency {
    pub(crate) fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            flag: None,
        }
    }

    pub(crate) fn code(&self) -> &str {
        &self.code
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

/// The canonical, ordered list of tracked currencies.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) struct CurrencyList {
    items: Vec<Currency>,
}

impl Default for CurrencyList {
    /// The static default set the screen is seeded with at creation.
    fn default() -> Self {
        Self {
            items: vec![
                Currency::new("BRL", "Real"),
                Currency::new("USD", "Dollar"),
                Currency::new("EUR", "Euro"),
            ],
        }
    }
}

impl CurrencyList {
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the currencies whose display name contains `query`, case-insensitively, in their
    /// original relative order. An empty query returns the full list. The match is always against
    /// the canonical list, never against a previously filtered view.
    pub(crate) fn filter_by_name(&self, query: &str) -> Vec<&Currency> {
        if query.is_empty() {
            return self.items.iter().collect();
        }
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|currency| currency.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Swaps the currency at `index` with its neighbor above. No-op at the top boundary and for
    /// out-of-range indices. Returns whether the list changed.
    pub(crate) fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.swap(index, index - 1);
        true
    }

    /// Swaps the currency at `index` with its neighbor below. No-op at the bottom boundary and for
    /// out-of-range indices. Returns whether the list changed.
    pub(crate) fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.items.len() {
            return false;
        }
        self.items.swap(index, index + 1);
        true
    }

    /// Looks up a tracked currency by code.
    pub(crate) fn get(&self, code: &str) -> Option<&Currency> {
        self.items.iter().find(|currency| currency.code == code)
    }

    /// The position of a currency in the canonical (unfiltered) list.
    pub(crate) fn position(&self, code: &str) -> Option<usize> {
        self.items.iter().position(|currency| currency.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(currencies: &[&Currency]) -> Vec<String> {
        currencies.iter().map(|c| c.code.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_full_list_in_order() {
        let list = CurrencyList::default();
        let filtered = list.filter_by_name("");
        assert_eq!(codes(&filtered), vec!["BRL", "USD", "EUR"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let list = CurrencyList::default();
        let filtered = list.filter_by_name("rEaL");
        assert_eq!(codes(&filtered), vec!["BRL"]);
    }

    #[test]
    fn test_filter_substring_match_preserves_order() {
        let list = CurrencyList::default();
        // "r" appears in "Real", "Dollar" and "Euro".
        let filtered = list.filter_by_name("r");
        assert_eq!(codes(&filtered), vec!["BRL", "USD", "EUR"]);

        let filtered = list.filter_by_name("o");
        assert_eq!(codes(&filtered), vec!["USD", "EUR"]);
    }

    #[test]
    fn test_filter_no_match() {
        let list = CurrencyList::default();
        assert!(list.filter_by_name("yen").is_empty());
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut list = CurrencyList::default();
        assert!(!list.move_up(0));
        assert_eq!(codes(&list.filter_by_name("")), vec!["BRL", "USD", "EUR"]);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut list = CurrencyList::default();
        let last = list.len() - 1;
        assert!(!list.move_down(last));
        assert_eq!(codes(&list.filter_by_name("")), vec!["BRL", "USD", "EUR"]);
    }

    #[test]
    fn test_out_of_range_indices_are_noops() {
        let mut list = CurrencyList::default();
        assert!(!list.move_up(99));
        assert!(!list.move_down(99));
        assert_eq!(codes(&list.filter_by_name("")), vec!["BRL", "USD", "EUR"]);
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut list = CurrencyList::default();
        assert!(list.move_up(1));
        assert_eq!(codes(&list.filter_by_name("")), vec!["USD", "BRL", "EUR"]);
        assert!(list.move_down(0));
        assert_eq!(codes(&list.filter_by_name("")), vec!["BRL", "USD", "EUR"]);
    }

    #[test]
    fn test_reorder_while_filtered_reorders_canonical_list() {
        let mut list = CurrencyList::default();
        // The filter is a derived view; reordering the canonical list is reflected when the
        // projection is recomputed.
        assert_eq!(codes(&list.filter_by_name("o")), vec!["USD", "EUR"]);
        assert!(list.move_down(1));
        assert_eq!(codes(&list.filter_by_name("")), vec!["BRL", "EUR", "USD"]);
        assert_eq!(codes(&list.filter_by_name("o")), vec!["EUR", "USD"]);
    }

    #[test]
    fn test_get_by_code() {
        let list = CurrencyList::default();
        assert_eq!(list.get("USD").unwrap().name(), "Dollar");
        assert!(list.get("JPY").is_none());
    }
}
