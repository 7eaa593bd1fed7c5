//! The rate store: the latest fetched exchange rates and when they were fetched.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use tracing::warn;

/// Holds the latest fetched exchange rates, keyed by currency code, where each value is the number
/// of units of that currency per one unit of the base currency.
///
/// The table starts empty and is replaced wholesale on each successful fetch; it is never merged
/// incrementally. There is no background refresh.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RateTable {
    base: String,
    rates: BTreeMap<String, f64>,
    last_updated: Option<DateTime<Local>>,
}

impl RateTable {
    /// Creates an empty rate table relative to `base`.
    pub(crate) fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            rates: BTreeMap::new(),
            last_updated: None,
        }
    }

    /// Replaces the entire rate mapping and records the current wall-clock time.
    ///
    /// The base currency's own rate, if present, should equal 1.0; a deviating upstream value is
    /// logged but not rejected.
    pub(crate) fn replace(&mut self, rates: BTreeMap<String, f64>) {
        if let Some(&base_rate) = rates.get(&self.base) {
            if (base_rate - 1.0).abs() > f64::EPSILON {
                warn!(
                    "Rate for base currency {} is {base_rate}, expected 1.0",
                    self.base
                );
            }
        }
        self.rates = rates;
        self.last_updated = Some(Local::now());
    }

    pub(crate) fn base(&self) -> &str {
        &self.base
    }

    /// The rate for `code`, if present.
    pub(crate) fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Iterates `(code, rate)` pairs in code order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, &rate)| (code.as_str(), rate))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// When the rates were last successfully fetched, if ever.
    pub(crate) fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}
