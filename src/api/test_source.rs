//! Implements the `RateSource` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the
//! whole app, top-to-bottom, without touching the network.

use crate::api::RateSource;
use crate::Result;
use anyhow::bail;
use std::collections::BTreeMap;

/// A `RateSource` that serves rates from memory. By default it is seeded with a small rate table
/// relative to `BRL`; it can also be constructed failing to simulate a fetch error.
pub(crate) struct TestRateSource {
    rates: BTreeMap<String, f64>,
    fail: bool,
}

impl TestRateSource {
    /// Creates a source that serves `rates` regardless of the requested base.
    pub(crate) fn new(rates: BTreeMap<String, f64>) -> Self {
        Self { rates, fail: false }
    }

    /// Creates a source whose every fetch fails, simulating a network error.
    pub(crate) fn failing() -> Self {
        Self {
            rates: BTreeMap::new(),
            fail: true,
        }
    }
}

impl Default for TestRateSource {
    /// Seeds the source with rates relative to `BRL`.
    fn default() -> Self {
        Self::new(default_rates())
    }
}

#[async_trait::async_trait]
impl RateSource for TestRateSource {
    async fn latest(&self, _base: &str) -> Result<BTreeMap<String, f64>> {
        if self.fail {
            bail!("Simulated network error");
        }
        Ok(self.rates.clone())
    }
}

/// The seed rate table, relative to `BRL`.
fn default_rates() -> BTreeMap<String, f64> {
    let mut rates = BTreeMap::new();
    rates.insert("BRL".to_string(), 1.0);
    rates.insert("USD".to_string(), 0.2);
    rates.insert("EUR".to_string(), 0.18);
    rates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_source_serves_seed_rates() {
        let source = TestRateSource::default();
        let rates = source.latest("BRL").await.unwrap();
        assert_eq!(rates.get("USD"), Some(&0.2));
        assert_eq!(rates.get("EUR"), Some(&0.18));
    }

    #[tokio::test]
    async fn test_failing_source_errors() {
        let source = TestRateSource::failing();
        assert!(source.latest("BRL").await.is_err());
    }
}
