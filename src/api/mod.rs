//! Fetching exchange rates from the upstream API, plus an in-memory source for offline runs.

mod exchange_rate;
mod test_source;

use crate::{Config, Result};
use std::collections::BTreeMap;

pub(crate) use exchange_rate::ExchangeRateApi;
pub(crate) use test_source::TestRateSource;

/// The environment variable that switches the program into test mode.
const IN_TEST_MODE_VAR: &str = "CAMBIO_IN_TEST_MODE";

/// Whether to fetch rates from the real exchange-rate API or from an in-memory test source.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Mode {
    /// Fetch rates from the exchange-rate HTTP API.
    #[default]
    Api,
    /// Serve rates from in-memory data without touching the network.
    Test,
}

impl Mode {
    /// This allows for running the program without hitting the exchange-rate API. When
    /// `CAMBIO_IN_TEST_MODE` is set and non-zero in length, the mode will be `Mode::Test`,
    /// otherwise it will be `Mode::Api`.
    pub fn from_env() -> Self {
        match std::env::var(IN_TEST_MODE_VAR) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Api,
        }
    }
}

/// A source of exchange rates relative to a base currency.
#[async_trait::async_trait]
pub(crate) trait RateSource {
    /// Fetches the latest rate mapping relative to `base`: each value is the number of units of
    /// the keyed currency per one unit of `base`.
    async fn latest(&self, base: &str) -> Result<BTreeMap<String, f64>>;
}

/// Creates a `RateSource` appropriate for `mode`.
pub(crate) fn rate_source(config: &Config, mode: Mode) -> Box<dyn RateSource + Send + Sync> {
    match mode {
        Mode::Api => Box::new(ExchangeRateApi::new(config.api_url())),
        Mode::Test => Box::new(TestRateSource::default()),
    }
}
