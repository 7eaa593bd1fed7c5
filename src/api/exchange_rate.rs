//! Implements the `RateSource` trait against the public exchange-rate HTTP API.

use crate::api::RateSource;
use crate::Result;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Fetches rates from `GET {api_url}/v4/latest/{BASE}`. The call requires no authentication. No
/// retry is attempted and no timeout is configured beyond the transport default.
pub(crate) struct ExchangeRateApi {
    api_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApi {
    pub(crate) fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// The relevant portion of the upstream response. Fields other than `rates` are ignored.
#[derive(Debug, Clone, Deserialize)]
struct LatestRates {
    rates: BTreeMap<String, f64>,
}

#[async_trait::async_trait]
impl RateSource for ExchangeRateApi {
    async fn latest(&self, base: &str) -> Result<BTreeMap<String, f64>> {
        let url = format!("{}/v4/latest/{base}", self.api_url.trim_end_matches('/'));
        trace!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach the exchange-rate API at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("The exchange-rate API returned status {status} for {url}");
        }

        let body: LatestRates = response
            .json()
            .await
            .context("Failed to decode the exchange-rate API response")?;
        debug!("Fetched {} rates relative to {base}", body.rates.len());
        Ok(body.rates)
    }
}
