//! The converter screen's state, held in one explicitly-scoped object.
//!
//! All the state the original screen kept implicitly (rates, amounts, currency order, filter
//! query) lives here and is mutated only through the operations below, so the whole screen can be
//! tested without any UI harness. The filtered list is always derived from the canonical currency
//! list plus the current query; it is never stored.

use crate::api::RateSource;
use crate::model::{AmountSet, Currency, CurrencyList, RateTable};
use crate::notify::Notifier;
use serde::Serialize;
use tracing::warn;

/// The fixed message shown when a rate fetch fails.
const FETCH_FAILED_MESSAGE: &str = "Failed to fetch exchange rates.";

/// One row of the reference price table: what one unit of a currency costs in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ReferenceRow {
    pub(crate) code: String,
    pub(crate) name: String,
    /// `1 / rate`, or `None` while no usable rate is cached.
    pub(crate) price: Option<f64>,
}

/// The screen state: tracked currencies, cached rates, amount fields and the filter query.
#[derive(Debug)]
pub(crate) struct Screen {
    currencies: CurrencyList,
    rates: RateTable,
    amounts: AmountSet,
    query: String,
}

impl Screen {
    /// Creates a freshly-mounted screen with the default currency list, an empty rate table and an
    /// empty amount field for the base currency.
    pub(crate) fn new(base: &str) -> Self {
        Self {
            currencies: CurrencyList::default(),
            rates: RateTable::new(base),
            amounts: AmountSet::new(base),
            query: String::new(),
        }
    }

    /// Issues one rate fetch. On success the rate table is replaced wholesale and the fetch time
    /// recorded. On failure the table keeps its previous (possibly empty) contents and exactly one
    /// alert is shown; the error is not escalated further and no retry is attempted.
    pub(crate) async fn load_rates(
        &mut self,
        source: &(dyn RateSource + Send + Sync),
        notifier: &mut dyn Notifier,
    ) {
        match source.latest(self.rates.base()).await {
            Ok(rates) => self.rates.replace(rates),
            Err(e) => {
                warn!("Rate fetch failed: {e:#}");
                notifier.alert("Error", FETCH_FAILED_MESSAGE);
            }
        }
    }

    /// Keystroke-level update: stores the raw text for one field without propagating.
    pub(crate) fn edit_amount(&mut self, code: &str, text: &str) {
        self.amounts.set_raw(code, text);
    }

    /// Commits a field (the original screen's end-of-editing event) and propagates the value to
    /// every other currency with a cached rate.
    pub(crate) fn commit_amount(&mut self, code: &str, text: &str) {
        self.amounts.propagate(code, text, &self.rates);
    }

    pub(crate) fn set_filter(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    /// Reorders the canonical list; the filtered view is recomputed on the next projection.
    pub(crate) fn move_up(&mut self, index: usize) -> bool {
        self.currencies.move_up(index)
    }

    pub(crate) fn move_down(&mut self, index: usize) -> bool {
        self.currencies.move_down(index)
    }

    /// The currencies currently visible: the canonical list projected through the filter query.
    pub(crate) fn visible(&self) -> Vec<&Currency> {
        self.currencies.filter_by_name(&self.query)
    }

    pub(crate) fn currencies(&self) -> &CurrencyList {
        &self.currencies
    }

    pub(crate) fn amount(&self, code: &str) -> &str {
        self.amounts.get(code)
    }

    pub(crate) fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// The per-currency price table for the visible currencies: the base price of one unit of each
    /// currency, or `None` while its rate is missing or zero.
    pub(crate) fn reference_rows(&self) -> Vec<ReferenceRow> {
        self.visible()
            .into_iter()
            .map(|currency| {
                let price = match self.rates.rate(currency.code()) {
                    Some(rate) if rate != 0.0 => Some(1.0 / rate),
                    _ => None,
                };
                ReferenceRow {
                    code: currency.code().to_string(),
                    name: currency.name().to_string(),
                    price,
                }
            })
            .collect()
    }
}
