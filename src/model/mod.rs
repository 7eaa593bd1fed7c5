//! Types that represent the core data model, such as `Currency`, `RateTable` and `AmountSet`.
mod amounts;
mod currency;
mod rates;

pub(crate) use amounts::AmountSet;
pub(crate) use currency::{Currency, CurrencyList};
pub(crate) use rates::RateTable;
