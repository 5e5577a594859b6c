// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod catalog;
mod derived;
mod error;
mod pricing;
mod types;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogItem, DeploymentType, PowerConfiguration, Region};
pub use derived::{
    DEFAULT_BASE_CONSUMPTION, PowerBaseTable, calculated_efficiency, estimated_power,
    round_to_hundredth, round_to_tenth, total_racks,
};
pub use error::DomainError;
pub use pricing::{DEFAULT_CURRENCY, PriceEntry, PriceQuote, PriceTable, default_price_entries};
pub use rust_decimal::Decimal;
pub use types::{PowerSelection, SelectedOption, StorageSelection, SystemSelection};
