// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flat node-count price table.
//!
//! Prices are looked up by exact node count. There is no interpolation.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency every price is quoted in.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A row of the price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Number of nodes. Unique within a table.
    pub nodes_count: u32,
    /// Price in US dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_usd: Decimal,
}

impl PriceEntry {
    /// Creates a new `PriceEntry`.
    #[must_use]
    pub const fn new(nodes_count: u32, price_usd: Decimal) -> Self {
        Self {
            nodes_count,
            price_usd,
        }
    }
}

/// The answer to a price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The node count that was priced.
    pub nodes_count: u32,
    /// Price in `currency`.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_usd: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Read-only mapping of node count to price.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceTable {
    prices: BTreeMap<u32, Decimal>,
}

impl PriceTable {
    /// Builds a table from entries. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_entries(entries: &[PriceEntry]) -> Self {
        Self {
            prices: entries
                .iter()
                .map(|entry| (entry.nodes_count, entry.price_usd))
                .collect(),
        }
    }

    /// Looks up the price for an exact node count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PriceNotConfigured` if the node count has no price.
    pub fn lookup(&self, nodes_count: u32) -> Result<PriceQuote, DomainError> {
        self.prices.get(&nodes_count).map_or_else(
            || {
                Err(DomainError::PriceNotConfigured {
                    nodes_count,
                    available: self.available_node_counts(),
                })
            },
            |price| {
                Ok(PriceQuote {
                    nodes_count,
                    price_usd: *price,
                    currency: String::from(DEFAULT_CURRENCY),
                })
            },
        )
    }

    /// Returns the priced node counts in ascending order.
    #[must_use]
    pub fn available_node_counts(&self) -> Vec<u32> {
        self.prices.keys().copied().collect()
    }

    /// Whether `nodes_count` has a price.
    #[must_use]
    pub fn contains(&self, nodes_count: u32) -> bool {
        self.prices.contains_key(&nodes_count)
    }

    /// Returns the full mapping.
    #[must_use]
    pub const fn prices(&self) -> &BTreeMap<u32, Decimal> {
        &self.prices
    }

    /// Number of priced node counts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the table has no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// The prices seeded into an empty database.
#[must_use]
pub fn default_price_entries() -> Vec<PriceEntry> {
    [
        (4, 19_999),
        (8, 34_999),
        (16, 64_999),
        (32, 119_999),
        (64, 229_999),
        (128, 439_999),
        (192, 629_999),
        (256, 819_999),
        (320, 999_999),
        (384, 1_169_999),
        (448, 1_329_999),
        (512, 1_499_999),
    ]
    .into_iter()
    .map(|(nodes, cents)| PriceEntry::new(nodes, Decimal::new(cents, 2)))
    .collect()
}
