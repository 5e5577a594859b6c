// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory price cache.
//!
//! The cache is filled once from the database at startup and read-only
//! afterwards, so lookups never touch the database.

use hpc_config_domain::{PriceEntry, PriceQuote, PriceTable};
use hpc_config_persistence::Persistence;
use tracing::info;

use crate::error::{ApiError, translate_domain_error};

/// Serves prices from a table loaded out of the database.
#[derive(Debug, Clone, Default)]
pub struct PricingService {
    table: Option<PriceTable>,
}

impl PricingService {
    /// Creates a service with nothing loaded. Every lookup fails until
    /// [`PricingService::load`] has run.
    #[must_use]
    pub const fn new() -> Self {
        Self { table: None }
    }

    /// Creates a service that serves `entries`.
    #[must_use]
    pub fn from_entries(entries: &[PriceEntry]) -> Self {
        Self {
            table: Some(PriceTable::from_entries(entries)),
        }
    }

    /// Replaces the cache with the prices currently stored.
    ///
    /// # Returns
    ///
    /// The number of prices loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the prices cannot be read. The previous cache is
    /// kept in that case.
    pub fn load(&mut self, persistence: &mut Persistence) -> Result<usize, ApiError> {
        let entries: Vec<PriceEntry> = persistence.list_prices()?;
        let table: PriceTable = PriceTable::from_entries(&entries);

        info!(
            count = table.len(),
            node_counts = ?table.available_node_counts(),
            "Loaded prices into memory cache"
        );

        let count: usize = table.len();
        self.table = Some(table);
        Ok(count)
    }

    /// Whether prices have been loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// The loaded table, if any.
    #[must_use]
    pub const fn table(&self) -> Option<&PriceTable> {
        self.table.as_ref()
    }

    fn loaded_table(&self) -> Result<&PriceTable, ApiError> {
        self.table.as_ref().ok_or_else(|| ApiError::ServiceUnavailable {
            service: String::from("Pricing service"),
            message: String::from("Pricing service not initialized"),
        })
    }

    /// Returns the price for exactly `nodes_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns `ServiceUnavailable` before loading, or `InvalidInput` listing
    /// the available counts if `nodes_count` has no price.
    pub fn get_price(&self, nodes_count: u32) -> Result<PriceQuote, ApiError> {
        self.loaded_table()?
            .lookup(nodes_count)
            .map_err(translate_domain_error)
    }

    /// Returns every price, ordered by node count.
    ///
    /// # Errors
    ///
    /// Returns `ServiceUnavailable` before loading.
    pub fn get_all_prices(&self) -> Result<Vec<PriceEntry>, ApiError> {
        Ok(self
            .loaded_table()?
            .prices()
            .iter()
            .map(|(nodes_count, price_usd)| PriceEntry::new(*nodes_count, *price_usd))
            .collect())
    }

    /// Returns the node counts that have a price, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns `ServiceUnavailable` before loading.
    pub fn get_available_node_counts(&self) -> Result<Vec<u32>, ApiError> {
        Ok(self.loaded_table()?.available_node_counts())
    }

    /// Whether `nodes_count` has a price. False before loading.
    #[must_use]
    pub fn is_valid_node_count(&self, nodes_count: u32) -> bool {
        self.table
            .as_ref()
            .is_some_and(|table| table.contains(nodes_count))
    }
}
