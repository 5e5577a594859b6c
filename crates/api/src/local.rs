// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process collaborators for a wizard session.
//!
//! `LocalBackend` lets a `WizardSession` price and save configurations
//! against the pricing cache and database of this process instead of going
//! over HTTP.

use hpc_config::{AssembledConfiguration, ConfigurationSink, CoreError, PricingSource};
use hpc_config_domain::{PriceQuote, PriceTable};
use hpc_config_persistence::{Persistence, SavedConfiguration};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::pricing::PricingService;

/// Prices from the shared pricing service and saves to the shared database.
#[derive(Clone)]
pub struct LocalBackend {
    persistence: Arc<Mutex<Persistence>>,
    pricing: Arc<PricingService>,
}

impl LocalBackend {
    /// Creates a backend over shared state.
    #[must_use]
    pub const fn new(persistence: Arc<Mutex<Persistence>>, pricing: Arc<PricingService>) -> Self {
        Self {
            persistence,
            pricing,
        }
    }
}

impl PricingSource for LocalBackend {
    async fn price(&self, nodes_count: u32) -> Result<PriceQuote, CoreError> {
        let table: &PriceTable = self.pricing.table().ok_or_else(|| CoreError::Collaborator {
            collaborator: "pricing service",
            message: String::from("Pricing service not initialized"),
        })?;

        debug!(nodes_count, "Pricing from local cache");
        Ok(table.lookup(nodes_count)?)
    }
}

impl ConfigurationSink for LocalBackend {
    async fn save_configuration(
        &self,
        configuration: &AssembledConfiguration,
    ) -> Result<String, CoreError> {
        let configuration_data: String = configuration.to_json()?;

        let mut persistence = self.persistence.lock().await;
        let saved: SavedConfiguration = persistence
            .save_configuration(&configuration_data, true)
            .map_err(|e| CoreError::Collaborator {
                collaborator: "configuration store",
                message: e.to_string(),
            })?;

        Ok(saved.configuration_id)
    }
}
