// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote collaborators the wizard talks to when generating a configuration.

use crate::assembler::AssembledConfiguration;
use crate::error::CoreError;
use hpc_config_domain::PriceQuote;
use std::future::Future;

/// Looks up the price for a node count.
pub trait PricingSource {
    /// Returns the price for exactly `nodes_count` nodes.
    ///
    /// A missing price is reported as
    /// `CoreError::DomainViolation(DomainError::PriceNotConfigured { .. })`.
    fn price(&self, nodes_count: u32) -> impl Future<Output = Result<PriceQuote, CoreError>> + Send;
}

/// Persists an assembled configuration.
pub trait ConfigurationSink {
    /// Saves the configuration and returns the identifier it was stored under.
    fn save_configuration(
        &self,
        configuration: &AssembledConfiguration,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
