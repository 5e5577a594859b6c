// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the HPC configuration service.
//!
//! Exposes transport-independent operations over the pricing cache, the
//! configuration store and the option catalog. Domain, core and persistence
//! errors are translated into [`ApiError`] here and never leak past this
//! crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod local;
mod pricing;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    SERVICE_NAME, export_configuration, generate_configuration, get_all_prices,
    get_available_node_counts, get_catalog, get_configuration, get_price_by_nodes, health,
    resolve_selections, save_configuration, service_info,
};
pub use local::LocalBackend;
pub use pricing::PricingService;
pub use request_response::{
    AllPricesResponse, AvailableNodeCountsResponse, CACHED_RESPONSE_TIME, ConfigurationResponse,
    ExportFormat, ExportRequest, ExportResponse, GenerateConfigurationResponse, HealthResponse,
    JsonExport, PendingExport, PriceResponse, ResolveSelectionsRequest, ResolveSelectionsResponse,
    SaveConfigurationRequest, SaveConfigurationResponse, ServiceInfoResponse,
};
