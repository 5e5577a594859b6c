// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for pricing, configurations and the catalog.
//!
//! Handlers are transport independent. The server calls them with the
//! shared persistence and pricing service and maps their errors to status
//! codes.

use hpc_config::{
    GenerationOutcome, InMemorySnapshotStore, SnapshotStore, WizardSession, WizardState,
    format_timestamp,
};
use hpc_config_domain::{
    Catalog, DEFAULT_CURRENCY, Decimal, DeploymentType, DomainError, PowerSelection, PriceEntry,
    PriceQuote, StorageSelection, SystemSelection,
};
use hpc_config_persistence::{Persistence, SavedConfiguration, StoredConfiguration};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::local::LocalBackend;
use crate::pricing::PricingService;
use crate::request_response::{
    AllPricesResponse, AvailableNodeCountsResponse, CACHED_RESPONSE_TIME, ConfigurationResponse,
    ExportFormat, ExportRequest, ExportResponse, GenerateConfigurationResponse, HealthResponse,
    JsonExport, PendingExport, PriceResponse, ResolveSelectionsRequest, ResolveSelectionsResponse,
    SaveConfigurationRequest, SaveConfigurationResponse, ServiceInfoResponse,
};

/// Name reported by the health check.
pub const SERVICE_NAME: &str = "HPC Configuration API";

// ============================================================================
// Pricing
// ============================================================================

/// Returns the price for exactly `nodes_count` nodes.
///
/// # Errors
///
/// Returns an error if:
/// - The pricing service is not loaded
/// - No price is configured for `nodes_count`; the message lists the
///   available counts
pub fn get_price_by_nodes(
    pricing: &PricingService,
    nodes_count: u32,
) -> Result<PriceResponse, ApiError> {
    let quote: PriceQuote = pricing.get_price(nodes_count)?;

    Ok(PriceResponse {
        nodes_count: quote.nodes_count,
        price_usd: quote.price_usd,
        currency: quote.currency,
        response_time_ms: String::from(CACHED_RESPONSE_TIME),
    })
}

/// Returns every price.
///
/// # Errors
///
/// Returns an error if the pricing service is not loaded.
pub fn get_all_prices(pricing: &PricingService) -> Result<AllPricesResponse, ApiError> {
    let entries: Vec<PriceEntry> = pricing.get_all_prices()?;
    let pricing_options: BTreeMap<u32, Decimal> = entries
        .iter()
        .map(|entry| (entry.nodes_count, entry.price_usd))
        .collect();

    Ok(AllPricesResponse {
        total_options: pricing_options.len(),
        pricing_options,
        currency: String::from(DEFAULT_CURRENCY),
    })
}

/// Returns the node counts that have a price.
///
/// # Errors
///
/// Returns an error if the pricing service is not loaded.
pub fn get_available_node_counts(
    pricing: &PricingService,
) -> Result<AvailableNodeCountsResponse, ApiError> {
    let available_node_counts: Vec<u32> = pricing.get_available_node_counts()?;

    Ok(AvailableNodeCountsResponse {
        total_options: available_node_counts.len(),
        available_node_counts,
        message: String::from("Available node configuration options"),
    })
}

// ============================================================================
// Configurations
// ============================================================================

/// Saves a configuration.
///
/// Without a `configuration_id` a new row is created under a
/// `LOCAL-<epoch millis>` id. With one, the row stored under that id is
/// inserted or replaced.
///
/// # Errors
///
/// Returns an error if:
/// - The supplied `configuration_id` is blank
/// - The configuration cannot be stored
pub fn save_configuration(
    persistence: &mut Persistence,
    request: &SaveConfigurationRequest,
) -> Result<SaveConfigurationResponse, ApiError> {
    let configuration_data: String = serde_json::to_string(&request.configuration_data)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to serialize configuration: {e}"),
        })?;

    let (id, configuration_id): (i64, String) = match request.configuration_id.as_deref() {
        Some(configuration_id) => {
            let configuration_id: &str = configuration_id.trim();
            if configuration_id.is_empty() {
                return Err(ApiError::InvalidInput {
                    field: String::from("configuration_id"),
                    message: String::from("Configuration id must not be blank"),
                });
            }
            let id: i64 = persistence.upsert_configuration(
                configuration_id,
                &configuration_data,
                request.is_generated,
            )?;
            (id, configuration_id.to_string())
        }
        None => {
            let saved: SavedConfiguration =
                persistence.save_configuration(&configuration_data, request.is_generated)?;
            (saved.id, saved.configuration_id)
        }
    };

    info!(id, configuration_id = %configuration_id, "Saved configuration");

    Ok(SaveConfigurationResponse {
        id,
        configuration_id,
        message: String::from("Configuration saved successfully"),
        status: String::from("success"),
    })
}

/// Key the submitted state is restored under for a one-shot generation.
const GENERATION_SESSION_KEY: &str = "generate";

/// Prices, assembles and saves a wizard state on the server.
///
/// The state is validated like a restored snapshot. A missing price or a
/// failed save does not fail the call; both are reported as warnings.
///
/// # Arguments
///
/// * `backend` - Pricing and storage for the session
/// * `state` - The wizard state to generate
/// * `now` - The generation timestamp
///
/// # Errors
///
/// Returns an error if the state has out-of-range step pointers or cannot
/// be serialized.
pub async fn generate_configuration(
    backend: &LocalBackend,
    state: &WizardState,
    now: OffsetDateTime,
) -> Result<GenerateConfigurationResponse, ApiError> {
    let snapshot: String = state.to_snapshot().map_err(translate_core_error)?;
    WizardState::from_snapshot(&snapshot).map_err(translate_core_error)?;

    let mut store: InMemorySnapshotStore = InMemorySnapshotStore::new();
    store
        .set(GENERATION_SESSION_KEY, snapshot)
        .map_err(translate_core_error)?;

    let mut session: WizardSession<InMemorySnapshotStore> =
        WizardSession::restore(store, GENERATION_SESSION_KEY);
    let outcome: GenerationOutcome = session
        .generate(backend, backend, now)
        .await
        .map_err(translate_core_error)?;

    Ok(GenerateConfigurationResponse {
        configuration: outcome.configuration,
        configuration_id: outcome.configuration_id,
        price_unavailable: outcome.price_unavailable,
        warnings: outcome.warnings,
        state: session.state().clone(),
    })
}

/// Stored documents that are not valid JSON are returned as a JSON string.
fn parse_configuration_data(stored: &StoredConfiguration) -> serde_json::Value {
    serde_json::from_str(&stored.configuration_data).unwrap_or_else(|e| {
        warn!(id = stored.id, error = %e, "Stored configuration is not valid JSON");
        serde_json::Value::String(stored.configuration_data.clone())
    })
}

/// Retrieves a stored configuration.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no configuration has this id.
pub fn get_configuration(
    persistence: &mut Persistence,
    id: i64,
) -> Result<ConfigurationResponse, ApiError> {
    let stored: StoredConfiguration = persistence.get_configuration(id)?;

    Ok(ConfigurationResponse {
        id: stored.id,
        configuration_data: parse_configuration_data(&stored),
        is_generated: stored.is_generated,
        configuration_id: stored.configuration_id,
        created_at: Some(stored.created_at),
        updated_at: stored.updated_at,
    })
}

/// Exports a stored configuration.
///
/// `json` returns the document; `pdf` returns a pending placeholder.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `id` - The configuration row id
/// * `request` - The requested format
/// * `now` - The export timestamp
///
/// # Errors
///
/// Returns an error if:
/// - No configuration has this id
/// - The configuration was not generated
/// - The format is neither `json` nor `pdf`
pub fn export_configuration(
    persistence: &mut Persistence,
    id: i64,
    request: &ExportRequest,
    now: OffsetDateTime,
) -> Result<ExportResponse, ApiError> {
    let stored: StoredConfiguration = persistence.get_configuration(id)?;

    if !stored.is_generated {
        return Err(translate_domain_error(
            DomainError::ConfigurationNotGenerated(id),
        ));
    }

    let format: ExportFormat = request
        .format
        .parse()
        .map_err(translate_domain_error)?;

    info!(id, ?format, "Exporting configuration");

    Ok(match format {
        ExportFormat::Json => ExportResponse::Json(JsonExport {
            format: String::from("json"),
            data: parse_configuration_data(&stored),
            configuration_id: stored.configuration_id,
            exported_at: format_timestamp(now),
            message: String::from("JSON export ready"),
        }),
        ExportFormat::Pdf => ExportResponse::Pending(PendingExport {
            format: String::from("pdf"),
            configuration_id: stored.configuration_id,
            message: String::from("PDF export functionality will be implemented"),
            status: String::from("pending"),
        }),
    })
}

// ============================================================================
// Catalog
// ============================================================================

/// Returns every option catalog.
#[must_use]
pub fn get_catalog(catalog: &Catalog) -> Catalog {
    catalog.clone()
}

/// Resolves catalog ids into the three wizard step payloads, computing racks,
/// efficiency and power consumption.
///
/// # Errors
///
/// Returns an error if:
/// - `nodes_count` is zero
/// - Any id does not match its catalog
pub fn resolve_selections(
    catalog: &Catalog,
    pricing: &PricingService,
    request: &ResolveSelectionsRequest,
) -> Result<ResolveSelectionsResponse, ApiError> {
    if request.nodes_count == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("nodes_count"),
            message: String::from("Node count must be greater than 0"),
        });
    }

    let deployment_type: &DeploymentType = catalog
        .deployment_type(&request.deployment_type)
        .map_err(translate_domain_error)?;

    let step1: SystemSelection = SystemSelection::new(
        catalog
            .system_type(&request.system_type)
            .map_err(translate_domain_error)?
            .to_selected(),
        deployment_type.to_selected(),
        request.nodes_count,
        deployment_type.nodes_per_rack,
    );

    let step2: PowerSelection = PowerSelection::derive(
        catalog
            .power_configuration(&request.power_configuration)
            .map_err(translate_domain_error)?,
        catalog
            .region(&request.region)
            .map_err(translate_domain_error)?,
        &step1,
        &catalog.power_base_table,
    );

    let step3: StorageSelection = StorageSelection::new(
        catalog
            .storage_protocol(&request.storage_protocol)
            .map_err(translate_domain_error)?
            .to_selected(),
        catalog
            .storage_vendor(&request.storage_vendor)
            .map_err(translate_domain_error)?
            .to_selected(),
        catalog
            .support_option(&request.support_option)
            .map_err(translate_domain_error)?
            .to_selected(),
    );

    Ok(ResolveSelectionsResponse {
        price_available: pricing.is_valid_node_count(request.nodes_count),
        within_deployment_range: deployment_type.supports_node_count(request.nodes_count),
        step1,
        step2,
        step3,
    })
}

// ============================================================================
// Service
// ============================================================================

/// Reports service health.
#[must_use]
pub fn health(pricing: &PricingService) -> HealthResponse {
    HealthResponse {
        status: String::from("healthy"),
        service: String::from(SERVICE_NAME),
        version: String::from(env!("CARGO_PKG_VERSION")),
        pricing_loaded: pricing.is_loaded(),
    }
}

/// Describes the service root.
#[must_use]
pub fn service_info() -> ServiceInfoResponse {
    ServiceInfoResponse {
        message: String::from("HPC System Configuration API"),
        health: String::from("/api/health"),
        catalog: String::from("/api/catalog"),
    }
}
