// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use hpc_config::{AssembledConfiguration, WizardState};
use hpc_config_domain::{Decimal, DomainError, PowerSelection, StorageSelection, SystemSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// How long a cached price lookup takes, as reported to clients.
pub const CACHED_RESPONSE_TIME: &str = "< 1ms";

const fn default_generated() -> bool {
    true
}

// ============================================================================
// Pricing
// ============================================================================

/// API response for a single price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResponse {
    /// The node count that was priced.
    pub nodes_count: u32,
    /// The price in `currency`.
    pub price_usd: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Always [`CACHED_RESPONSE_TIME`]; prices are served from memory.
    pub response_time_ms: String,
}

/// API response listing every price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllPricesResponse {
    /// Node count to price.
    pub pricing_options: BTreeMap<u32, Decimal>,
    pub currency: String,
    pub total_options: usize,
}

/// API response listing the node counts that have a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableNodeCountsResponse {
    /// Sorted ascending.
    pub available_node_counts: Vec<u32>,
    pub total_options: usize,
    pub message: String,
}

// ============================================================================
// Configurations
// ============================================================================

/// API request to save a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveConfigurationRequest {
    /// The configuration document, usually an assembled configuration.
    pub configuration_data: serde_json::Value,
    /// When set, the row stored under this id is replaced instead of a new
    /// `LOCAL-<millis>` row being created.
    #[serde(default)]
    pub configuration_id: Option<String>,
    /// Whether the configuration was generated. Only generated
    /// configurations can be exported.
    #[serde(default = "default_generated")]
    pub is_generated: bool,
}

impl SaveConfigurationRequest {
    /// Creates a request for a new generated configuration.
    #[must_use]
    pub const fn new(configuration_data: serde_json::Value) -> Self {
        Self {
            configuration_data,
            configuration_id: None,
            is_generated: true,
        }
    }
}

/// API response for a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfigurationResponse {
    /// Database row id.
    pub id: i64,
    /// Public configuration id.
    pub configuration_id: String,
    pub message: String,
    /// Always `success`.
    pub status: String,
}

/// API response for a stored configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationResponse {
    pub id: i64,
    /// The stored document, parsed back into JSON.
    pub configuration_data: serde_json::Value,
    pub is_generated: bool,
    pub configuration_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// API response for a server-side generation of a wizard state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfigurationResponse {
    pub configuration: AssembledConfiguration,
    /// Set when the configuration was saved.
    pub configuration_id: Option<String>,
    pub price_unavailable: bool,
    pub warnings: Vec<String>,
    /// The submitted state, marked generated.
    pub state: WizardState,
}

/// API request to export a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// `json` or `pdf`, case-insensitive.
    pub format: String,
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Pdf,
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pdf" => Ok(Self::Pdf),
            _ => Err(DomainError::UnsupportedExportFormat(s.to_string())),
        }
    }
}

/// A ready JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonExport {
    /// Always `json`.
    pub format: String,
    pub configuration_id: Option<String>,
    pub data: serde_json::Value,
    /// RFC 3339.
    pub exported_at: String,
    pub message: String,
}

/// A PDF export. Rendering is not implemented, so it is always pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingExport {
    /// Always `pdf`.
    pub format: String,
    pub configuration_id: Option<String>,
    pub message: String,
    /// Always `pending`.
    pub status: String,
}

/// API response for an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportResponse {
    Json(JsonExport),
    Pending(PendingExport),
}

// ============================================================================
// Catalog
// ============================================================================

/// API request resolving catalog ids into wizard step payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveSelectionsRequest {
    pub system_type: String,
    pub deployment_type: String,
    pub nodes_count: u32,
    pub power_configuration: String,
    pub region: String,
    pub storage_protocol: String,
    pub storage_vendor: String,
    pub support_option: String,
}

/// The three step payloads with their derived values filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveSelectionsResponse {
    pub step1: SystemSelection,
    pub step2: PowerSelection,
    pub step3: StorageSelection,
    /// Whether a price exists for the node count.
    pub price_available: bool,
    /// Whether the node count lies in the deployment type's sized range.
    pub within_deployment_range: bool,
}

// ============================================================================
// Service
// ============================================================================

/// API response for the health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the process answers.
    pub status: String,
    pub service: String,
    pub version: String,
    pub pricing_loaded: bool,
}

/// API response for the service root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub health: String,
    pub catalog: String,
}
