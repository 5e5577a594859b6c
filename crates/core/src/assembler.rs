// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Projection of wizard state into the exported configuration shape.

use crate::error::CoreError;
use crate::state::WizardState;
use hpc_config_domain::{Decimal, PriceQuote};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Schema version stamped on every assembled configuration.
pub const CONFIGURATION_VERSION: &str = "1.0.0";

/// Price attached to a configuration when a lookup succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSummary {
    /// Total price.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price_usd: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// The node count that was priced.
    pub nodes_count: u32,
    /// When the price was attached (RFC 3339).
    pub calculated_at: String,
}

/// The flat, persisted and exported form of a wizard configuration.
///
/// Only option names are kept. Missing steps project to empty strings and zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledConfiguration {
    /// Name of the selected system.
    pub system_type: String,
    /// Name of the selected deployment type.
    pub deployment_type: String,
    /// Selected node count.
    pub nodes_count: u32,
    /// Nodes that fit in one rack.
    pub nodes_per_rack: u32,
    /// Racks needed for `nodes_count`.
    pub total_racks: u32,
    /// Name of the selected power configuration.
    pub power_configuration: String,
    /// Name of the selected region.
    pub region: String,
    /// Efficiency after the regional multiplier.
    pub calculated_efficiency: f64,
    /// Estimated power consumption, rounded to one decimal.
    pub estimated_power_consumption: f64,
    /// Name of the selected storage protocol.
    pub storage_protocol: String,
    /// Name of the selected storage vendor.
    pub storage_vendor: String,
    /// Name of the selected support option.
    pub support_option: String,
    /// When the configuration was assembled (RFC 3339).
    pub generated_at: String,
    /// Always [`CONFIGURATION_VERSION`] for newly assembled configurations.
    pub version: String,
    /// Present only when a price was fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSummary>,
}

impl AssembledConfiguration {
    /// Serializes to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parses a configuration previously produced by [`AssembledConfiguration::to_json`].
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Formats a timestamp as RFC 3339, falling back to the unix timestamp.
#[must_use]
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// Builds the exported configuration from the wizard state.
///
/// Never fails: whatever is known is exported.
///
/// # Arguments
///
/// * `state` - The wizard state to project
/// * `quote` - The fetched price, if the lookup succeeded
/// * `generated_at` - The assembly timestamp
#[must_use]
pub fn assemble(
    state: &WizardState,
    quote: Option<&PriceQuote>,
    generated_at: OffsetDateTime,
) -> AssembledConfiguration {
    let timestamp: String = format_timestamp(generated_at);

    let (system_type, deployment_type, nodes_count, nodes_per_rack, total_racks) =
        state.step1.as_ref().map_or_else(
            || (String::new(), String::new(), 0, 0, 0),
            |system| {
                (
                    system.system_type.name.clone(),
                    system.deployment_type.name.clone(),
                    system.selected_nodes,
                    system.nodes_per_rack,
                    system.total_racks,
                )
            },
        );

    let (power_configuration, region, calculated_efficiency, estimated_power_consumption) =
        state.step2.as_ref().map_or_else(
            || (String::new(), String::new(), 0.0, 0.0),
            |power| {
                (
                    power.power_configuration.name.clone(),
                    power.region.name.clone(),
                    power.calculated_efficiency,
                    power.estimated_power_consumption,
                )
            },
        );

    let (storage_protocol, storage_vendor, support_option) = state.step3.as_ref().map_or_else(
        || (String::new(), String::new(), String::new()),
        |storage| {
            (
                storage.storage_protocol.name.clone(),
                storage.storage_vendor.name.clone(),
                storage.support_option.name.clone(),
            )
        },
    );

    let pricing: Option<PricingSummary> = quote.map(|quote| PricingSummary {
        total_price_usd: quote.price_usd,
        currency: quote.currency.clone(),
        nodes_count: quote.nodes_count,
        calculated_at: timestamp.clone(),
    });

    AssembledConfiguration {
        system_type,
        deployment_type,
        nodes_count,
        nodes_per_rack,
        total_racks,
        power_configuration,
        region,
        calculated_efficiency,
        estimated_power_consumption,
        storage_protocol,
        storage_vendor,
        support_option,
        generated_at: timestamp,
        version: String::from(CONFIGURATION_VERSION),
        pricing,
    }
}
