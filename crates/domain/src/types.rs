// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::{PowerConfiguration, Region};
use crate::derived::{PowerBaseTable, calculated_efficiency, estimated_power, total_racks};
use serde::{Deserialize, Serialize};

/// A catalog option picked in a wizard step.
///
/// Steps keep the identifier for lookups and the display name for export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedOption {
    /// The catalog identifier.
    pub id: String,
    /// The human-readable name.
    pub name: String,
}

impl SelectedOption {
    /// Creates a new `SelectedOption`.
    ///
    /// # Arguments
    ///
    /// * `id` - The catalog identifier
    /// * `name` - The display name
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Step 1: system type, deployment type and node count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSelection {
    /// The selected system type.
    pub system_type: SelectedOption,
    /// The selected deployment type.
    pub deployment_type: SelectedOption,
    /// Number of compute nodes.
    pub selected_nodes: u32,
    /// Nodes that fit in one rack.
    pub nodes_per_rack: u32,
    /// `ceil(selected_nodes / nodes_per_rack)`.
    pub total_racks: u32,
}

impl SystemSelection {
    /// Creates a system selection with `total_racks` derived from the node counts.
    ///
    /// # Arguments
    ///
    /// * `system_type` - The selected system type
    /// * `deployment_type` - The selected deployment type
    /// * `selected_nodes` - Number of compute nodes
    /// * `nodes_per_rack` - Nodes per rack
    #[must_use]
    pub const fn new(
        system_type: SelectedOption,
        deployment_type: SelectedOption,
        selected_nodes: u32,
        nodes_per_rack: u32,
    ) -> Self {
        Self {
            system_type,
            deployment_type,
            selected_nodes,
            nodes_per_rack,
            total_racks: total_racks(selected_nodes, nodes_per_rack),
        }
    }
}

/// Step 2: power configuration and region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSelection {
    /// The selected power configuration.
    pub power_configuration: SelectedOption,
    /// The selected region.
    pub region: SelectedOption,
    /// Efficiency in `[0, 1]`.
    pub calculated_efficiency: f64,
    /// Estimated consumption, never negative.
    pub estimated_power_consumption: f64,
}

impl PowerSelection {
    /// Derives a power selection from catalog entries and the system step.
    ///
    /// Efficiency and consumption are computed here so that every caller
    /// stores the same values for the same inputs.
    ///
    /// # Arguments
    ///
    /// * `power_configuration` - The chosen power configuration
    /// * `region` - The chosen region
    /// * `system` - The system step the estimate is based on
    /// * `base_table` - Base consumption per deployment type and node count
    #[must_use]
    pub fn derive(
        power_configuration: &PowerConfiguration,
        region: &Region,
        system: &SystemSelection,
        base_table: &PowerBaseTable,
    ) -> Self {
        let consumption: f64 = estimated_power(
            &system.deployment_type.id,
            system.selected_nodes,
            power_configuration.efficiency_multiplier,
            region.regional_multiplier,
            base_table,
        );

        Self {
            power_configuration: power_configuration.to_selected(),
            region: region.to_selected(),
            calculated_efficiency: calculated_efficiency(
                power_configuration.efficiency_rating,
                region.regional_multiplier,
            ),
            estimated_power_consumption: consumption.max(0.0),
        }
    }
}

/// Step 3: storage protocol, vendor and support option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSelection {
    /// The selected storage protocol.
    pub storage_protocol: SelectedOption,
    /// The selected storage vendor.
    pub storage_vendor: SelectedOption,
    /// The selected support option.
    pub support_option: SelectedOption,
}

impl StorageSelection {
    /// Creates a new `StorageSelection`.
    #[must_use]
    pub const fn new(
        storage_protocol: SelectedOption,
        storage_vendor: SelectedOption,
        support_option: SelectedOption,
    ) -> Self {
        Self {
            storage_protocol,
            storage_vendor,
            support_option,
        }
    }
}
