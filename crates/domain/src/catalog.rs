// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static option catalogs offered by the wizard steps.
//!
//! Catalogs are read-only reference data. The wizard only keeps the id and
//! name of what was selected.

use crate::derived::PowerBaseTable;
use crate::error::DomainError;
use crate::types::SelectedOption;
use serde::{Deserialize, Serialize};

/// A plain catalog option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// The catalog identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// A short description.
    pub description: String,
}

impl CatalogItem {
    /// Creates a new `CatalogItem`.
    #[must_use]
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Returns the option as a wizard selection.
    #[must_use]
    pub fn to_selected(&self) -> SelectedOption {
        SelectedOption::new(&self.id, &self.name)
    }
}

/// A deployment type and the node counts it is sized for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentType {
    /// The catalog identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Smallest supported node count.
    pub min_nodes: u32,
    /// Largest supported node count.
    pub max_nodes: u32,
    /// Nodes that fit in one rack for this deployment type.
    pub nodes_per_rack: u32,
}

impl DeploymentType {
    /// Returns the option as a wizard selection.
    #[must_use]
    pub fn to_selected(&self) -> SelectedOption {
        SelectedOption::new(&self.id, &self.name)
    }

    /// Whether `nodes` lies within the sized range. Informational only.
    #[must_use]
    pub const fn supports_node_count(&self, nodes: u32) -> bool {
        nodes >= self.min_nodes && nodes <= self.max_nodes
    }
}

/// A power configuration option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerConfiguration {
    /// The catalog identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Nominal efficiency in `[0, 1]`.
    pub efficiency_rating: f64,
    /// Multiplier applied to base consumption.
    pub efficiency_multiplier: f64,
}

impl PowerConfiguration {
    /// Returns the option as a wizard selection.
    #[must_use]
    pub fn to_selected(&self) -> SelectedOption {
        SelectedOption::new(&self.id, &self.name)
    }
}

/// A deployment region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// The catalog identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Multiplier applied to base consumption for this region.
    pub regional_multiplier: f64,
}

impl Region {
    /// Returns the option as a wizard selection.
    #[must_use]
    pub fn to_selected(&self) -> SelectedOption {
        SelectedOption::new(&self.id, &self.name)
    }
}

/// Every option catalog the wizard offers, plus the power base table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Step 1 system types.
    pub system_types: Vec<CatalogItem>,
    /// Step 1 deployment types.
    pub deployment_types: Vec<DeploymentType>,
    /// Step 2 power configurations.
    pub power_configurations: Vec<PowerConfiguration>,
    /// Step 2 regions.
    pub regions: Vec<Region>,
    /// Step 3 storage protocols.
    pub storage_protocols: Vec<CatalogItem>,
    /// Step 3 storage vendors.
    pub storage_vendors: Vec<CatalogItem>,
    /// Step 3 support options.
    pub support_options: Vec<CatalogItem>,
    /// Base consumption used for power estimates.
    pub power_base_table: PowerBaseTable,
}

impl Catalog {
    /// The catalog shipped with the wizard.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn standard() -> Self {
        let power_base_table: PowerBaseTable = PowerBaseTable::new()
            .with_entry("mini-cluster", 4, 1000.0)
            .with_entry("mini-cluster", 8, 1900.0)
            .with_entry("mini-cluster", 16, 3600.0)
            .with_entry("mini-cluster", 32, 7000.0)
            .with_entry("large-cluster", 64, 13_500.0)
            .with_entry("large-cluster", 128, 26_500.0)
            .with_entry("large-cluster", 192, 39_000.0)
            .with_entry("large-cluster", 256, 52_000.0)
            .with_entry("large-cluster", 320, 64_500.0)
            .with_entry("large-cluster", 384, 77_000.0)
            .with_entry("large-cluster", 448, 89_500.0)
            .with_entry("large-cluster", 512, 102_000.0);

        Self {
            system_types: vec![
                CatalogItem::new(
                    "datacore-x300",
                    "DataCore X300",
                    "General purpose compute with balanced CPU and memory",
                ),
                CatalogItem::new(
                    "datacore-x500",
                    "DataCore X500",
                    "Memory-heavy nodes for large in-core workloads",
                ),
                CatalogItem::new(
                    "quantumedge-q9",
                    "QuantumEdge Q9",
                    "Accelerator-dense nodes for AI and simulation",
                ),
            ],
            deployment_types: vec![
                DeploymentType {
                    id: String::from("mini-cluster"),
                    name: String::from("MiniCluster"),
                    min_nodes: 4,
                    max_nodes: 32,
                    nodes_per_rack: 4,
                },
                DeploymentType {
                    id: String::from("large-cluster"),
                    name: String::from("LargeCluster"),
                    min_nodes: 64,
                    max_nodes: 512,
                    nodes_per_rack: 32,
                },
            ],
            power_configurations: vec![
                PowerConfiguration {
                    id: String::from("standard"),
                    name: String::from("Standard Air Cooling"),
                    efficiency_rating: 0.88,
                    efficiency_multiplier: 1.0,
                },
                PowerConfiguration {
                    id: String::from("high-efficiency"),
                    name: String::from("High Efficiency PSU"),
                    efficiency_rating: 0.94,
                    efficiency_multiplier: 0.9,
                },
                PowerConfiguration {
                    id: String::from("liquid-cooled"),
                    name: String::from("Direct Liquid Cooling"),
                    efficiency_rating: 0.97,
                    efficiency_multiplier: 0.8,
                },
            ],
            regions: vec![
                Region {
                    id: String::from("us-east"),
                    name: String::from("US East"),
                    regional_multiplier: 1.0,
                },
                Region {
                    id: String::from("eu-west"),
                    name: String::from("EU West"),
                    regional_multiplier: 1.1,
                },
                Region {
                    id: String::from("ap-south"),
                    name: String::from("Asia Pacific South"),
                    regional_multiplier: 1.2,
                },
            ],
            storage_protocols: vec![
                CatalogItem::new("nfs", "NFS", "Network File System"),
                CatalogItem::new("lustre", "Lustre", "Parallel distributed file system"),
                CatalogItem::new("gpfs", "IBM Storage Scale", "Formerly GPFS"),
                CatalogItem::new("beegfs", "BeeGFS", "Parallel cluster file system"),
            ],
            storage_vendors: vec![
                CatalogItem::new("netapp", "NetApp", "Unified storage arrays"),
                CatalogItem::new("ddn", "DDN", "High-throughput HPC storage"),
                CatalogItem::new("pure", "Pure Storage", "All-flash arrays"),
            ],
            support_options: vec![
                CatalogItem::new("basic", "Basic", "Business hours, next business day"),
                CatalogItem::new("premium", "Premium", "24/7, four hour response"),
                CatalogItem::new(
                    "mission-critical",
                    "Mission Critical",
                    "24/7 with a dedicated engineer",
                ),
            ],
            power_base_table,
        }
    }

    /// Finds a system type by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no system type has that id.
    pub fn system_type(&self, id: &str) -> Result<&CatalogItem, DomainError> {
        find_item(&self.system_types, "system type", id)
    }

    /// Finds a deployment type by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no deployment type has that id.
    pub fn deployment_type(&self, id: &str) -> Result<&DeploymentType, DomainError> {
        self.deployment_types
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| unknown("deployment type", id))
    }

    /// Finds a power configuration by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no power configuration has that id.
    pub fn power_configuration(&self, id: &str) -> Result<&PowerConfiguration, DomainError> {
        self.power_configurations
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| unknown("power configuration", id))
    }

    /// Finds a region by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no region has that id.
    pub fn region(&self, id: &str) -> Result<&Region, DomainError> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| unknown("region", id))
    }

    /// Finds a storage protocol by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no storage protocol has that id.
    pub fn storage_protocol(&self, id: &str) -> Result<&CatalogItem, DomainError> {
        find_item(&self.storage_protocols, "storage protocol", id)
    }

    /// Finds a storage vendor by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no storage vendor has that id.
    pub fn storage_vendor(&self, id: &str) -> Result<&CatalogItem, DomainError> {
        find_item(&self.storage_vendors, "storage vendor", id)
    }

    /// Finds a support option by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no support option has that id.
    pub fn support_option(&self, id: &str) -> Result<&CatalogItem, DomainError> {
        find_item(&self.support_options, "support option", id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn find_item<'a>(
    items: &'a [CatalogItem],
    catalog: &'static str,
    id: &str,
) -> Result<&'a CatalogItem, DomainError> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| unknown(catalog, id))
}

fn unknown(catalog: &'static str, id: &str) -> DomainError {
    DomainError::UnknownCatalogItem {
        catalog,
        id: id.to_string(),
    }
}
