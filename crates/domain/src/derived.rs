// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Values derived from wizard selections.
//!
//! These functions are pure. Lookups that miss fall back to defaults instead
//! of failing, so an incomplete catalog still yields an estimate.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Base power consumption used when the base table has no entry for a
/// deployment type and node count.
pub const DEFAULT_BASE_CONSUMPTION: f64 = 1000.0;

/// Base power consumption per deployment type and node count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerBaseTable {
    /// Keyed by deployment type id, then node count.
    entries: HashMap<String, BTreeMap<u32, f64>>,
}

impl PowerBaseTable {
    /// Creates an empty table. Every lookup falls back to
    /// [`DEFAULT_BASE_CONSUMPTION`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table with one more entry.
    #[must_use]
    pub fn with_entry(mut self, deployment_type_id: &str, nodes: u32, base: f64) -> Self {
        self.insert(deployment_type_id, nodes, base);
        self
    }

    /// Inserts or replaces the base consumption for a deployment type and node count.
    pub fn insert(&mut self, deployment_type_id: &str, nodes: u32, base: f64) {
        self.entries
            .entry(deployment_type_id.to_string())
            .or_default()
            .insert(nodes, base);
    }

    /// Returns the configured base consumption, if any.
    #[must_use]
    pub fn base_consumption(&self, deployment_type_id: &str, nodes: u32) -> Option<f64> {
        self.entries
            .get(deployment_type_id)
            .and_then(|by_nodes| by_nodes.get(&nodes))
            .copied()
    }
}

/// Computes how many racks are needed to hold `nodes` nodes.
///
/// Uses ceiling division. A zero input yields zero rather than an error.
#[must_use]
pub const fn total_racks(nodes: u32, nodes_per_rack: u32) -> u32 {
    if nodes == 0 || nodes_per_rack == 0 {
        return 0;
    }
    nodes.div_ceil(nodes_per_rack)
}

/// Estimates power consumption for a deployment.
///
/// Looks up `base_table[deployment_type_id][node_count_key]` and falls back to
/// [`DEFAULT_BASE_CONSUMPTION`] when there is no entry. The result is
/// `base * efficiency_multiplier * regional_multiplier` rounded to one decimal.
#[must_use]
pub fn estimated_power(
    deployment_type_id: &str,
    node_count_key: u32,
    efficiency_multiplier: f64,
    regional_multiplier: f64,
    base_table: &PowerBaseTable,
) -> f64 {
    let base: f64 = base_table
        .base_consumption(deployment_type_id, node_count_key)
        .unwrap_or_else(|| {
            debug!(
                deployment_type_id,
                node_count_key, "No base consumption configured, using default"
            );
            DEFAULT_BASE_CONSUMPTION
        });

    round_to_tenth(base * efficiency_multiplier * regional_multiplier)
}

/// Computes the efficiency reported for a power selection.
///
/// The rating of the power configuration is degraded by the regional
/// multiplier and clamped into `[0, 1]`, rounded to two decimals.
#[must_use]
pub fn calculated_efficiency(efficiency_rating: f64, regional_multiplier: f64) -> f64 {
    if regional_multiplier <= 0.0 {
        return round_to_hundredth(efficiency_rating.clamp(0.0, 1.0));
    }
    round_to_hundredth((efficiency_rating / regional_multiplier).clamp(0.0, 1.0))
}

/// Rounds to one decimal place.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
#[must_use]
pub fn round_to_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
