// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AssembledConfiguration, ConfigurationSink, CoreError, PricingSource, StepData, WizardState,
    apply,
};
use hpc_config_domain::{
    Catalog, PowerSelection, PriceQuote, PriceTable, SelectedOption, StorageSelection,
    SystemSelection, default_price_entries,
};
use std::sync::Mutex;

pub fn create_test_system(nodes: u32) -> SystemSelection {
    SystemSelection::new(
        SelectedOption::new("datacore-x300", "DataCore X300"),
        SelectedOption::new("mini-cluster", "MiniCluster"),
        nodes,
        4,
    )
}

pub fn create_test_power(system: &SystemSelection) -> PowerSelection {
    let catalog: Catalog = Catalog::standard();
    PowerSelection::derive(
        catalog.power_configuration("high-efficiency").unwrap(),
        catalog.region("eu-west").unwrap(),
        system,
        &catalog.power_base_table,
    )
}

pub fn create_test_storage() -> StorageSelection {
    StorageSelection::new(
        SelectedOption::new("lustre", "Lustre"),
        SelectedOption::new("ddn", "DDN"),
        SelectedOption::new("premium", "Premium"),
    )
}

/// A state with all three steps filled for `nodes` nodes.
pub fn create_filled_state(nodes: u32) -> WizardState {
    let system: SystemSelection = create_test_system(nodes);
    let power: PowerSelection = create_test_power(&system);

    let mut state: WizardState = WizardState::new();
    for data in [
        StepData::System(system),
        StepData::Power(power),
        StepData::Storage(create_test_storage()),
    ] {
        state = apply(&state, crate::Command::UpdateStep(data))
            .unwrap()
            .new_state;
    }
    state
}

/// Prices from the default seed table.
pub struct TablePricing {
    pub table: PriceTable,
}

impl TablePricing {
    pub fn standard() -> Self {
        Self {
            table: PriceTable::from_entries(&default_price_entries()),
        }
    }
}

impl PricingSource for TablePricing {
    async fn price(&self, nodes_count: u32) -> Result<PriceQuote, CoreError> {
        Ok(self.table.lookup(nodes_count)?)
    }
}

/// Records saved configurations and hands out sequential ids.
#[derive(Default)]
pub struct RecordingSink {
    pub saved: Mutex<Vec<AssembledConfiguration>>,
}

impl ConfigurationSink for RecordingSink {
    async fn save_configuration(
        &self,
        configuration: &AssembledConfiguration,
    ) -> Result<String, CoreError> {
        let mut saved = self.saved.lock().unwrap();
        saved.push(configuration.clone());
        Ok(format!("TEST-{}", saved.len()))
    }
}

/// A sink whose backend is always down.
pub struct FailingSink;

impl ConfigurationSink for FailingSink {
    async fn save_configuration(
        &self,
        _configuration: &AssembledConfiguration,
    ) -> Result<String, CoreError> {
        Err(CoreError::Collaborator {
            collaborator: "configuration backend",
            message: String::from("connection refused"),
        })
    }
}
