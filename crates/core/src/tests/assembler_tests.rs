// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_filled_state, create_test_system};
use crate::{
    AssembledConfiguration, CONFIGURATION_VERSION, Command, StepData, WizardState, apply,
    assemble, format_timestamp,
};
use hpc_config_domain::{Decimal, PriceQuote};
use time::OffsetDateTime;
use time::macros::datetime;

const GENERATED_AT: OffsetDateTime = datetime!(2026-03-01 12:30:00 UTC);

fn quote(nodes_count: u32, cents: i64) -> PriceQuote {
    PriceQuote {
        nodes_count,
        price_usd: Decimal::new(cents, 2),
        currency: String::from("USD"),
    }
}

#[test]
fn test_assemble_projects_names() {
    let state: WizardState = create_filled_state(8);

    let configuration: AssembledConfiguration = assemble(&state, None, GENERATED_AT);

    assert_eq!(configuration.system_type, "DataCore X300");
    assert_eq!(configuration.deployment_type, "MiniCluster");
    assert_eq!(configuration.nodes_count, 8);
    assert_eq!(configuration.nodes_per_rack, 4);
    assert_eq!(configuration.total_racks, 2);
    assert_eq!(configuration.power_configuration, "High Efficiency PSU");
    assert_eq!(configuration.region, "EU West");
    assert_eq!(configuration.storage_protocol, "Lustre");
    assert_eq!(configuration.storage_vendor, "DDN");
    assert_eq!(configuration.support_option, "Premium");
    assert_eq!(configuration.version, CONFIGURATION_VERSION);
    assert_eq!(configuration.generated_at, "2026-03-01T12:30:00Z");
}

#[test]
fn test_assemble_copies_derived_power_values() {
    let state: WizardState = create_filled_state(16);
    let power = state.step2.clone().unwrap();

    let configuration: AssembledConfiguration = assemble(&state, None, GENERATED_AT);

    assert_eq!(
        configuration.calculated_efficiency,
        power.calculated_efficiency
    );
    assert_eq!(
        configuration.estimated_power_consumption,
        power.estimated_power_consumption
    );
}

#[test]
fn test_assemble_without_quote_omits_pricing() {
    let state: WizardState = create_filled_state(4);

    let configuration: AssembledConfiguration = assemble(&state, None, GENERATED_AT);
    let value: serde_json::Value = configuration.to_value().unwrap();

    assert!(configuration.pricing.is_none());
    assert!(value.get("pricing").is_none());
}

#[test]
fn test_assemble_with_quote_attaches_pricing() {
    let state: WizardState = create_filled_state(4);

    let configuration: AssembledConfiguration =
        assemble(&state, Some(&quote(4, 19_999)), GENERATED_AT);

    let pricing = configuration.pricing.clone().unwrap();
    assert_eq!(pricing.total_price_usd, Decimal::new(19_999, 2));
    assert_eq!(pricing.currency, "USD");
    assert_eq!(pricing.nodes_count, 4);
    assert_eq!(pricing.calculated_at, configuration.generated_at);

    let value: serde_json::Value = configuration.to_value().unwrap();
    assert_eq!(value["pricing"]["total_price_usd"], serde_json::json!(199.99));
}

#[test]
fn test_assemble_partial_state_uses_empty_values() {
    let state: WizardState = apply(
        &WizardState::new(),
        Command::UpdateStep(StepData::System(create_test_system(12))),
    )
    .unwrap()
    .new_state;

    let configuration: AssembledConfiguration = assemble(&state, None, GENERATED_AT);

    assert_eq!(configuration.nodes_count, 12);
    assert_eq!(configuration.total_racks, 3);
    assert_eq!(configuration.power_configuration, "");
    assert_eq!(configuration.region, "");
    assert_eq!(configuration.calculated_efficiency, 0.0);
    assert_eq!(configuration.estimated_power_consumption, 0.0);
    assert_eq!(configuration.storage_protocol, "");
    assert_eq!(configuration.support_option, "");
}

#[test]
fn test_assemble_empty_state() {
    let configuration: AssembledConfiguration =
        assemble(&WizardState::new(), None, GENERATED_AT);

    assert_eq!(configuration.system_type, "");
    assert_eq!(configuration.nodes_count, 0);
    assert_eq!(configuration.total_racks, 0);
    assert_eq!(configuration.version, CONFIGURATION_VERSION);
}

#[test]
fn test_assembled_configuration_json_is_readable_back() {
    let configuration: AssembledConfiguration = assemble(
        &create_filled_state(32),
        Some(&quote(32, 119_999)),
        GENERATED_AT,
    );

    let json: String = configuration.to_json().unwrap();
    let parsed: AssembledConfiguration = AssembledConfiguration::from_json(&json).unwrap();

    assert_eq!(parsed, configuration);
}

#[test]
fn test_from_json_rejects_wrong_shape() {
    let result = AssembledConfiguration::from_json(r#"{"system_type": 5}"#);

    assert!(result.is_err());
}

#[test]
fn test_format_timestamp_rfc3339() {
    assert_eq!(
        format_timestamp(datetime!(2026-01-02 03:04:05 UTC)),
        "2026-01-02T03:04:05Z"
    );
}
