// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hpc_config_domain::{Catalog, Decimal};
use hpc_config_persistence::Persistence;
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::tests::helpers::{
    create_loaded_pricing, create_resolve_request, create_seeded_persistence,
};
use crate::{
    AllPricesResponse, ApiError, AvailableNodeCountsResponse, ConfigurationResponse,
    ExportRequest, ExportResponse, HealthResponse, PriceResponse, PricingService,
    ResolveSelectionsRequest, ResolveSelectionsResponse, SERVICE_NAME, SaveConfigurationRequest,
    SaveConfigurationResponse, export_configuration, get_all_prices, get_available_node_counts,
    get_catalog, get_configuration, get_price_by_nodes, health, resolve_selections,
    save_configuration, service_info,
};

const EXPORTED_AT: OffsetDateTime = datetime!(2026-04-02 09:15:00 UTC);

fn export_request(format: &str) -> ExportRequest {
    ExportRequest {
        format: format.to_string(),
    }
}

// ============================================================================
// Pricing
// ============================================================================

#[test]
fn test_get_price_by_nodes() {
    let mut persistence: Persistence = create_seeded_persistence();
    let pricing: PricingService = create_loaded_pricing(&mut persistence);

    let response: PriceResponse = get_price_by_nodes(&pricing, 16).unwrap();

    assert_eq!(response.nodes_count, 16);
    assert_eq!(response.price_usd, Decimal::new(64_999, 2));
    assert_eq!(response.currency, "USD");
    assert_eq!(response.response_time_ms, "< 1ms");
}

#[test]
fn test_get_all_prices_keyed_by_node_count() {
    let mut persistence: Persistence = create_seeded_persistence();
    let pricing: PricingService = create_loaded_pricing(&mut persistence);

    let response: AllPricesResponse = get_all_prices(&pricing).unwrap();

    assert_eq!(response.total_options, 12);
    assert_eq!(response.currency, "USD");
    assert_eq!(
        response.pricing_options.get(&512),
        Some(&Decimal::new(1_499_999, 2))
    );

    let value: serde_json::Value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["pricing_options"]["4"], json!(199.99));
}

#[test]
fn test_get_available_node_counts_sorted() {
    let mut persistence: Persistence = create_seeded_persistence();
    let pricing: PricingService = create_loaded_pricing(&mut persistence);

    let response: AvailableNodeCountsResponse = get_available_node_counts(&pricing).unwrap();

    assert_eq!(response.total_options, 12);
    assert_eq!(response.available_node_counts.first(), Some(&4));
    assert_eq!(response.available_node_counts.last(), Some(&512));
    assert!(
        response
            .available_node_counts
            .windows(2)
            .all(|pair| pair[0] < pair[1])
    );
}

// ============================================================================
// Configurations
// ============================================================================

#[test]
fn test_save_and_get_configuration() {
    let mut persistence: Persistence = create_seeded_persistence();
    let data: serde_json::Value = json!({"system_type": "DataCore X300", "nodes_count": 16});

    let saved: SaveConfigurationResponse =
        save_configuration(&mut persistence, &SaveConfigurationRequest::new(data.clone()))
            .unwrap();

    assert_eq!(saved.status, "success");
    assert_eq!(saved.message, "Configuration saved successfully");
    assert!(saved.configuration_id.starts_with("LOCAL-"));

    let fetched: ConfigurationResponse = get_configuration(&mut persistence, saved.id).unwrap();

    assert_eq!(fetched.id, saved.id);
    assert_eq!(fetched.configuration_data, data);
    assert_eq!(fetched.configuration_id.as_deref(), Some(saved.configuration_id.as_str()));
    assert!(fetched.is_generated);
    assert!(fetched.created_at.is_some());
    assert!(fetched.updated_at.is_none());
}

#[test]
fn test_save_with_id_replaces_stored_configuration() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut request: SaveConfigurationRequest =
        SaveConfigurationRequest::new(json!({"nodes_count": 4}));
    request.configuration_id = Some(String::from("CFG-7"));

    let first: SaveConfigurationResponse = save_configuration(&mut persistence, &request).unwrap();

    request.configuration_data = json!({"nodes_count": 8});
    let second: SaveConfigurationResponse =
        save_configuration(&mut persistence, &request).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.configuration_id, "CFG-7");
    assert_eq!(persistence.count_configurations().unwrap(), 1);

    let fetched: ConfigurationResponse = get_configuration(&mut persistence, first.id).unwrap();
    assert_eq!(fetched.configuration_data, json!({"nodes_count": 8}));
    assert!(fetched.updated_at.is_some());
}

#[test]
fn test_save_with_blank_id_is_rejected() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut request: SaveConfigurationRequest = SaveConfigurationRequest::new(json!({}));
    request.configuration_id = Some(String::from("   "));

    let err: ApiError = save_configuration(&mut persistence, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "configuration_id"));
    assert_eq!(persistence.count_configurations().unwrap(), 0);
}

#[test]
fn test_save_request_defaults() {
    let request: SaveConfigurationRequest =
        serde_json::from_value(json!({"configuration_data": {"a": 1}})).unwrap();

    assert!(request.is_generated);
    assert!(request.configuration_id.is_none());
}

#[test]
fn test_get_unknown_configuration() {
    let mut persistence: Persistence = create_seeded_persistence();

    let err: ApiError = get_configuration(&mut persistence, 99).unwrap_err();

    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Configuration"),
            message: String::from("Configuration with ID 99 not found"),
        }
    );
}

#[test]
fn test_export_json() {
    let mut persistence: Persistence = create_seeded_persistence();
    let data: serde_json::Value = json!({"support_option": "Premium"});
    let saved: SaveConfigurationResponse =
        save_configuration(&mut persistence, &SaveConfigurationRequest::new(data.clone()))
            .unwrap();

    let response: ExportResponse = export_configuration(
        &mut persistence,
        saved.id,
        &export_request("JSON"),
        EXPORTED_AT,
    )
    .unwrap();

    match response {
        ExportResponse::Json(export) => {
            assert_eq!(export.format, "json");
            assert_eq!(export.data, data);
            assert_eq!(export.configuration_id, Some(saved.configuration_id));
            assert_eq!(export.exported_at, "2026-04-02T09:15:00Z");
            assert_eq!(export.message, "JSON export ready");
        }
        ExportResponse::Pending(_) => panic!("Expected a JSON export"),
    }
}

#[test]
fn test_export_pdf_is_pending() {
    let mut persistence: Persistence = create_seeded_persistence();
    let saved: SaveConfigurationResponse =
        save_configuration(&mut persistence, &SaveConfigurationRequest::new(json!({}))).unwrap();

    let response: ExportResponse =
        export_configuration(&mut persistence, saved.id, &export_request("pdf"), EXPORTED_AT)
            .unwrap();

    let value: serde_json::Value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["format"], "pdf");
    assert_eq!(value["status"], "pending");
    assert_eq!(value["message"], "PDF export functionality will be implemented");
}

#[test]
fn test_export_unsupported_format() {
    let mut persistence: Persistence = create_seeded_persistence();
    let saved: SaveConfigurationResponse =
        save_configuration(&mut persistence, &SaveConfigurationRequest::new(json!({}))).unwrap();

    let err: ApiError =
        export_configuration(&mut persistence, saved.id, &export_request("xml"), EXPORTED_AT)
            .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "format"));
}

#[test]
fn test_export_requires_generated_configuration() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut request: SaveConfigurationRequest = SaveConfigurationRequest::new(json!({}));
    request.is_generated = false;
    let saved: SaveConfigurationResponse = save_configuration(&mut persistence, &request).unwrap();

    let err: ApiError =
        export_configuration(&mut persistence, saved.id, &export_request("json"), EXPORTED_AT)
            .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, ref message }
            if field == "is_generated" && message.contains("must be generated before export")
    ));
}

#[test]
fn test_export_unknown_configuration() {
    let mut persistence: Persistence = create_seeded_persistence();

    let err: ApiError =
        export_configuration(&mut persistence, 5, &export_request("json"), EXPORTED_AT)
            .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_get_catalog_returns_standard_options() {
    let catalog: Catalog = get_catalog(&Catalog::standard());

    assert_eq!(catalog.system_types.len(), 3);
    assert_eq!(catalog.deployment_types.len(), 2);
    assert_eq!(catalog.regions.len(), 3);
}

#[test]
fn test_resolve_selections_derives_values() {
    let mut persistence: Persistence = create_seeded_persistence();
    let pricing: PricingService = create_loaded_pricing(&mut persistence);

    let response: ResolveSelectionsResponse =
        resolve_selections(&Catalog::standard(), &pricing, &create_resolve_request()).unwrap();

    assert_eq!(response.step1.system_type.name, "DataCore X300");
    assert_eq!(response.step1.deployment_type.name, "MiniCluster");
    assert_eq!(response.step1.nodes_per_rack, 4);
    assert_eq!(response.step1.total_racks, 4);
    assert!((response.step2.calculated_efficiency - 0.88).abs() < f64::EPSILON);
    assert!((response.step2.estimated_power_consumption - 3600.0).abs() < f64::EPSILON);
    assert_eq!(response.step3.storage_vendor.name, "DDN");
    assert!(response.price_available);
    assert!(response.within_deployment_range);
}

#[test]
fn test_resolve_selections_flags_unpriced_count() {
    let mut persistence: Persistence = create_seeded_persistence();
    let pricing: PricingService = create_loaded_pricing(&mut persistence);
    let request: ResolveSelectionsRequest = ResolveSelectionsRequest {
        nodes_count: 100,
        ..create_resolve_request()
    };

    let response: ResolveSelectionsResponse =
        resolve_selections(&Catalog::standard(), &pricing, &request).unwrap();

    assert!(!response.price_available);
    assert!(!response.within_deployment_range);
    assert_eq!(response.step1.total_racks, 25);
}

#[test]
fn test_resolve_selections_unknown_id() {
    let pricing: PricingService = PricingService::new();
    let request: ResolveSelectionsRequest = ResolveSelectionsRequest {
        region: String::from("mars-north"),
        ..create_resolve_request()
    };

    let err: ApiError = resolve_selections(&Catalog::standard(), &pricing, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "region"));
}

#[test]
fn test_resolve_selections_zero_nodes() {
    let pricing: PricingService = PricingService::new();
    let request: ResolveSelectionsRequest = ResolveSelectionsRequest {
        nodes_count: 0,
        ..create_resolve_request()
    };

    let err: ApiError = resolve_selections(&Catalog::standard(), &pricing, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "nodes_count"));
}

// ============================================================================
// Service
// ============================================================================

#[test]
fn test_health_reports_pricing_state() {
    let mut persistence: Persistence = create_seeded_persistence();

    let before: HealthResponse = health(&PricingService::new());
    let after: HealthResponse = health(&create_loaded_pricing(&mut persistence));

    assert_eq!(before.status, "healthy");
    assert_eq!(before.service, SERVICE_NAME);
    assert_eq!(before.version, env!("CARGO_PKG_VERSION"));
    assert!(!before.pricing_loaded);
    assert!(after.pricing_loaded);
}

#[test]
fn test_service_info_links() {
    let info = service_info();

    assert_eq!(info.health, "/api/health");
    assert_eq!(info.catalog, "/api/catalog");
}
