// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hpc_config_persistence::Persistence;

use crate::{PricingService, ResolveSelectionsRequest};

/// Creates an in-memory database with the default prices seeded.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create persistence");
    persistence
        .seed_default_pricing()
        .expect("Failed to seed prices");
    persistence
}

/// Creates a pricing service loaded from `persistence`.
pub fn create_loaded_pricing(persistence: &mut Persistence) -> PricingService {
    let mut pricing: PricingService = PricingService::new();
    pricing.load(persistence).expect("Failed to load prices");
    pricing
}

/// A selection request for a 16 node `MiniCluster`.
pub fn create_resolve_request() -> ResolveSelectionsRequest {
    ResolveSelectionsRequest {
        system_type: String::from("datacore-x300"),
        deployment_type: String::from("mini-cluster"),
        nodes_count: 16,
        power_configuration: String::from("standard"),
        region: String::from("us-east"),
        storage_protocol: String::from("lustre"),
        storage_vendor: String::from("ddn"),
        support_option: String::from("premium"),
    }
}
