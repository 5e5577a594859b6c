// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Price table mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hpc_config_domain::{PriceEntry, default_price_entries};
use tracing::info;

use crate::diesel_schema::node_pricing;
use crate::error::PersistenceError;
use crate::queries::pricing::count_prices;

fn insert_price(conn: &mut SqliteConnection, entry: &PriceEntry) -> Result<(), PersistenceError> {
    let nodes_count: i32 = i32::try_from(entry.nodes_count).map_err(|_| {
        PersistenceError::QueryFailed(format!(
            "Node count {} does not fit the pricing table",
            entry.nodes_count
        ))
    })?;

    diesel::insert_into(node_pricing::table)
        .values((
            node_pricing::nodes_count.eq(nodes_count),
            node_pricing::price_usd.eq(entry.price_usd.to_string()),
        ))
        .execute(conn)?;

    Ok(())
}

/// Inserts the default price table if no prices are stored yet.
///
/// # Returns
///
/// The number of rows inserted; zero if prices already existed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn seed_default_pricing(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let existing: i64 = count_prices(conn)?;
        if existing > 0 {
            info!(existing, "Node pricing already seeded");
            return Ok(0);
        }

        let entries: Vec<PriceEntry> = default_price_entries();
        for entry in &entries {
            insert_price(conn, entry)?;
        }

        info!(inserted = entries.len(), "Seeded default node pricing");
        Ok(entries.len())
    })
}

/// Replaces the whole price table with `entries`.
///
/// Runs in one transaction; on failure the previous prices are kept.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entries` - The new price table
///
/// # Errors
///
/// Returns an error if the database operation fails or two entries share a
/// node count.
pub fn reseed_pricing(
    conn: &mut SqliteConnection,
    entries: &[PriceEntry],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = diesel::delete(node_pricing::table).execute(conn)?;

        for entry in entries {
            insert_price(conn, entry)?;
        }

        info!(removed, inserted = entries.len(), "Reseeded node pricing");
        Ok(entries.len())
    })
}
