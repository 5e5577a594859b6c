// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Node pricing queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hpc_config_domain::{Decimal, PriceEntry};
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::node_pricing;
use crate::error::PersistenceError;

/// Diesel Queryable struct for pricing rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = node_pricing)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct NodePricingRow {
    nodes_count: i32,
    price_usd: String,
}

impl TryFrom<NodePricingRow> for PriceEntry {
    type Error = PersistenceError;

    fn try_from(row: NodePricingRow) -> Result<Self, Self::Error> {
        let invalid = || PersistenceError::InvalidStoredPrice {
            nodes_count: row.nodes_count,
            value: row.price_usd.clone(),
        };

        let nodes_count: u32 = u32::try_from(row.nodes_count).map_err(|_| invalid())?;
        let price_usd: Decimal = Decimal::from_str(&row.price_usd).map_err(|_| invalid())?;

        Ok(Self {
            nodes_count,
            price_usd,
        })
    }
}

/// Lists all prices ordered by node count.
///
/// # Errors
///
/// Returns an error if the query fails or a stored price is not a decimal.
pub fn list_prices(conn: &mut SqliteConnection) -> Result<Vec<PriceEntry>, PersistenceError> {
    let rows: Vec<NodePricingRow> = node_pricing::table
        .select(NodePricingRow::as_select())
        .order(node_pricing::nodes_count.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded node pricing rows");

    rows.into_iter().map(PriceEntry::try_from).collect()
}

/// Retrieves the price for exactly `nodes_count` nodes.
///
/// # Errors
///
/// Returns an error if the query fails or the stored price is not a decimal.
/// Returns `Ok(None)` if no price is stored for this count.
pub fn get_price(
    conn: &mut SqliteConnection,
    nodes_count: u32,
) -> Result<Option<PriceEntry>, PersistenceError> {
    let Ok(key) = i32::try_from(nodes_count) else {
        return Ok(None);
    };

    let result: Result<NodePricingRow, diesel::result::Error> = node_pricing::table
        .filter(node_pricing::nodes_count.eq(key))
        .select(NodePricingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(PriceEntry::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts the stored prices.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_prices(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(node_pricing::table.count().get_result(conn)?)
}
