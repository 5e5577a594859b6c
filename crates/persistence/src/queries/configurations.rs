// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stored configuration queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::StoredConfiguration;
use crate::diesel_schema::configurations;
use crate::error::PersistenceError;

/// Diesel Queryable struct for configuration rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = configurations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ConfigurationRow {
    id: i64,
    configuration_id: Option<String>,
    configuration_data: String,
    is_generated: i32,
    created_at: String,
    updated_at: Option<String>,
}

impl From<ConfigurationRow> for StoredConfiguration {
    fn from(row: ConfigurationRow) -> Self {
        Self {
            id: row.id,
            configuration_id: row.configuration_id,
            configuration_data: row.configuration_data,
            is_generated: row.is_generated != 0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a configuration by row id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the configuration is not found.
pub fn get_configuration(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<StoredConfiguration>, PersistenceError> {
    debug!(id, "Looking up configuration");

    let result: Result<ConfigurationRow, diesel::result::Error> = configurations::table
        .filter(configurations::id.eq(id))
        .select(ConfigurationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the row id stored under a public configuration id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_configuration_row_id(
    conn: &mut SqliteConnection,
    configuration_id: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(configurations::table
        .filter(configurations::configuration_id.eq(configuration_id))
        .select(configurations::id)
        .first::<i64>(conn)
        .optional()?)
}

/// Counts stored configurations.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_configurations(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(configurations::table.count().get_result(conn)?)
}
