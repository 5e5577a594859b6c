// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Configuration mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::SavedConfiguration;
use crate::diesel_schema::configurations;
use crate::error::PersistenceError;
use crate::queries::configurations::find_configuration_row_id;

/// Prefix of configuration ids assigned by this service.
pub const LOCAL_ID_PREFIX: &str = "LOCAL-";

/// Picks `LOCAL-<epoch millis>`, stepping forward one millisecond while the
/// id is already taken.
fn next_local_configuration_id(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<String, PersistenceError> {
    let mut millis: i128 = now.unix_timestamp_nanos() / 1_000_000;

    loop {
        let candidate: String = format!("{LOCAL_ID_PREFIX}{millis}");
        if find_configuration_row_id(conn, &candidate)?.is_none() {
            return Ok(candidate);
        }
        debug!(candidate = %candidate, "Configuration id taken, stepping forward");
        millis += 1;
    }
}

/// Stores a new configuration under a fresh local id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `configuration_data` - The configuration as a JSON document
/// * `is_generated` - Whether the configuration was generated
/// * `now` - The time the id is derived from
///
/// # Errors
///
/// Returns an error if the configuration cannot be stored.
pub fn save_configuration(
    conn: &mut SqliteConnection,
    configuration_data: &str,
    is_generated: bool,
    now: OffsetDateTime,
) -> Result<SavedConfiguration, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let configuration_id: String = next_local_configuration_id(conn, now)?;

        diesel::insert_into(configurations::table)
            .values((
                configurations::configuration_id.eq(configuration_id.as_str()),
                configurations::configuration_data.eq(configuration_data),
                configurations::is_generated.eq(i32::from(is_generated)),
            ))
            .execute(conn)?;

        let id: i64 = get_last_insert_rowid(conn)?;

        info!(id, configuration_id = %configuration_id, "Configuration saved");

        Ok(SavedConfiguration {
            id,
            configuration_id,
        })
    })
}

/// Inserts or replaces the configuration stored under `configuration_id`.
///
/// At most one row exists per configuration id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `configuration_id` - The public configuration id
/// * `configuration_data` - The configuration as a JSON document
/// * `is_generated` - Whether the configuration was generated
///
/// # Returns
///
/// The row id of the inserted or updated row.
///
/// # Errors
///
/// Returns an error if the configuration cannot be stored.
pub fn upsert_configuration(
    conn: &mut SqliteConnection,
    configuration_id: &str,
    configuration_data: &str,
    is_generated: bool,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let generated_flag: i32 = i32::from(is_generated);

        if let Some(id) = find_configuration_row_id(conn, configuration_id)? {
            diesel::update(configurations::table)
                .filter(configurations::id.eq(id))
                .set((
                    configurations::configuration_data.eq(configuration_data),
                    configurations::is_generated.eq(generated_flag),
                    configurations::updated_at.eq(diesel::dsl::sql::<
                        diesel::sql_types::Nullable<diesel::sql_types::Text>,
                    >("CURRENT_TIMESTAMP")),
                ))
                .execute(conn)?;

            info!(id, configuration_id, "Configuration updated");
            return Ok(id);
        }

        diesel::insert_into(configurations::table)
            .values((
                configurations::configuration_id.eq(configuration_id),
                configurations::configuration_data.eq(configuration_data),
                configurations::is_generated.eq(generated_flag),
            ))
            .execute(conn)?;

        let id: i64 = get_last_insert_rowid(conn)?;
        info!(id, configuration_id, "Configuration inserted");
        Ok(id)
    })
}
