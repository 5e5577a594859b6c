// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for HPC configurations.
//!
//! Stores the node price table and generated configurations in `SQLite`
//! through Diesel. The schema is created by embedded migrations when a
//! database is opened.
//!
//! ## Tables
//!
//! - `node_pricing`: one price per supported node count, stored as decimal text
//! - `configurations`: one row per saved configuration, keyed by a public
//!   `configuration_id`
//!
//! ## Testing
//!
//! Tests run against isolated in-memory databases created with
//! [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use hpc_config_domain::PriceEntry;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{SavedConfiguration, StoredConfiguration};
pub use error::PersistenceError;
pub use mutations::configurations::LOCAL_ID_PREFIX;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for node pricing and configurations.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_hpc_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Node Pricing
    // ========================================================================

    /// Inserts the default price table if no prices are stored.
    ///
    /// # Returns
    ///
    /// The number of rows inserted; zero if prices already existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn seed_default_pricing(&mut self) -> Result<usize, PersistenceError> {
        mutations::pricing::seed_default_pricing(&mut self.conn)
    }

    /// Replaces all stored prices with `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails. The previous prices
    /// are kept in that case.
    pub fn reseed_pricing(&mut self, entries: &[PriceEntry]) -> Result<usize, PersistenceError> {
        mutations::pricing::reseed_pricing(&mut self.conn, entries)
    }

    /// Lists all prices ordered by node count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored price is corrupt.
    pub fn list_prices(&mut self) -> Result<Vec<PriceEntry>, PersistenceError> {
        queries::pricing::list_prices(&mut self.conn)
    }

    /// Retrieves the price for exactly `nodes_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored price is corrupt.
    pub fn get_price(&mut self, nodes_count: u32) -> Result<Option<PriceEntry>, PersistenceError> {
        queries::pricing::get_price(&mut self.conn, nodes_count)
    }

    /// Counts the stored prices.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_prices(&mut self) -> Result<i64, PersistenceError> {
        queries::pricing::count_prices(&mut self.conn)
    }

    // ========================================================================
    // Configurations
    // ========================================================================

    /// Stores a configuration under a new `LOCAL-<epoch millis>` id.
    ///
    /// # Arguments
    ///
    /// * `configuration_data` - The configuration as a JSON document
    /// * `is_generated` - Whether the configuration was generated
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be stored.
    pub fn save_configuration(
        &mut self,
        configuration_data: &str,
        is_generated: bool,
    ) -> Result<SavedConfiguration, PersistenceError> {
        self.save_configuration_at(configuration_data, is_generated, OffsetDateTime::now_utc())
    }

    /// Like [`Persistence::save_configuration`] with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be stored.
    pub fn save_configuration_at(
        &mut self,
        configuration_data: &str,
        is_generated: bool,
        now: OffsetDateTime,
    ) -> Result<SavedConfiguration, PersistenceError> {
        mutations::configurations::save_configuration(
            &mut self.conn,
            configuration_data,
            is_generated,
            now,
        )
    }

    /// Inserts or replaces the configuration stored under `configuration_id`.
    ///
    /// # Returns
    ///
    /// The row id of the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be stored.
    pub fn upsert_configuration(
        &mut self,
        configuration_id: &str,
        configuration_data: &str,
        is_generated: bool,
    ) -> Result<i64, PersistenceError> {
        mutations::configurations::upsert_configuration(
            &mut self.conn,
            configuration_id,
            configuration_data,
            is_generated,
        )
    }

    /// Retrieves a configuration by row id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationNotFound` if no row has this id, or an error if
    /// the query fails.
    pub fn get_configuration(&mut self, id: i64) -> Result<StoredConfiguration, PersistenceError> {
        queries::configurations::get_configuration(&mut self.conn, id)?
            .ok_or(PersistenceError::ConfigurationNotFound(id))
    }

    /// Counts stored configurations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_configurations(&mut self) -> Result<i64, PersistenceError> {
        queries::configurations::count_configurations(&mut self.conn)
    }
}
