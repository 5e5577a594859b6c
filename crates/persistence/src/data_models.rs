// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A configuration row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfiguration {
    /// Database row id.
    pub id: i64,
    /// Public identifier, e.g. `LOCAL-1767225600000`.
    pub configuration_id: Option<String>,
    /// The configuration as a JSON document.
    pub configuration_data: String,
    pub is_generated: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// The identifiers a newly saved configuration received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub id: i64,
    pub configuration_id: String,
}
