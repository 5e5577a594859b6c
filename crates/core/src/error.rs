// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hpc_config_domain::DomainError;

/// Errors that can occur during wizard transitions and collaborator calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Wizard data could not be serialized or parsed.
    Serialization(String),
    /// The durable snapshot store rejected a read or write.
    SnapshotStore(String),
    /// A remote collaborator (pricing, persistence) failed.
    Collaborator {
        /// Which collaborator failed.
        collaborator: &'static str,
        /// What went wrong.
        message: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::SnapshotStore(msg) => write!(f, "Snapshot store error: {msg}"),
            Self::Collaborator {
                collaborator,
                message,
            } => write!(f, "{collaborator} failed: {message}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
