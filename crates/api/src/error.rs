// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hpc_config::CoreError;
use hpc_config_domain::DomainError;
use hpc_config_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A service was used before it was ready.
    ServiceUnavailable {
        /// The service that is not ready.
        service: String,
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ServiceUnavailable { service, message } => {
                write!(f, "{service} unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConfigurationNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Configuration"),
                message: format!("Configuration with ID {id} not found"),
            },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::PriceNotConfigured { .. } => ApiError::InvalidInput {
            field: String::from("nodes_count"),
            message: err.to_string(),
        },
        DomainError::InvalidStepNumber(_) => ApiError::InvalidInput {
            field: String::from("step"),
            message: err.to_string(),
        },
        DomainError::UnknownCatalogItem { catalog, .. } => ApiError::InvalidInput {
            field: catalog.to_string(),
            message: err.to_string(),
        },
        DomainError::UnsupportedExportFormat(_) => ApiError::InvalidInput {
            field: String::from("format"),
            message: err.to_string(),
        },
        DomainError::ConfigurationNotGenerated(_) => ApiError::InvalidInput {
            field: String::from("is_generated"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
