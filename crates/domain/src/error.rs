// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur when evaluating domain rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No price is configured for the requested node count.
    PriceNotConfigured {
        /// The node count that was looked up.
        nodes_count: u32,
        /// The node counts that do have a price, sorted ascending.
        available: Vec<u32>,
    },
    /// A wizard step number outside `1..=4`.
    InvalidStepNumber(u8),
    /// A catalog lookup did not match any option.
    UnknownCatalogItem {
        /// The catalog that was searched.
        catalog: &'static str,
        /// The identifier that was not found.
        id: String,
    },
    /// The requested export format is neither `json` nor `pdf`.
    UnsupportedExportFormat(String),
    /// A configuration must be generated before it can be exported.
    ConfigurationNotGenerated(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PriceNotConfigured {
                nodes_count,
                available,
            } => {
                write!(
                    f,
                    "Invalid node count: {nodes_count}. Available options: {available:?}"
                )
            }
            Self::InvalidStepNumber(step) => {
                write!(f, "Invalid wizard step: {step}. Must be between 1 and 4")
            }
            Self::UnknownCatalogItem { catalog, id } => {
                write!(f, "Unknown {catalog} option: '{id}'")
            }
            Self::UnsupportedExportFormat(format) => {
                write!(f, "Export format must be 'json' or 'pdf', got '{format}'")
            }
            Self::ConfigurationNotGenerated(id) => {
                write!(
                    f,
                    "Configuration {id} must be generated before export"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
