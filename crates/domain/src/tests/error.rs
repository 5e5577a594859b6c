// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_price_not_configured_lists_available_counts() {
    let err: DomainError = DomainError::PriceNotConfigured {
        nodes_count: 5,
        available: vec![4, 8],
    };

    assert_eq!(
        err.to_string(),
        "Invalid node count: 5. Available options: [4, 8]"
    );
}

#[test]
fn test_invalid_step_display() {
    let err: DomainError = DomainError::InvalidStepNumber(7);

    assert!(err.to_string().contains("Invalid wizard step: 7"));
}

#[test]
fn test_unsupported_export_format_display() {
    let err: DomainError = DomainError::UnsupportedExportFormat(String::from("xml"));

    assert_eq!(
        err.to_string(),
        "Export format must be 'json' or 'pdf', got 'xml'"
    );
}
