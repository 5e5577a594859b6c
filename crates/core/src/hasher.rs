// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change detection for wizard selections.
//!
//! The hash is a 32-bit rolling hash over canonical JSON. It detects that the
//! selections changed since the last generation. It is not cryptographic and
//! must not be used for integrity checks; collisions are possible and accepted.

use crate::error::CoreError;
use hpc_config_domain::{PowerSelection, StorageSelection, SystemSelection};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct HashInput<'a> {
    step1: Option<&'a SystemSelection>,
    step2: Option<&'a PowerSelection>,
    step3: Option<&'a StorageSelection>,
}

/// Renders a JSON value with object keys in sorted order and no whitespace.
#[must_use]
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(to_canonical_json).collect();
            format!("[{}]", rendered.join(","))
        }
        Value::Object(map) => {
            let sorted: BTreeMap<&String, String> = map
                .iter()
                .map(|(key, item)| (key, to_canonical_json(item)))
                .collect();
            let rendered: Vec<String> = sorted
                .into_iter()
                .map(|(key, item)| format!("{}:{item}", Value::String(key.clone())))
                .collect();
            format!("{{{}}}", rendered.join(","))
        }
    }
}

/// `h = h * 31 + c` over UTF-16 code units with wrapping signed 32-bit arithmetic.
#[must_use]
pub fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Computes the change-detection hash of the three step payloads.
///
/// Absent steps hash as `null`, so an empty wizard has a stable hash too.
///
/// # Errors
///
/// Returns an error if the selections cannot be serialized.
pub fn configuration_hash(
    step1: Option<&SystemSelection>,
    step2: Option<&PowerSelection>,
    step3: Option<&StorageSelection>,
) -> Result<String, CoreError> {
    let value: Value = serde_json::to_value(HashInput {
        step1,
        step2,
        step3,
    })?;

    Ok(rolling_hash(&to_canonical_json(&value)).to_string())
}
