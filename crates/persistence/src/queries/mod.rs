// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `pricing`: node pricing lookups
//! - `configurations`: stored configuration lookups

pub mod configurations;
pub mod pricing;
