// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `pricing`: seeding and replacing the price table
//! - `configurations`: saving and upserting configurations
//!
//! Row ids come from `backend::sqlite::get_last_insert_rowid()`.

pub mod configurations;
pub mod pricing;
