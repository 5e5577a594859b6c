// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod assembler;
mod backend;
mod command;
mod error;
mod event;
mod hasher;
mod session;
mod snapshot;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use assembler::{
    AssembledConfiguration, CONFIGURATION_VERSION, PricingSummary, assemble, format_timestamp,
};
pub use backend::{ConfigurationSink, PricingSource};
pub use command::{Command, StepData};
pub use error::CoreError;
pub use event::{SessionEvent, WizardEvent};
pub use hasher::{configuration_hash, rolling_hash, to_canonical_json};
pub use session::{GenerationOutcome, WizardSession};
pub use snapshot::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};
pub use state::{FIRST_STEP, REVIEW_STEP, TransitionResult, WizardState};
