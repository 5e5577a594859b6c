// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::event::WizardEvent;
use crate::hasher::configuration_hash;
use hpc_config_domain::{DomainError, PowerSelection, StorageSelection, SystemSelection};
use serde::{Deserialize, Serialize};

/// The first wizard step.
pub const FIRST_STEP: u8 = 1;

/// The review step, reached once all three selection steps are filled.
pub const REVIEW_STEP: u8 = 4;

const fn first_step() -> u8 {
    FIRST_STEP
}

/// Accumulated wizard input for one session.
///
/// `current_step` is the furthest step reached and only grows until a reset.
/// `active_step` is the step being shown and may move back to any reached step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    /// Step 1 payload.
    pub step1: Option<SystemSelection>,
    /// Step 2 payload.
    pub step2: Option<PowerSelection>,
    /// Step 3 payload.
    pub step3: Option<StorageSelection>,
    /// Furthest reached step, in `1..=4`.
    pub current_step: u8,
    /// Step currently shown, never beyond `current_step`.
    #[serde(default = "first_step")]
    pub active_step: u8,
    /// Set when the configuration was generated and not changed since.
    pub is_complete: bool,
    /// Hash of the selections at the last generation.
    pub last_generated_hash: Option<String>,
}

impl WizardState {
    /// Creates the initial empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step1: None,
            step2: None,
            step3: None,
            current_step: FIRST_STEP,
            active_step: FIRST_STEP,
            is_complete: false,
            last_generated_hash: None,
        }
    }

    /// Whether the selections differ from the last generated configuration.
    ///
    /// True when nothing was generated yet, or when the hash of the current
    /// selections differs from the stored one. A hash that cannot be
    /// computed counts as a change.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.last_generated_hash.as_ref().is_none_or(|stored| {
            !matches!(
                configuration_hash(self.step1.as_ref(), self.step2.as_ref(), self.step3.as_ref()),
                Ok(hash) if &hash == stored
            )
        })
    }

    /// Whether `step` has been reached and may be shown.
    #[must_use]
    pub const fn can_navigate_to(&self, step: u8) -> bool {
        step >= FIRST_STEP && step <= self.current_step
    }

    /// Whether all three selection steps are filled.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.step1.is_some() && self.step2.is_some() && self.step3.is_some()
    }

    /// Serializes the state for the durable snapshot store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot written by [`WizardState::to_snapshot`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is not valid JSON for this schema or
    /// its step pointers are out of range.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, CoreError> {
        let state: Self = serde_json::from_str(snapshot)?;

        if !(FIRST_STEP..=REVIEW_STEP).contains(&state.current_step) {
            return Err(CoreError::DomainViolation(DomainError::InvalidStepNumber(
                state.current_step,
            )));
        }
        if !state.can_navigate_to(state.active_step) {
            return Err(CoreError::DomainViolation(DomainError::InvalidStepNumber(
                state.active_step,
            )));
        }

        Ok(state)
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a transition.
///
/// Transitions never modify the input state; they return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The state after the transition.
    pub new_state: WizardState,
    /// What the transition did.
    pub event: WizardEvent,
}
