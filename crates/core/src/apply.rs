// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, StepData};
use crate::error::CoreError;
use crate::event::WizardEvent;
use crate::hasher::configuration_hash;
use crate::state::{REVIEW_STEP, TransitionResult, WizardState};

/// Applies a command to the wizard state, producing a new state and an event.
///
/// The input state is never modified.
///
/// # Arguments
///
/// * `state` - The current wizard state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and the event
/// * `Err(CoreError)` if the selections could not be hashed
///
/// # Errors
///
/// Returns an error if `MarkGenerated` cannot serialize the selections.
/// Navigation to an unreached step is not an error; it yields an unchanged
/// state and a `NavigationIgnored` event.
pub fn apply(state: &WizardState, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::UpdateStep(data) => {
            let step: u8 = data.step_number();
            let next_step: u8 = (step + 1).min(REVIEW_STEP);

            let mut new_state: WizardState = state.clone();
            match data {
                StepData::System(system) => new_state.step1 = Some(system),
                StepData::Power(power) => new_state.step2 = Some(power),
                StepData::Storage(storage) => new_state.step3 = Some(storage),
            }
            new_state.current_step = state.current_step.max(next_step);
            new_state.active_step = next_step;
            new_state.is_complete = false;
            new_state.last_generated_hash = None;

            let event: WizardEvent = WizardEvent::StepUpdated {
                step,
                current_step: new_state.current_step,
            };

            Ok(TransitionResult { new_state, event })
        }
        Command::NavigateTo { step } => {
            if !state.can_navigate_to(step) {
                return Ok(TransitionResult {
                    new_state: state.clone(),
                    event: WizardEvent::NavigationIgnored {
                        requested: step,
                        current_step: state.current_step,
                    },
                });
            }

            let mut new_state: WizardState = state.clone();
            new_state.active_step = step;

            Ok(TransitionResult {
                new_state,
                event: WizardEvent::Navigated {
                    from: state.active_step,
                    to: step,
                },
            })
        }
        Command::MarkGenerated => {
            let hash: String =
                configuration_hash(state.step1.as_ref(), state.step2.as_ref(), state.step3.as_ref())?;

            let mut new_state: WizardState = state.clone();
            new_state.last_generated_hash = Some(hash.clone());
            new_state.is_complete = true;

            Ok(TransitionResult {
                new_state,
                event: WizardEvent::Generated { hash },
            })
        }
        Command::Reset => Ok(TransitionResult {
            new_state: WizardState::new(),
            event: WizardEvent::Reset,
        }),
    }
}
