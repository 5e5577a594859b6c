// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_filled_state, create_test_power, create_test_storage, create_test_system,
};
use crate::{
    Command, CoreError, FIRST_STEP, REVIEW_STEP, StepData, TransitionResult, WizardEvent,
    WizardState, apply,
};
use hpc_config_domain::SystemSelection;

#[test]
fn test_new_state_is_empty() {
    let state: WizardState = WizardState::new();

    assert!(state.step1.is_none());
    assert!(state.step2.is_none());
    assert!(state.step3.is_none());
    assert_eq!(state.current_step, FIRST_STEP);
    assert_eq!(state.active_step, FIRST_STEP);
    assert!(!state.is_complete);
    assert!(state.last_generated_hash.is_none());
}

#[test]
fn test_update_step_advances_current_step() {
    let state: WizardState = WizardState::new();
    let command: Command = Command::UpdateStep(StepData::System(create_test_system(8)));

    let result: Result<TransitionResult, CoreError> = apply(&state, command);

    assert!(result.is_ok());
    let transition: TransitionResult = result.unwrap();
    assert_eq!(transition.new_state.current_step, 2);
    assert_eq!(transition.new_state.active_step, 2);
    assert_eq!(transition.new_state.step1.as_ref().unwrap().total_racks, 2);
    assert_eq!(
        transition.event,
        WizardEvent::StepUpdated {
            step: 1,
            current_step: 2
        }
    );
}

#[test]
fn test_update_step_does_not_modify_input_state() {
    let state: WizardState = WizardState::new();

    let _ = apply(
        &state,
        Command::UpdateStep(StepData::System(create_test_system(4))),
    )
    .unwrap();

    assert_eq!(state, WizardState::new());
}

#[test]
fn test_current_step_never_decreases_on_update() {
    let state: WizardState = create_filled_state(4);
    assert_eq!(state.current_step, REVIEW_STEP);

    let transition: TransitionResult = apply(
        &state,
        Command::UpdateStep(StepData::System(create_test_system(8))),
    )
    .unwrap();

    assert_eq!(transition.new_state.current_step, REVIEW_STEP);
    assert_eq!(transition.new_state.active_step, 2);
}

#[test]
fn test_storage_update_caps_at_review_step() {
    let state: WizardState = create_filled_state(4);

    let transition: TransitionResult = apply(
        &state,
        Command::UpdateStep(StepData::Storage(create_test_storage())),
    )
    .unwrap();

    assert_eq!(transition.new_state.current_step, REVIEW_STEP);
    assert_eq!(transition.new_state.active_step, REVIEW_STEP);
}

#[test]
fn test_update_step_invalidates_generation() {
    let state: WizardState = create_filled_state(4);
    let generated: WizardState = apply(&state, Command::MarkGenerated).unwrap().new_state;
    assert!(generated.is_complete);
    assert!(!generated.has_changed());

    let system: SystemSelection = create_test_system(4);
    let updated: WizardState = apply(
        &generated,
        Command::UpdateStep(StepData::Power(create_test_power(&system))),
    )
    .unwrap()
    .new_state;

    assert!(!updated.is_complete);
    assert!(updated.last_generated_hash.is_none());
    assert!(updated.has_changed());
}

#[test]
fn test_has_changed_true_without_stored_hash() {
    assert!(WizardState::new().has_changed());
    assert!(create_filled_state(16).has_changed());
}

#[test]
fn test_mark_generated_then_has_changed_is_false() {
    let state: WizardState = create_filled_state(8);

    let transition: TransitionResult = apply(&state, Command::MarkGenerated).unwrap();

    assert!(!transition.new_state.has_changed());
    assert!(transition.new_state.is_complete);
    let hash: String = transition.new_state.last_generated_hash.clone().unwrap();
    assert_eq!(transition.event, WizardEvent::Generated { hash });
}

#[test]
fn test_has_changed_detects_edit_of_stored_selection() {
    let state: WizardState = create_filled_state(8);
    let mut generated: WizardState = apply(&state, Command::MarkGenerated).unwrap().new_state;

    // Bypass the commands to simulate a snapshot edited elsewhere.
    generated.step1 = Some(create_test_system(16));

    assert!(generated.has_changed());
}

#[test]
fn test_navigate_to_reached_step() {
    let state: WizardState = create_filled_state(4);

    let transition: TransitionResult = apply(&state, Command::NavigateTo { step: 1 }).unwrap();

    assert_eq!(transition.new_state.active_step, 1);
    assert_eq!(transition.new_state.current_step, REVIEW_STEP);
    assert_eq!(transition.event, WizardEvent::Navigated { from: 4, to: 1 });
}

#[test]
fn test_navigate_beyond_current_step_is_ignored() {
    let state: WizardState = apply(
        &WizardState::new(),
        Command::UpdateStep(StepData::System(create_test_system(4))),
    )
    .unwrap()
    .new_state;

    let transition: TransitionResult = apply(&state, Command::NavigateTo { step: 4 }).unwrap();

    assert_eq!(transition.new_state, state);
    assert_eq!(transition.new_state.current_step, 2);
    assert_eq!(
        transition.event,
        WizardEvent::NavigationIgnored {
            requested: 4,
            current_step: 2
        }
    );
}

#[test]
fn test_navigate_to_step_zero_is_ignored() {
    let state: WizardState = create_filled_state(4);

    let transition: TransitionResult = apply(&state, Command::NavigateTo { step: 0 }).unwrap();

    assert_eq!(transition.new_state, state);
}

#[test]
fn test_reset_restores_initial_state() {
    let state: WizardState = apply(&create_filled_state(32), Command::MarkGenerated)
        .unwrap()
        .new_state;

    let transition: TransitionResult = apply(&state, Command::Reset).unwrap();

    assert_eq!(transition.new_state, WizardState::new());
    assert_eq!(transition.new_state.current_step, 1);
    assert!(!transition.new_state.is_complete);
    assert!(transition.new_state.last_generated_hash.is_none());
    assert_eq!(transition.event, WizardEvent::Reset);
}

#[test]
fn test_step_data_numbers() {
    let system: SystemSelection = create_test_system(4);

    assert_eq!(StepData::System(system.clone()).step_number(), 1);
    assert_eq!(StepData::Power(create_test_power(&system)).step_number(), 2);
    assert_eq!(StepData::Storage(create_test_storage()).step_number(), 3);
}
