// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hpc_config_domain::{PowerSelection, StorageSelection, SystemSelection};

/// The payload of one wizard step.
///
/// The variant determines which step is replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum StepData {
    /// Step 1: system type, deployment type and node count.
    System(SystemSelection),
    /// Step 2: power configuration and region.
    Power(PowerSelection),
    /// Step 3: storage protocol, vendor and support.
    Storage(StorageSelection),
}

impl StepData {
    /// The wizard step this payload belongs to.
    #[must_use]
    pub const fn step_number(&self) -> u8 {
        match self {
            Self::System(_) => 1,
            Self::Power(_) => 2,
            Self::Storage(_) => 3,
        }
    }
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request wizard state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the payload of one step.
    UpdateStep(StepData),
    /// Show a previously reached step. Ignored if the step was not reached.
    NavigateTo {
        /// The step to show.
        step: u8,
    },
    /// Record the content hash of the current selections.
    MarkGenerated,
    /// Return to the initial empty state.
    Reset,
}
