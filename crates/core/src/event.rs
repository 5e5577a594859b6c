// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// What a single transition did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// A step payload was replaced.
    StepUpdated {
        /// The step that was replaced.
        step: u8,
        /// The furthest reachable step after the update.
        current_step: u8,
    },
    /// The active step changed.
    Navigated {
        /// The previously active step.
        from: u8,
        /// The newly active step.
        to: u8,
    },
    /// Navigation beyond the furthest reached step was ignored.
    NavigationIgnored {
        /// The step that was requested.
        requested: u8,
        /// The furthest reached step.
        current_step: u8,
    },
    /// The configuration hash was recorded.
    Generated {
        /// The recorded hash.
        hash: String,
    },
    /// The wizard returned to its initial state.
    Reset,
}

/// An event as delivered to session subscribers.
///
/// Sequence numbers start at 1 and follow the order the mutations were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Position in the session's mutation order.
    pub sequence: u64,
    /// The transition that happened.
    pub event: WizardEvent,
}
