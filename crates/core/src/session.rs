// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The owner of one wizard's state.
//!
//! A session applies commands, writes a snapshot after each mutation, and
//! publishes the resulting events to subscribers in mutation order.

use crate::apply::apply;
use crate::assembler::{AssembledConfiguration, assemble};
use crate::backend::{ConfigurationSink, PricingSource};
use crate::command::{Command, StepData};
use crate::error::CoreError;
use crate::event::{SessionEvent, WizardEvent};
use crate::snapshot::SnapshotStore;
use crate::state::{TransitionResult, WizardState};
use hpc_config_domain::PriceQuote;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What a generation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// The configuration that was assembled.
    pub configuration: AssembledConfiguration,
    /// The identifier assigned by the sink, if saving succeeded.
    pub configuration_id: Option<String>,
    /// Set when no price could be attached.
    pub price_unavailable: bool,
    /// Non-fatal problems to show to the user.
    pub warnings: Vec<String>,
}

/// A single-owner wizard session.
#[derive(Debug)]
pub struct WizardSession<S: SnapshotStore> {
    key: String,
    state: WizardState,
    store: S,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
    last_sequence: u64,
}

impl<S: SnapshotStore> WizardSession<S> {
    /// Starts a session with a fresh state, ignoring any stored snapshot.
    #[must_use]
    pub fn new(store: S, key: &str) -> Self {
        Self {
            key: key.to_string(),
            state: WizardState::new(),
            store,
            subscribers: Vec::new(),
            last_sequence: 0,
        }
    }

    /// Starts a session from the snapshot stored under `key`.
    ///
    /// A missing snapshot gives a fresh state. A snapshot that cannot be
    /// parsed is discarded with a warning and also gives a fresh state.
    #[must_use]
    pub fn restore(store: S, key: &str) -> Self {
        let mut session: Self = Self::new(store, key);

        if let Some(snapshot) = session.store.get(key) {
            match WizardState::from_snapshot(&snapshot) {
                Ok(state) => {
                    info!(
                        key,
                        current_step = state.current_step,
                        "Restored wizard snapshot"
                    );
                    session.state = state;
                }
                Err(err) => {
                    warn!(key, error = %err, "Discarding unreadable wizard snapshot");
                }
            }
        }

        session
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    /// The key snapshots are stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The snapshot store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Whether the selections changed since the last generation.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.state.has_changed()
    }

    /// Subscribes to session events.
    ///
    /// Only events of mutations applied after subscribing are delivered.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Replaces the payload of one step.
    ///
    /// # Errors
    ///
    /// Does not fail in practice; the signature is shared by all mutations.
    pub fn update_step(&mut self, data: StepData) -> Result<WizardState, CoreError> {
        self.execute(Command::UpdateStep(data))
    }

    /// Shows a previously reached step. Unreached steps are ignored.
    ///
    /// # Errors
    ///
    /// Does not fail in practice; the signature is shared by all mutations.
    pub fn navigate_to(&mut self, step: u8) -> Result<WizardState, CoreError> {
        self.execute(Command::NavigateTo { step })
    }

    /// Records the hash of the current selections.
    ///
    /// # Errors
    ///
    /// Returns an error if the selections cannot be serialized.
    pub fn mark_generated(&mut self) -> Result<WizardState, CoreError> {
        self.execute(Command::MarkGenerated)
    }

    /// Returns to the initial empty state.
    ///
    /// # Errors
    ///
    /// Does not fail in practice; the signature is shared by all mutations.
    pub fn reset(&mut self) -> Result<WizardState, CoreError> {
        self.execute(Command::Reset)
    }

    /// Prices, assembles and saves the configuration, then marks it generated.
    ///
    /// A missing price or a failed save is reported in the outcome's
    /// warnings; the configuration is still marked generated locally.
    ///
    /// # Arguments
    ///
    /// * `pricing` - Where prices come from
    /// * `sink` - Where the assembled configuration is saved
    /// * `now` - The generation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error only if the selections cannot be hashed.
    pub async fn generate<P, C>(
        &mut self,
        pricing: &P,
        sink: &C,
        now: OffsetDateTime,
    ) -> Result<GenerationOutcome, CoreError>
    where
        P: PricingSource,
        C: ConfigurationSink,
    {
        let mut warnings: Vec<String> = Vec::new();

        let quote: Option<PriceQuote> = match self.state.step1.as_ref() {
            Some(system) => match pricing.price(system.selected_nodes).await {
                Ok(quote) => Some(quote),
                Err(err) => {
                    warn!(
                        nodes_count = system.selected_nodes,
                        error = %err,
                        "Price not available"
                    );
                    warnings.push(format!("Price not available: {err}"));
                    None
                }
            },
            None => {
                warnings.push(String::from(
                    "Price not available: no system selection",
                ));
                None
            }
        };

        let configuration: AssembledConfiguration = assemble(&self.state, quote.as_ref(), now);

        let configuration_id: Option<String> = match sink.save_configuration(&configuration).await
        {
            Ok(id) => {
                info!(configuration_id = %id, "Configuration saved");
                Some(id)
            }
            Err(err) => {
                warn!(error = %err, "Backend sync failed, keeping configuration locally");
                warnings.push(format!("Backend sync failed: {err}"));
                None
            }
        };

        self.mark_generated()?;

        Ok(GenerationOutcome {
            configuration,
            configuration_id,
            price_unavailable: quote.is_none(),
            warnings,
        })
    }

    fn execute(&mut self, command: Command) -> Result<WizardState, CoreError> {
        let result: TransitionResult = apply(&self.state, command)?;
        self.state = result.new_state;
        self.persist_snapshot();
        self.publish(result.event);
        Ok(self.state.clone())
    }

    /// Snapshot failures are logged; the in-memory state stays authoritative.
    fn persist_snapshot(&mut self) {
        let written: Result<(), CoreError> = self
            .state
            .to_snapshot()
            .and_then(|snapshot| self.store.set(&self.key, snapshot));

        if let Err(err) = written {
            warn!(key = %self.key, error = %err, "Failed to persist wizard snapshot");
        }
    }

    fn publish(&mut self, event: WizardEvent) {
        self.last_sequence += 1;
        let session_event: SessionEvent = SessionEvent {
            sequence: self.last_sequence,
            event,
        };
        debug!(?session_event, "Publishing wizard event");

        self.subscribers
            .retain(|subscriber| subscriber.send(session_event.clone()).is_ok());
    }
}
