// File: src/submit.rs
// Purpose: Submit protocol: Idle -> AllTouched -> (Accepted | Rejected) -> Idle

use crate::config::FormConfig;
use crate::control::ControlId;
use crate::form::Form;
use crate::registry::ValidatorRegistry;
use crate::snapshot::{self, FormSnapshot};
use crate::touched;

/// Where a submit attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// Every control marked touched so hidden errors show
    AllTouched,
    Accepted,
    Rejected,
}

impl SubmitPhase {
    pub fn can_transition(self, to: SubmitPhase) -> bool {
        use SubmitPhase::{Accepted, AllTouched, Idle, Rejected};
        matches!(
            (self, to),
            (Idle, AllTouched)
                | (AllTouched, Accepted)
                | (AllTouched, Rejected)
                | (Accepted, Idle)
                | (Rejected, Idle)
        )
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form passed validation; `snapshot` is taken after touched flags are cleared
    Accepted { snapshot: FormSnapshot },
    /// Submission suppressed; touched flags stay so errors remain visible
    Rejected {
        snapshot: FormSnapshot,
        /// The control a host should focus
        first_invalid: ControlId,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        match self {
            Self::Accepted { snapshot } | Self::Rejected { snapshot, .. } => snapshot,
        }
    }

    pub fn into_snapshot(self) -> FormSnapshot {
        match self {
            Self::Accepted { snapshot } | Self::Rejected { snapshot, .. } => snapshot,
        }
    }
}

/// Drives the submit state machine for one form
#[derive(Debug, Default)]
pub struct SubmitMachine {
    phase: SubmitPhase,
    history: Vec<SubmitPhase>,
}

impl SubmitMachine {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Phases entered during the most recent attempt
    pub fn last_path(&self) -> &[SubmitPhase] {
        &self.history
    }

    fn enter(&mut self, to: SubmitPhase) {
        debug_assert!(
            self.phase.can_transition(to),
            "illegal submit transition {:?} -> {:?}",
            self.phase,
            to
        );
        tracing::debug!(from = ?self.phase, to = ?to, "submit phase");
        self.phase = to;
        self.history.push(to);
    }

    /// One full submit attempt; always ends back in `Idle`
    pub fn attempt(
        &mut self,
        form: &mut Form,
        registry: &ValidatorRegistry,
        config: &FormConfig,
    ) -> SubmitOutcome {
        self.history.clear();

        registry.run_all(form);
        touched::mark_all_touched(form);
        self.enter(SubmitPhase::AllTouched);

        let outcome = match form.first_invalid() {
            Some(first_invalid) => {
                self.enter(SubmitPhase::Rejected);
                SubmitOutcome::Rejected {
                    snapshot: snapshot::build(form, config.scope),
                    first_invalid,
                }
            }
            None => {
                self.enter(SubmitPhase::Accepted);
                if config.reset_on_accept {
                    form.reset();
                    registry.run_all(form);
                } else if config.clear_touched_on_accept {
                    touched::clear_all_touched(form);
                }
                SubmitOutcome::Accepted {
                    snapshot: snapshot::build(form, config.scope),
                }
            }
        };

        self.enter(SubmitPhase::Idle);
        outcome
    }
}
