//! Boundary to the service that actually mutates files
//!
//! Plans only describe work as text. Step handlers and rollback hand each
//! action to a [`ChangeExecutor`]; what "performing" means is up to the
//! implementation.

use crate::error::{Result, RippleError};
use crate::models::plan::PlanStep;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Where in a plan's lifecycle an action was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPhase {
    Step(PlanStep),
    Rollback,
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionPhase::Step(step) => write!(f, "{}", step),
            ActionPhase::Rollback => write!(f, "rollback"),
        }
    }
}

/// One textual action for the external service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAction {
    pub plan_id: String,
    pub file_path: String,
    pub phase: ActionPhase,
    pub description: String,
}

pub trait ChangeExecutor: Send + Sync {
    /// Perform one action; an error fails the surrounding step or rollback
    fn perform(&self, action: &PlanAction) -> Result<()>;
}

/// Logs every action and touches nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunExecutor;

impl ChangeExecutor for DryRunExecutor {
    fn perform(&self, action: &PlanAction) -> Result<()> {
        info!(
            plan = %action.plan_id,
            phase = %action.phase,
            file = %action.file_path,
            "dry run: {}",
            action.description
        );
        Ok(())
    }
}

/// Keeps every action in memory, optionally refusing one phase
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    actions: Mutex<Vec<PlanAction>>,
    fail_on: Option<ActionPhase>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor whose actions in `phase` fail without being recorded
    pub fn failing_at(phase: ActionPhase) -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
            fail_on: Some(phase),
        }
    }

    pub fn actions(&self) -> Vec<PlanAction> {
        self.actions.lock().clone()
    }

    pub fn phases(&self) -> Vec<ActionPhase> {
        self.actions.lock().iter().map(|a| a.phase).collect()
    }
}

impl ChangeExecutor for RecordingExecutor {
    fn perform(&self, action: &PlanAction) -> Result<()> {
        if self.fail_on == Some(action.phase) {
            return Err(RippleError::ActionFailed {
                action: action.description.clone(),
                message: format!("refused during {}", action.phase),
            });
        }
        self.actions.lock().push(action.clone());
        Ok(())
    }
}
