//! Change plan orchestration
//!
//! Lifecycle:
//!
//! ```text
//! pending -> in_progress -> completed
//!                 |
//!                 v
//!              failed
//! pending | in_progress | failed --rollback--> rolled_back
//! ```
//!
//! In progress, steps run strictly in order: analysis, backup, preparation,
//! execution, validation, cleanup. `completed` and `rolled_back` are terminal.

use super::executor::{ActionPhase, ChangeExecutor, DryRunExecutor, PlanAction};
use super::store::PlanStore;
use super::templates::{plan_content, step_actions};
use super::validator;
use crate::core::impact::ImpactPredictor;
use crate::core::project::ProjectAnalyzer;
use crate::error::{Result, RippleError};
use crate::models::config::Settings;
use crate::models::dependency_graph::DependencyGraph;
use crate::models::plan::{ChangePlan, ChangeType, PlanStatus};
use crate::models::validation::ValidationResult;
use crate::utils::path_resolver::{normalize_path, path_key};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Creates, executes and rolls back change plans held in a [`PlanStore`]
pub struct ChangePlanner {
    settings: Settings,
    store: Arc<PlanStore>,
    executor: Arc<dyn ChangeExecutor>,
}

impl ChangePlanner {
    /// Planner over `store` that performs actions as a dry run
    pub fn new(settings: Settings, store: Arc<PlanStore>) -> Self {
        Self {
            settings,
            store,
            executor: Arc::new(DryRunExecutor),
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn ChangeExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn store(&self) -> &Arc<PlanStore> {
        &self.store
    }

    /// Analyze the tree afresh and plan a change to `path`
    pub fn create_change_plan(&self, path: &str, change_type: ChangeType, description: &str) -> Result<ChangePlan> {
        let run = ProjectAnalyzer::new(self.settings.clone()).analyze()?;
        self.create_change_plan_with_graph(&run.graph, path, change_type, description)
    }

    /// Plan a change to `path` against an already built graph
    ///
    /// Fails with `NotFound` and registers nothing when `path` is not a node.
    pub fn create_change_plan_with_graph(
        &self,
        graph: &DependencyGraph,
        path: &str,
        change_type: ChangeType,
        description: &str,
    ) -> Result<ChangePlan> {
        let key = normalize_path(path);
        let record = graph.get(&key).ok_or_else(|| RippleError::not_found(key.clone()))?;

        let impacts = ImpactPredictor::predict(&key, change_type.impact_kind(), graph);
        let content = plan_content(change_type, record, graph.relative_path(&key), &impacts);

        let mut snapshot = record.clone();
        snapshot.change_impacts = impacts.clone();

        let plan = ChangePlan::new(
            Uuid::new_v4().to_string(),
            change_type,
            description,
            snapshot,
            impacts,
            content,
        );

        info!(
            plan = %plan.id,
            path = %key,
            change = %change_type,
            risk = %plan.risk_level(),
            affected = plan.affected_files().len(),
            "change plan created"
        );
        if plan.requires_review() {
            warn!(plan = %plan.id, "plan targets a {} risk file and needs review", plan.risk_level());
        }

        self.store.insert(plan.clone());
        Ok(plan)
    }

    /// Run the current step and advance by one
    ///
    /// The first call moves a pending plan to in_progress. Completing cleanup
    /// completes the plan. A failing action marks the plan failed, keeps the
    /// current step, and returns `PlanStep`.
    pub fn execute_change_plan(&self, id: &str) -> Result<ChangePlan> {
        let handle = self.store.handle(id)?;
        let mut plan = handle.lock();

        match plan.status {
            PlanStatus::Pending | PlanStatus::InProgress => {}
            status => return Err(invalid_transition(id, "execute", status)),
        }

        plan.status = PlanStatus::InProgress;
        let step = plan.current_step;

        for description in step_actions(&plan, step) {
            let action = PlanAction {
                plan_id: plan.id.clone(),
                file_path: plan.file_path.clone(),
                phase: ActionPhase::Step(step),
                description,
            };

            if let Err(err) = self.executor.perform(&action) {
                let message = err.to_string();
                warn!(plan = %id, step = %step, "step failed: {}", message);
                plan.status = PlanStatus::Failed;
                plan.failure = Some(message.clone());
                plan.touch();
                return Err(RippleError::PlanStep {
                    id: id.to_string(),
                    step: step.to_string(),
                    message,
                });
            }
        }

        match step.next() {
            Some(next) => {
                plan.current_step = next;
                debug!(plan = %id, from = %step, to = %next, "step complete");
            }
            None => {
                plan.status = PlanStatus::Completed;
                info!(plan = %id, "change plan completed");
            }
        }
        plan.touch();

        Ok(plan.clone())
    }

    /// Run steps until the plan completes or a step fails
    pub fn execute_to_completion(&self, id: &str) -> Result<ChangePlan> {
        loop {
            let plan = self.execute_change_plan(id)?;
            if plan.status.is_terminal() {
                return Ok(plan);
            }
        }
    }

    /// Perform the plan's rollback actions in order, then mark it rolled back
    ///
    /// Rejected from `completed` and `rolled_back`. A failing action leaves
    /// the plan failed.
    pub fn rollback_change_plan(&self, id: &str) -> Result<ChangePlan> {
        let handle = self.store.handle(id)?;
        let mut plan = handle.lock();

        if plan.status.is_terminal() {
            return Err(invalid_transition(id, "roll back", plan.status));
        }

        for description in plan.rollback_plan.clone() {
            let action = PlanAction {
                plan_id: plan.id.clone(),
                file_path: plan.file_path.clone(),
                phase: ActionPhase::Rollback,
                description,
            };

            if let Err(err) = self.executor.perform(&action) {
                let message = err.to_string();
                warn!(plan = %id, "rollback failed: {}", message);
                plan.status = PlanStatus::Failed;
                plan.failure = Some(message.clone());
                plan.touch();
                return Err(RippleError::PlanStep {
                    id: id.to_string(),
                    step: "rollback".to_string(),
                    message,
                });
            }
        }

        info!(plan = %id, from = %plan.current_step, "change plan rolled back");
        plan.status = PlanStatus::RolledBack;
        plan.touch();

        Ok(plan.clone())
    }

    pub fn get_plan(&self, id: &str) -> Option<ChangePlan> {
        self.store.get(id)
    }

    pub fn list_plans(&self) -> Vec<ChangePlan> {
        self.store.list()
    }

    /// Stateless content check; independent of any plan
    pub fn validate_change(&self, path: &str, change_type: ChangeType, content: &str) -> ValidationResult {
        let root = path_key(&self.settings.scan_path);
        validator::validate_change_under(&root, &normalize_path(path), change_type, content)
    }
}

fn invalid_transition(id: &str, operation: &str, status: PlanStatus) -> RippleError {
    RippleError::InvalidTransition {
        id: id.to_string(),
        operation: operation.to_string(),
        status: status.to_string(),
    }
}
