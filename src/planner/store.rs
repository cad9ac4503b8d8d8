//! Registry of change plans keyed by id

use crate::error::{Result, RippleError};
use crate::models::plan::ChangePlan;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle to one plan; holding the lock serializes its transitions
pub type PlanHandle = Arc<Mutex<ChangePlan>>;

/// Explicit plan registry, shared by `Arc` between planners of one session
///
/// Each plan sits behind its own mutex, so transitions on one id are
/// serialized while distinct ids never contend.
#[derive(Debug, Default)]
pub struct PlanStore {
    plans: DashMap<String, PlanHandle>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a plan, returning its handle
    pub fn insert(&self, plan: ChangePlan) -> PlanHandle {
        let id = plan.id.clone();
        let handle = Arc::new(Mutex::new(plan));
        self.plans.insert(id, Arc::clone(&handle));
        handle
    }

    pub fn handle(&self, id: &str) -> Result<PlanHandle> {
        self.plans
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RippleError::PlanNotFound { id: id.to_string() })
    }

    /// Snapshot of a plan
    pub fn get(&self, id: &str) -> Option<ChangePlan> {
        // Clone the handle first so the map shard is not held while locking
        let handle = self.plans.get(id).map(|entry| Arc::clone(entry.value()))?;
        let plan = handle.lock().clone();
        Some(plan)
    }

    /// Snapshots of every plan, oldest first
    pub fn list(&self) -> Vec<ChangePlan> {
        let handles: Vec<PlanHandle> = self
            .plans
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut plans: Vec<ChangePlan> = handles.iter().map(|h| h.lock().clone()).collect();
        plans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        plans
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plans.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
