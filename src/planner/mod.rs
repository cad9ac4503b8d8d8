//! Safe change planning: plan creation, stepwise execution, rollback and
//! content validation

pub mod executor;
pub mod manager;
pub mod store;
pub mod templates;
pub mod validator;

pub use executor::{ActionPhase, ChangeExecutor, DryRunExecutor, PlanAction, RecordingExecutor};
pub use manager::ChangePlanner;
pub use store::{PlanHandle, PlanStore};
pub use validator::{validate_change, validate_change_under};
