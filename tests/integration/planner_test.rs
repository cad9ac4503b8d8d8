//! Change plan lifecycle through the public API

use ripple::core::ProjectAnalyzer;
use ripple::error::RippleError;
use ripple::models::config::Settings;
use ripple::models::dependency_graph::DependencyGraph;
use ripple::core::ImpactPredictor;
use ripple::models::analysis::RiskLevel;
use ripple::models::impact::{ChangeKind, ImpactType, Severity};
use ripple::models::plan::{ChangeType, PlanStatus, PlanStep};
use ripple::planner::templates::step_actions;
use ripple::planner::{ActionPhase, ChangePlanner, PlanStore, RecordingExecutor};
use std::sync::Arc;
use std::thread;

fn chain() -> DependencyGraph {
    ProjectAnalyzer::new(Settings::default()).analyze_sources([
        ("src/a.ts", "export function foo() {}\n"),
        ("src/b.ts", "import { foo } from './a';\nexport const bar = foo;\n"),
        ("src/c.ts", "import { bar } from './b';\n"),
    ])
}

#[test]
fn test_chain_graph_and_impacts() {
    let graph = chain();

    assert_eq!(graph.dependents_of("src/a.ts"), ["src/b.ts".to_string()]);
    assert_eq!(graph.dependents_of("src/b.ts"), ["src/c.ts".to_string()]);
    assert_eq!(graph.dependencies_of("src/b.ts"), ["src/a.ts".to_string()]);
    assert_eq!(graph.dependencies_of("src/c.ts"), ["src/b.ts".to_string()]);
    assert_eq!(graph.get("src/a.ts").unwrap().risk_level, RiskLevel::Low);

    let deleted = ImpactPredictor::predict("src/a.ts", ChangeKind::Delete, &graph);
    assert_eq!(deleted.len(), 2);
    assert_eq!(deleted[0].affected_file, "src/b.ts");
    assert_eq!((deleted[0].impact_type, deleted[0].severity), (ImpactType::Breaking, Severity::Critical));
    assert_eq!(deleted[1].affected_file, "src/c.ts");
    assert_eq!((deleted[1].impact_type, deleted[1].severity), (ImpactType::Unknown, Severity::Low));

    for kind in [ChangeKind::Modify, ChangeKind::Rename] {
        let impacts = ImpactPredictor::predict("src/a.ts", kind, &graph);
        assert!(impacts.iter().all(|i| i.impact_type != ImpactType::Breaking));
    }
}

#[test]
fn test_scenario_chain_delete_plan() {
    let graph = chain();
    let planner = ChangePlanner::new(Settings::default(), PlanStore::shared());

    let plan = planner
        .create_change_plan_with_graph(&graph, "src/a.ts", ChangeType::Delete, "remove foo")
        .unwrap();

    assert_eq!(plan.status, PlanStatus::Pending);
    assert_eq!(plan.current_step, PlanStep::Analysis);
    assert_eq!(plan.affected_files(), ["src/b.ts".to_string(), "src/c.ts".to_string()]);
    assert_eq!(plan.impacts[0].impact_type, ImpactType::Breaking);
    assert_eq!(plan.impacts[0].severity, Severity::Critical);
    assert_eq!(plan.impacts[1].impact_type, ImpactType::Unknown);
    assert_eq!(plan.impacts[1].severity, Severity::Low);
    assert_eq!(plan.analysis.change_impacts, plan.impacts);
    assert!(plan.requires_review());
    assert!(!plan.rollback_plan.is_empty());
    assert!(!plan.validation_checks.is_empty());
}

#[test]
fn test_unknown_target_registers_nothing() {
    let store = PlanStore::shared();
    let planner = ChangePlanner::new(Settings::default(), Arc::clone(&store));
    let graph = chain();

    planner
        .create_change_plan_with_graph(&graph, "src/a.ts", ChangeType::Modify, "")
        .unwrap();
    let before = store.len();

    let result = planner.create_change_plan_with_graph(&graph, "src/missing.ts", ChangeType::Modify, "");

    assert!(matches!(result, Err(RippleError::NotFound { .. })));
    assert_eq!(store.len(), before);
}

#[test]
fn test_plan_walks_every_step_in_order() {
    let executor = Arc::new(RecordingExecutor::new());
    let planner = ChangePlanner::new(Settings::default(), PlanStore::shared()).with_executor(executor.clone());
    let plan = planner
        .create_change_plan_with_graph(&chain(), "src/b.ts", ChangeType::Rename, "rename b")
        .unwrap();

    let mut seen = Vec::new();
    loop {
        let before = planner.get_plan(&plan.id).unwrap().current_step;
        let after = planner.execute_change_plan(&plan.id).unwrap();
        seen.push(before);
        if after.status == PlanStatus::Completed {
            assert_eq!(after.current_step, PlanStep::Cleanup);
            break;
        }
        assert_eq!(after.status, PlanStatus::InProgress);
        assert_eq!(Some(after.current_step), before.next());
    }

    assert_eq!(seen, PlanStep::SEQUENCE.to_vec());

    // Phases reach the executor in step order
    let phases = executor.phases();
    let mut sorted = phases.clone();
    sorted.sort_by_key(|phase| match phase {
        ActionPhase::Step(step) => *step as usize,
        ActionPhase::Rollback => usize::MAX,
    });
    assert_eq!(phases, sorted);

    // Terminal plans do not move
    assert!(matches!(
        planner.execute_change_plan(&plan.id),
        Err(RippleError::InvalidTransition { .. })
    ));
    assert!(matches!(
        planner.rollback_change_plan(&plan.id),
        Err(RippleError::InvalidTransition { .. })
    ));
    assert_eq!(planner.get_plan(&plan.id).unwrap().status, PlanStatus::Completed);
}

#[test]
fn test_failed_step_then_rollback() {
    let executor = Arc::new(RecordingExecutor::failing_at(ActionPhase::Step(PlanStep::Execution)));
    let planner = ChangePlanner::new(Settings::default(), PlanStore::shared()).with_executor(executor.clone());
    let plan = planner
        .create_change_plan_with_graph(&chain(), "src/a.ts", ChangeType::Modify, "tweak foo")
        .unwrap();

    let err = planner.execute_to_completion(&plan.id).unwrap_err();
    match err {
        RippleError::PlanStep { step, .. } => assert_eq!(step, "execution"),
        other => panic!("unexpected error {:?}", other),
    }

    let failed = planner.get_plan(&plan.id).unwrap();
    assert_eq!(failed.status, PlanStatus::Failed);
    assert_eq!(failed.current_step, PlanStep::Execution);
    assert!(failed.failure.is_some());

    let rolled_back = planner.rollback_change_plan(&plan.id).unwrap();
    assert_eq!(rolled_back.status, PlanStatus::RolledBack);
    let rollback_actions = executor
        .phases()
        .into_iter()
        .filter(|phase| *phase == ActionPhase::Rollback)
        .count();
    assert_eq!(rollback_actions, rolled_back.rollback_plan.len());
}

#[test]
fn test_unknown_plan_id() {
    let planner = ChangePlanner::new(Settings::default(), PlanStore::shared());
    assert!(matches!(
        planner.execute_change_plan("no-such-plan"),
        Err(RippleError::PlanNotFound { .. })
    ));
    assert!(planner.get_plan("no-such-plan").is_none());
}

#[test]
fn test_independent_stores_do_not_share_plans() {
    let graph = chain();
    let first = ChangePlanner::new(Settings::default(), PlanStore::shared());
    let second = ChangePlanner::new(Settings::default(), PlanStore::shared());

    let plan = first
        .create_change_plan_with_graph(&graph, "src/a.ts", ChangeType::Modify, "")
        .unwrap();

    assert!(first.get_plan(&plan.id).is_some());
    assert!(second.get_plan(&plan.id).is_none());
    assert!(second.list_plans().is_empty());
}

#[test]
fn test_concurrent_plans_on_one_store() {
    let graph = Arc::new(chain());
    let store = PlanStore::shared();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let graph = Arc::clone(&graph);
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let planner = ChangePlanner::new(Settings::default(), store);
                let plan = planner
                    .create_change_plan_with_graph(&graph, "src/b.ts", ChangeType::Modify, &format!("edit {}", i))
                    .unwrap();
                planner.execute_to_completion(&plan.id).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().status, PlanStatus::Completed);
    }
    assert_eq!(store.len(), 4);
    assert!(store.list().iter().all(|plan| plan.status == PlanStatus::Completed));
}

#[test]
fn test_concurrent_execution_of_one_plan_runs_each_step_once() {
    let executor = Arc::new(RecordingExecutor::new());
    let planner = Arc::new(
        ChangePlanner::new(Settings::default(), PlanStore::shared()).with_executor(executor.clone()),
    );
    let plan = planner
        .create_change_plan_with_graph(&chain(), "src/a.ts", ChangeType::Delete, "drop a")
        .unwrap();

    let threads = 8;
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let planner = Arc::clone(&planner);
            let id = plan.id.clone();
            thread::spawn(move || {
                let mut advanced = 0;
                loop {
                    match planner.execute_change_plan(&id) {
                        Ok(_) => advanced += 1,
                        Err(RippleError::InvalidTransition { .. }) => return advanced,
                        Err(other) => panic!("unexpected error: {}", other),
                    }
                }
            })
        })
        .collect();

    let advanced: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(advanced, PlanStep::SEQUENCE.len());

    let finished = planner.get_plan(&plan.id).unwrap();
    assert_eq!(finished.status, PlanStatus::Completed);
    assert_eq!(finished.current_step, PlanStep::Cleanup);

    let expected: Vec<(ActionPhase, String)> = PlanStep::SEQUENCE
        .iter()
        .flat_map(|step| {
            step_actions(&plan, *step)
                .into_iter()
                .map(move |description| (ActionPhase::Step(*step), description))
        })
        .collect();
    let recorded: Vec<(ActionPhase, String)> = executor
        .actions()
        .into_iter()
        .map(|action| (action.phase, action.description))
        .collect();
    assert_eq!(recorded, expected);
}
