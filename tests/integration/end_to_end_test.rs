//! End-to-end runs through configuration, analysis, planning and output

use clap::Parser;
use ripple::cli::{Args, Command};
use ripple::config::{load_config_for_scan, CliArgs};
use ripple::core::{ImpactPredictor, ProjectAnalyzer};
use ripple::error::RippleError;
use ripple::models::config::OutputFormat;
use ripple::models::impact::ChangeKind;
use ripple::models::plan::{ChangeType, PlanStatus};
use ripple::planner::{ChangePlanner, PlanStore};
use ripple::utils::path_resolver::path_key;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small app: one shared helper used by an API client used by two pages
fn create_app(base: &Path) -> PathBuf {
    let src = base.join("src");
    write(&src, "utils/http.ts", "export async function request(url) {\n  return fetch(url);\n}\n");
    write(
        &src,
        "api/users.ts",
        "import { request } from '../utils/http';\nexport async function listUsers() {\n  return request('/users');\n}\n",
    );
    write(
        &src,
        "pages/users.tsx",
        "import { listUsers } from '../api/users';\nexport default function Users() {}\n",
    );
    write(
        &src,
        "pages/admin.tsx",
        "import { listUsers } from '../api/users';\nimport { request } from '../utils/http';\nexport default function Admin() {}\n",
    );
    write(&src, "node_modules/lodash/index.js", "module.exports = {};\n");
    src
}

fn write_config(base: &Path, src: &Path) -> PathBuf {
    let config = base.join("ripple.toml");
    fs::write(
        &config,
        format!("scan_path = {:?}\nread_workers = 2\nshow_progress = false\n", src.to_string_lossy()),
    )
    .unwrap();
    config
}

#[test]
fn test_configured_analysis_and_impact() {
    let dir = tempdir().unwrap();
    let src = create_app(dir.path());
    let config = write_config(dir.path(), &src);

    let settings = load_config_for_scan(&CliArgs {
        config: Some(config),
        output_format: Some(OutputFormat::Json),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(settings.scan_path, src);
    assert_eq!(settings.read_workers, Some(2));
    assert_eq!(settings.output_format, OutputFormat::Json);

    let run = ProjectAnalyzer::new(settings).analyze().unwrap();
    assert!(run.errors.is_empty());
    assert_eq!(run.graph.len(), 4);

    let http = path_key(&src.join("utils/http.ts"));
    let users = path_key(&src.join("api/users.ts"));
    let impacts = ImpactPredictor::predict(&http, ChangeKind::Delete, &run.graph);

    // admin appears directly and again through users
    let direct: Vec<_> = impacts.iter().take(2).map(|i| i.affected_file.clone()).collect();
    assert_eq!(direct, vec![users.clone(), path_key(&src.join("pages/admin.tsx"))]);
    assert_eq!(impacts.len(), 4);

    // Same input, same answer
    assert_eq!(impacts, ImpactPredictor::predict(&http, ChangeKind::Delete, &run.graph));
}

#[test]
fn test_plan_from_fresh_analysis() {
    let dir = tempdir().unwrap();
    let src = create_app(dir.path());
    let settings = load_config_for_scan(&CliArgs {
        config: Some(write_config(dir.path(), &src)),
        ..Default::default()
    })
    .unwrap();

    let planner = ChangePlanner::new(settings, PlanStore::shared());
    let target = path_key(&src.join("api/users.ts"));
    let plan = planner
        .create_change_plan(&target, ChangeType::Move, "move users client")
        .unwrap();

    assert_eq!(plan.file_path, target);
    assert_eq!(plan.affected_files().len(), 2);

    let done = planner.execute_to_completion(&plan.id).unwrap();
    assert_eq!(done.status, PlanStatus::Completed);
    assert_eq!(planner.list_plans().len(), 1);

    let missing = planner.create_change_plan("src/nope.ts", ChangeType::Delete, "");
    assert!(matches!(missing, Err(RippleError::NotFound { .. })));
    assert_eq!(planner.list_plans().len(), 1);
}

#[test]
fn test_cli_writes_json_report() {
    let dir = tempdir().unwrap();
    let src = create_app(dir.path());
    let config = write_config(dir.path(), &src);
    let report = dir.path().join("report.json");

    let args = Args::try_parse_from([
        "ripple".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        "--output".to_string(),
        "json".to_string(),
        "--output-file".to_string(),
        report.to_string_lossy().into_owned(),
        "--quiet".to_string(),
        "analyze".to_string(),
    ])
    .unwrap();
    Command::from_args(args).execute().unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["statistics"]["totalNodes"], 4);
    assert_eq!(json["statistics"]["totalEdges"], 4);
    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn test_cli_plan_csv_and_dot_graph() {
    let dir = tempdir().unwrap();
    let src = create_app(dir.path());
    let config = write_config(dir.path(), &src);
    let plan_out = dir.path().join("plan.csv");
    let dot_out = dir.path().join("deps.dot");
    let target = path_key(&src.join("utils/http.ts"));

    let run = |extra: Vec<String>| {
        let mut argv = vec![
            "ripple".to_string(),
            "--config".to_string(),
            config.to_string_lossy().into_owned(),
            "--quiet".to_string(),
        ];
        argv.extend(extra);
        Command::from_args(Args::try_parse_from(argv).unwrap()).execute()
    };

    run(vec![
        "--output".into(),
        "csv".into(),
        "--output-file".into(),
        plan_out.to_string_lossy().into_owned(),
        "plan".into(),
        target.clone(),
        "--change".into(),
        "delete".into(),
        "--execute".into(),
    ])
    .unwrap();
    let csv = fs::read_to_string(&plan_out).unwrap();
    assert!(csv.starts_with("Plan,Section,Entry"));
    assert!(csv.contains(",status,completed"));

    run(vec![
        "--output-file".into(),
        dot_out.to_string_lossy().into_owned(),
        "graph".into(),
        "--dot".into(),
    ])
    .unwrap();
    let dot = fs::read_to_string(&dot_out).unwrap();
    assert!(dot.contains(&format!("\"{}\"", target)));

    let missing = run(vec!["plan".into(), "src/none.ts".into(), "--change".into(), "modify".into()]);
    assert!(matches!(missing, Err(RippleError::NotFound { .. })));
}

#[test]
fn test_cli_rejects_missing_scan_root() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("ripple.toml");
    fs::write(&config, "scan_path = \"/definitely/not/here\"\n").unwrap();

    let args = Args::try_parse_from([
        "ripple".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        "--quiet".to_string(),
        "analyze".to_string(),
    ])
    .unwrap();

    let err = Command::from_args(args).execute().unwrap_err();
    assert!(matches!(err, RippleError::InvalidPath { .. }));
}
