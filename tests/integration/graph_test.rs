//! Dependency graph construction over real files

use ripple::core::{ProjectAnalyzer, RiskScorer};
use ripple::models::analysis::RiskLevel;
use ripple::models::config::Settings;
use ripple::utils::path_resolver::path_key;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_project(root: &Path) {
    write(
        root,
        "utils/format.ts",
        "export function formatDate(d) { return d; }\nexport const DEFAULT = 'x';\n",
    );
    write(
        root,
        "api/client.ts",
        "import { formatDate } from '../utils/format';\nimport axios from 'axios';\nexport async function get() {}\n",
    );
    write(
        root,
        "pages/home.tsx",
        "import { get } from '../api/client';\nimport { formatDate } from '../utils/format.js';\nexport default function Home() {}\n",
    );
    write(
        root,
        "pages/about.tsx",
        "const { get } = require('../api/client');\nimport missing from './missing';\nexport default function About() {}\n",
    );
    write(root, "cycle/a.ts", "import { b } from './b';\nexport const a = 1;\n");
    write(root, "cycle/b.ts", "import { a } from './a';\nexport const b = 2;\n");
    write(root, "lib/index.ts", "export * from './helpers';\nexport const lib = 1;\n");
    write(root, "lib/helpers.ts", "export const helper = 1;\n");
}

fn key(root: &Path, rel: &str) -> String {
    path_key(&root.join(rel))
}

#[test]
fn test_edges_are_symmetric() {
    let dir = tempdir().unwrap();
    create_project(dir.path());

    let graph = ProjectAnalyzer::new(Settings::for_root(dir.path())).analyze().unwrap().graph;
    assert_eq!(graph.len(), 8);

    for (path, record) in &graph.records {
        for dep in &record.dependencies {
            assert!(graph.contains(dep), "{} depends on unknown {}", path, dep);
            assert!(graph.dependents_of(dep).contains(path), "missing back edge {} <- {}", dep, path);
        }
        for dependent in &record.dependents {
            assert!(graph.dependencies_of(dependent).contains(path));
        }
    }
}

#[test]
fn test_resolution_through_extensions_and_js_suffix() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_project(root);

    let graph = ProjectAnalyzer::new(Settings::for_root(root)).analyze().unwrap().graph;
    let format = key(root, "utils/format.ts");
    let client = key(root, "api/client.ts");
    let home = key(root, "pages/home.tsx");
    let about = key(root, "pages/about.tsx");

    // `../utils/format.js` resolves to the .ts source
    assert_eq!(graph.dependencies_of(&home), [client.clone(), format.clone()]);
    assert_eq!(graph.dependents_of(&format), [client.clone(), home.clone()]);
    // require() edges count too
    assert!(graph.dependents_of(&client).contains(&about));
    // Package imports never become edges
    assert_eq!(graph.dependencies_of(&client), [format]);

    let unresolved = &graph.unresolved_imports[&about];
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].specifier, "./missing");
    assert_eq!(unresolved[0].line_number, 2);
}

#[test]
fn test_analysis_is_idempotent_and_worker_independent() {
    let dir = tempdir().unwrap();
    create_project(dir.path());

    let mut single = Settings::for_root(dir.path());
    single.read_workers = Some(1);
    let mut many = Settings::for_root(dir.path());
    many.read_workers = Some(8);

    let first = ProjectAnalyzer::new(single.clone()).analyze().unwrap().graph;
    let second = ProjectAnalyzer::new(single).analyze().unwrap().graph;
    let parallel = ProjectAnalyzer::new(many).analyze().unwrap().graph;

    assert_eq!(first, second);
    assert_eq!(first, parallel);
}

#[test]
fn test_cycles_and_statistics() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_project(root);

    let graph = ProjectAnalyzer::new(Settings::for_root(root)).analyze().unwrap().graph;
    let cycles = graph.circular_dependencies();
    assert_eq!(cycles.len(), 1);

    let stats = graph.statistics();
    assert_eq!(stats.total_nodes, 8);
    assert_eq!(stats.circular_count, 1);
    assert_eq!(stats.unresolved_count, 1);
    assert_eq!(stats.max_fan_in, 2);
    assert_eq!(
        stats.low_risk + stats.medium_risk + stats.high_risk + stats.critical_risk,
        stats.total_nodes
    );

    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph dependencies {"));
    assert!(dot.contains("color=red, style=bold"));
}

#[test]
fn test_risk_is_monotone_in_every_input() {
    let paths = ["src/a.ts", "src/utils/a.ts", "src/api/a.ts", "src/lib/api/a.ts"];
    for path in paths {
        for deps in 0..6 {
            for dependents in 0..6 {
                for exports in 0..6 {
                    let base = RiskScorer::classify(RiskScorer::score(deps, dependents, exports, path));
                    for (d, n, e) in [(deps + 1, dependents, exports), (deps, dependents + 1, exports), (deps, dependents, exports + 1)] {
                        let bumped = RiskScorer::classify(RiskScorer::score(d, n, e, path));
                        assert!(bumped >= base, "{} ({}, {}, {})", path, d, n, e);
                    }
                }
            }
        }
    }
}

#[test]
fn test_shared_files_score_higher() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_project(root);

    let graph = ProjectAnalyzer::new(Settings::for_root(root)).analyze().unwrap().graph;
    let format = graph.get(&key(root, "utils/format.ts")).unwrap();

    // 2 dependents * 2 + 2 exports + shared bonus 5 = 11
    assert_eq!(RiskScorer::score_record(format, &graph.root), 11);
    assert_eq!(format.risk_level, RiskLevel::Medium);
}

#[test]
fn test_risk_ignores_directories_above_the_scan_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("lib/app/src");
    write(&root, "a.ts", "const local = 1;\n");
    write(&root, "api/users.ts", "const handler = 1;\n");

    let graph = ProjectAnalyzer::new(Settings::for_root(&root)).analyze().unwrap().graph;
    assert_eq!(graph.root, path_key(&root));

    let plain = graph.get(&key(&root, "a.ts")).unwrap();
    assert_eq!(graph.relative_path(&plain.path), "a.ts");
    assert_eq!(RiskScorer::score_record(plain, &graph.root), 0);
    assert_eq!(plain.risk_level, RiskLevel::Low);

    let api = graph.get(&key(&root, "api/users.ts")).unwrap();
    assert_eq!(RiskScorer::score_record(api, &graph.root), 3);
}
