//! Stateless change validation

use ripple::models::config::Settings;
use ripple::models::plan::ChangeType;
use ripple::planner::{validate_change, ChangePlanner, PlanStore};

#[test]
fn test_await_without_error_handling_warns_only() {
    let content = "import { fetchX } from './api';\n\nexport async function load() {\n  const data = await fetchX();\n  return data;\n}\n";
    let result = validate_change("src/services/load.ts", ChangeType::Modify, content);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.iter().any(|w| w.contains("try/catch")));
}

#[test]
fn test_planner_validation_normalizes_path() {
    let planner = ChangePlanner::new(Settings::default(), PlanStore::shared());
    let result = planner.validate_change("./src/pages/../pages/index.tsx", ChangeType::Modify, "export const x = 1;\n");

    assert!(!result.is_valid);
    assert!(planner.list_plans().is_empty());
}

#[test]
fn test_page_with_default_export_and_console_log() {
    let content = "export default function Home() {\n  console.log('render');\n  return null;\n}\n";
    let result = validate_change("src/pages/home.tsx", ChangeType::Modify, content);

    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 1);
    assert!(!result.recommendations.is_empty());
}

#[test]
fn test_api_module_needs_an_export() {
    let invalid = validate_change("src/api/users.ts", ChangeType::Add, "const handler = () => {};\n");
    assert!(!invalid.is_valid);

    let valid = validate_change("src/api/users.ts", ChangeType::Add, "export async function GET() {}\n");
    assert!(valid.is_valid);
}

#[test]
fn test_shared_utility_rules() {
    let default_only = validate_change("src/utils/date.ts", ChangeType::Modify, "export default function d() {}\n");
    assert!(!default_only.is_valid);
    assert_eq!(default_only.warnings.len(), 1);

    let named = validate_change("src/lib/date.ts", ChangeType::Modify, "export function format() {}\n");
    assert!(named.is_valid);
    assert!(named.warnings.is_empty());
}

#[test]
fn test_empty_content() {
    assert!(!validate_change("src/a.ts", ChangeType::Modify, "  \n").is_valid);
    assert!(!validate_change("src/a.ts", ChangeType::Add, "").is_valid);
    assert!(validate_change("src/a.ts", ChangeType::Rename, "").is_valid);

    let delete = validate_change("src/a.ts", ChangeType::Delete, "");
    assert!(delete.is_valid);
    assert!(!delete.recommendations.is_empty());
}
