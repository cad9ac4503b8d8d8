//! Tests for configuration system

use super::*;
use crate::error::RippleError;
use crate::models::config::OutputFormat;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn env(vars: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::with_lookup("RIPPLE", move |key| vars.get(key).cloned())
}

#[test]
fn test_partial_settings_merge() {
    let mut base = PartialSettings {
        scan_path: Some(PathBuf::from("/base/path")),
        ignore_patterns: Some(vec!["base_ignore".to_string()]),
        ..Default::default()
    };

    let override_settings = PartialSettings {
        scan_path: Some(PathBuf::from("/override/path")),
        read_workers: Some(5),
        ..Default::default()
    };

    base.merge_from(override_settings);

    assert_eq!(base.scan_path, Some(PathBuf::from("/override/path")));
    assert_eq!(base.ignore_patterns, Some(vec!["base_ignore".to_string()]));
    assert_eq!(base.read_workers, Some(5));
}

#[test]
fn test_partial_settings_to_settings() {
    let partial = PartialSettings {
        scan_path: Some(PathBuf::from("/custom/path")),
        extensions: Some(vec![".ts".to_string()]),
        output_format: Some(OutputFormat::Json),
        ..Default::default()
    };

    let settings = partial.to_settings();

    assert_eq!(settings.scan_path, PathBuf::from("/custom/path"));
    assert_eq!(settings.extensions, vec![".ts".to_string()]);
    assert_eq!(settings.output_format, OutputFormat::Json);
    assert_eq!(settings.ignore_patterns, Settings::default().ignore_patterns);
    assert!(!settings.follow_links);
}

#[test]
fn test_config_builder() {
    let settings = ConfigBuilder::new()
        .merge(PartialSettings {
            scan_path: Some(PathBuf::from("/path1")),
            ignore_patterns: Some(vec!["ignore1".to_string()]),
            ..Default::default()
        })
        .merge(PartialSettings {
            scan_path: Some(PathBuf::from("/path2")),
            read_workers: Some(2),
            ..Default::default()
        })
        .build()
        .unwrap();

    assert_eq!(settings.scan_path, PathBuf::from("/path2"));
    assert_eq!(settings.ignore_patterns, vec!["ignore1".to_string()]);
    assert_eq!(settings.read_workers, Some(2));
}

#[test]
fn test_build_for_scan_requires_existing_root() {
    let builder = ConfigBuilder::new().merge(PartialSettings {
        scan_path: Some(PathBuf::from("/no/such/dir")),
        ..Default::default()
    });
    assert!(matches!(builder.build_for_scan(), Err(RippleError::InvalidPath { .. })));

    let temp_dir = tempdir().unwrap();
    let settings = ConfigBuilder::new()
        .merge(PartialSettings {
            scan_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        })
        .build_for_scan()
        .unwrap();
    assert_eq!(settings.scan_path, temp_dir.path());
}

#[test]
fn test_file_config_source() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("ripple.toml");
    fs::write(
        &config_path,
        "scan_path = \"app\"\nignore_patterns = [\"vendor\"]\noutput_format = \"csv\"\n",
    )
    .unwrap();

    let file_config = FileConfig::with_path(&config_path);
    assert!(file_config.is_available());
    assert_eq!(file_config.priority(), 20);

    let partial = file_config.load().unwrap();
    assert_eq!(partial.scan_path, Some(PathBuf::from("app")));
    assert_eq!(partial.ignore_patterns, Some(vec!["vendor".to_string()]));
    assert_eq!(partial.output_format, Some(OutputFormat::Csv));
}

#[test]
fn test_file_config_not_found() {
    let file_config = FileConfig::with_path("/nonexistent/path/config.toml");
    assert!(!file_config.is_available());
    assert!(matches!(file_config.load(), Err(RippleError::ConfigNotFound { .. })));

    let result = ConfigBuilder::new().add_config_file(std::path::Path::new("/nonexistent/path/config.toml"));
    assert!(result.is_err());
}

#[test]
fn test_env_config_source() {
    let source = env(&[
        ("RIPPLE_SCAN_PATH", "/env/path"),
        ("RIPPLE_EXTENSIONS", ".ts, .tsx"),
        ("RIPPLE_IGNORE", "node_modules,dist"),
        ("RIPPLE_READ_WORKERS", "6"),
        ("RIPPLE_OUTPUT_FORMAT", "json"),
    ]);
    assert!(source.is_available());

    let partial = source.load().unwrap();
    assert_eq!(partial.scan_path, Some(PathBuf::from("/env/path")));
    assert_eq!(partial.extensions, Some(vec![".ts".to_string(), ".tsx".to_string()]));
    assert_eq!(
        partial.ignore_patterns,
        Some(vec!["node_modules".to_string(), "dist".to_string()])
    );
    assert_eq!(partial.read_workers, Some(6));
    assert_eq!(partial.output_format, Some(OutputFormat::Json));
}

#[test]
fn test_env_config_rejects_bad_values() {
    assert!(env(&[("RIPPLE_READ_WORKERS", "many")]).load().is_err());
    assert!(matches!(
        env(&[("RIPPLE_OUTPUT_FORMAT", "xml")]).load(),
        Err(RippleError::InvalidOutputFormat { .. })
    ));
    assert!(!env(&[("OTHER_SCAN_PATH", "x")]).is_available());
}

#[test]
fn test_precedence_file_env_cli() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("ripple.toml");
    fs::write(
        &config_path,
        "scan_path = \"from-file\"\nread_workers = 2\noutput_format = \"csv\"\n",
    )
    .unwrap();

    let cli = CliArgs {
        output_format: Some(OutputFormat::Json),
        ..Default::default()
    };

    let settings = ConfigBuilder::new()
        .add_config_file(&config_path)
        .unwrap()
        .try_load_from(&env(&[("RIPPLE_READ_WORKERS", "7")]))
        .load_from(&CliConfig::new(cli))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(settings.scan_path, PathBuf::from("from-file"));
    assert_eq!(settings.read_workers, Some(7));
    assert_eq!(settings.output_format, OutputFormat::Json);
}

#[test]
fn test_settings_validator() {
    let mut settings = Settings::default();
    assert!(SettingsValidator::validate(&settings).is_ok());

    settings.read_workers = Some(0);
    assert!(SettingsValidator::validate(&settings).is_err());

    settings = Settings::default();
    settings.extensions.clear();
    assert!(SettingsValidator::validate(&settings).is_err());

    settings = Settings::default();
    settings.ignore_patterns.push(String::new());
    assert!(SettingsValidator::validate(&settings).is_err());

    settings = Settings::default();
    settings.output_file = Some(PathBuf::from("/no/such/dir/out.json"));
    assert!(matches!(
        SettingsValidator::validate(&settings),
        Err(RippleError::InvalidPath { .. })
    ));
}
