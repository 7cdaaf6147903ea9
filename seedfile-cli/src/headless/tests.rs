use super::app::{exit_code, AppHeadless, Source};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn app_with_config(dir: &std::path::Path, config: serde_json::Value) -> AppHeadless {
    let config_path = dir.join("seedfile.config");
    fs::write(&config_path, config.to_string()).unwrap();
    AppHeadless::new(Some(config_path), false)
}

#[test]
fn test_flags_create_then_skip() {
    let dir = tempdir().unwrap();
    let app = app_with_config(dir.path(), json!({}));
    let target = dir.path().join("x.txt");
    let source = Source::Flags {
        path: Some(target.to_string_lossy().to_string()),
        content: Some("hi".to_string()),
        check_mode: false,
    };

    let first = app.execute(source.clone());
    assert!(first.changed);
    assert_eq!(exit_code(&first), 0);

    let second = app.execute(source);
    assert!(!second.changed);
    assert_eq!(exit_code(&second), 0);
    assert_eq!(fs::read_to_string(&target).unwrap(), "hi");
}

#[test]
fn test_args_file_with_check_mode() {
    let dir = tempdir().unwrap();
    let app = app_with_config(dir.path(), json!({}));
    let target = dir.path().join("x.txt");
    let args_path = dir.path().join("args.json");
    fs::write(
        &args_path,
        json!({ "path": target.to_string_lossy(), "content": "hi", "_ansible_check_mode": true }).to_string(),
    )
    .unwrap();

    let result = app.execute(Source::ArgsFile(args_path));
    assert!(!result.changed);
    assert!(!result.failed);
    assert!(!target.exists());
}

#[test]
fn test_sentinel_exit_code() {
    let dir = tempdir().unwrap();
    let app = app_with_config(dir.path(), json!({}));

    let result = app.execute(Source::Flags {
        path: Some("fail me".to_string()),
        content: None,
        check_mode: false,
    });
    assert!(result.failed);
    assert_eq!(exit_code(&result), 1);
}

#[test]
fn test_configured_default_path_and_atomic_mode() {
    let dir = tempdir().unwrap();
    let default_path = dir.path().join("fallback.txt");
    let app = app_with_config(
        dir.path(),
        json!({ "default_path": default_path.to_string_lossy(), "write_mode": "atomic" }),
    );

    let result = app.execute(Source::Flags { path: None, content: Some("d".to_string()), check_mode: false });
    assert!(result.changed);
    assert_eq!(fs::read_to_string(&default_path).unwrap(), "d");
}

#[test]
fn test_bad_config_and_bad_args_are_failures() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("broken.config");
    fs::write(&config_path, "not json").unwrap();
    let app = AppHeadless::new(Some(config_path), false);
    let result = app.execute(Source::Flags { path: None, content: None, check_mode: true });
    assert!(result.failed);

    let app = app_with_config(dir.path(), json!({}));
    let args_path = dir.path().join("args.json");
    fs::write(&args_path, "[1, 2, 3]").unwrap();
    let result = app.execute(Source::ArgsFile(args_path));
    assert!(result.failed);
    assert_eq!(exit_code(&result), 1);

    let result = app.execute(Source::ArgsFile(dir.path().join("missing.json")));
    assert!(result.failed);
}
