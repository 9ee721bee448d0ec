//! Configuration system tests
//!
//! Tests for config paths and loading `ShortcutConfig` from disk.

mod common;

use std::io::Write;
use std::rc::Rc;

use common::{counter, open_window, FakeHost};
use localshortcut::config::ConfigError;
use localshortcut::config_paths;
use localshortcut::shortcut::{Modifiers, Platform, RawKeyEvent, RecordingSink};
use localshortcut::{ShortcutConfig, ShortcutManager};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("localshortcut"));
}

#[test]
fn test_config_file_is_yaml_in_config_dir() {
    let file = config_paths::config_file().unwrap();
    assert_eq!(file.file_name().unwrap(), "config.yaml");
    assert_eq!(file.parent(), config_paths::config_dir().as_deref());
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(config_paths::config_dir().unwrap()));
    assert!(logs.ends_with("logs"));
}

// ========================================================================
// Loading
// ========================================================================

fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        "platform: windows\nreport_invalid_accelerators: false\ncapture_backtraces: false\n",
    );
    let config = ShortcutConfig::load(file.path()).unwrap();

    assert_eq!(config.platform, Some(Platform::Windows));
    assert!(!config.report_invalid_accelerators);
    assert!(!config.capture_backtraces);
}

#[test]
fn test_load_empty_file_gives_defaults() {
    let file = write_config("{}\n");
    let config = ShortcutConfig::load(file.path()).unwrap();
    assert_eq!(config, ShortcutConfig::default());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");

    let err = ShortcutConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn test_load_malformed_yaml_is_parse_error() {
    let file = write_config("capture_backtraces: [not, a, bool]\n");
    let err = ShortcutConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_round_trips_through_yaml() {
    let config = ShortcutConfig {
        platform: Some(Platform::Linux),
        report_invalid_accelerators: true,
        capture_backtraces: false,
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("platform: linux"));
    assert_eq!(ShortcutConfig::from_yaml_str(&yaml).unwrap(), config);
}

// ========================================================================
// Config applied to a manager
// ========================================================================

#[test]
fn test_loaded_platform_drives_cmd_or_ctrl() {
    let file = write_config("platform: linux\n");
    let config = ShortcutConfig::load(file.path()).unwrap();

    let host = FakeHost::new();
    let manager = ShortcutManager::builder(host.clone()).config(config).build();
    assert_eq!(manager.platform(), Platform::Linux);

    let window = open_window(&host, &manager);
    let (hits, cb) = counter();
    manager.register(window, "CmdOrCtrl+S", &cb).unwrap();

    let ctrl_s = RawKeyEvent::key_down("KeyS", "s").with_modifiers(Modifiers::CTRL);
    let meta_s = RawKeyEvent::key_down("KeyS", "s").with_modifiers(Modifiers::META);
    manager.handle_event(window, &meta_s);
    manager.handle_event(window, &ctrl_s);
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_backtraces_can_be_disabled() {
    let file = write_config("capture_backtraces: false\n");
    let config = ShortcutConfig::load(file.path()).unwrap();

    let host = FakeHost::new();
    let sink = Rc::new(RecordingSink::new());
    let manager = ShortcutManager::builder(host.clone())
        .config(config)
        .sink(sink.clone())
        .build();

    let window = open_window(&host, &manager);
    let (_, cb) = counter();
    manager.register(window, "Ctrl+", &cb).unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].accelerator, "Ctrl+");
    assert!(records[0].backtrace.is_empty());
}
