use indoc::indoc;
use pretty_assertions::assert_eq;
use repodoctor::config::{load_config, load_config_from_path, RepoDoctorConfig};
use repodoctor::Error;
use std::fs;
use tempfile::TempDir;

fn write_config(root: &std::path::Path, contents: &str) {
    let dir = root.join(".repodoctor");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), contents).unwrap();
}

#[test]
fn test_missing_config_uses_defaults() {
    let temp = TempDir::new().unwrap();
    assert_eq!(load_config(temp.path()).unwrap(), RepoDoctorConfig::default());
}

#[test]
fn test_full_config_is_loaded() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        indoc! {r#"
            size:
              max_file_lines: 300
              max_function_lines: 40
            god_object:
              max_fields: 8
              max_methods: 6
            rules:
              enable_size_rule: false
              enable_god_object_rule: true
            scoring:
              circular_penalty: 20.0
              layer_penalty: 2.5
              size_penalty: 1.0
              god_object_penalty: 4.0
            ignore:
              patterns:
                - "generated/**"
        "#},
    );

    let config = load_config(temp.path()).unwrap();
    assert_eq!(config.size.max_file_lines, 300);
    assert_eq!(config.size.max_function_lines, 40);
    assert_eq!(config.god_object.max_fields, 8);
    assert_eq!(config.god_object.max_methods, 6);
    assert!(!config.rules.enable_size_rule);
    assert!(config.rules.enable_god_object_rule);
    assert_eq!(config.scoring.circular_penalty, 20.0);
    assert_eq!(config.scoring.layer_penalty, 2.5);
    assert_eq!(config.get_ignore_patterns(), vec!["generated/**".to_string()]);
}

#[test]
fn test_partial_and_zero_values_take_defaults() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        indoc! {r#"
            god_object:
              max_fields: 0
            scoring:
              layer_penalty: 7.0
        "#},
    );

    let config = load_config(temp.path()).unwrap();
    let defaults = RepoDoctorConfig::default();
    assert_eq!(config.god_object, defaults.god_object);
    assert_eq!(config.size, defaults.size);
    assert_eq!(config.scoring.layer_penalty, 7.0);
    assert_eq!(config.scoring.circular_penalty, 10.0);
}

#[test]
fn test_invalid_yaml_is_reported() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "size: { max_file_lines: [1, 2\n");

    let err = load_config(temp.path()).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_explicit_config_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.yaml");
    fs::write(&path, "size:\n  max_file_lines: 123\n").unwrap();

    assert_eq!(load_config_from_path(&path).unwrap().size.max_file_lines, 123);
}
