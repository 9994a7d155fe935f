use crate::config::{config_path, ensure_config_dir};
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# repodoctor configuration
#
# Every section and field is optional. Missing or zero values use the
# defaults shown here.

size:
  # Flag files with more non-blank lines than this
  max_file_lines: 500
  # Flag functions longer than this, from `fn` to the closing brace
  max_function_lines: 80

god_object:
  max_fields: 15
  max_methods: 10

rules:
  enable_size_rule: true
  enable_god_object_rule: true

# Points subtracted from 100 per violation
scoring:
  circular_penalty: 10.0
  layer_penalty: 5.0
  size_penalty: 3.0
  god_object_penalty: 5.0

ignore:
  patterns:
    - "target/**"
"#;

/// Write the default configuration to `<root>/.repodoctor/config.yaml`
pub fn init_config(root: &Path, force: bool) -> Result<()> {
    let config_path = config_path(root);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    ensure_config_dir(root)?;
    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, parse_and_validate_config, RepoDoctorConfig};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG, Path::new("config.yaml")).unwrap();
        let expected = RepoDoctorConfig {
            ignore: crate::config::IgnoreConfig {
                patterns: vec!["target/**".to_string()],
            },
            ..Default::default()
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        init_config(temp.path(), false).unwrap();

        let path = config_path(temp.path());
        fs::write(&path, "size:\n  max_file_lines: 42\n").unwrap();

        assert!(init_config(temp.path(), false).is_err());
        assert_eq!(load_config(temp.path()).unwrap().size.max_file_lines, 42);

        init_config(temp.path(), true).unwrap();
        assert_eq!(load_config(temp.path()).unwrap().size.max_file_lines, 500);
    }
}
