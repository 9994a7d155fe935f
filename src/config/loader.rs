use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::RepoDoctorConfig;
use crate::errors::{Error, Result};

/// Directory holding repodoctor's per-project files
pub const CONFIG_DIR_NAME: &str = ".repodoctor";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default config path for a project root: `<root>/.repodoctor/config.yaml`
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Create `<root>/.repodoctor` if it does not exist
pub fn ensure_config_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(CONFIG_DIR_NAME);
    fs::create_dir_all(&dir)
        .map_err(|e| Error::file_system("Failed to create config directory", &dir, e))?;
    Ok(dir)
}

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from a YAML string and merge it with defaults.
///
/// An empty document yields the default configuration.
pub fn parse_and_validate_config(contents: &str, path: &Path) -> Result<RepoDoctorConfig> {
    if contents.trim().is_empty() {
        return Ok(RepoDoctorConfig::default());
    }

    let config = serde_yaml::from_str::<RepoDoctorConfig>(contents)
        .map_err(|e| Error::configuration(path, format!("invalid YAML: {}", e)))?;

    Ok(config.merge_with_defaults())
}

/// Load configuration from an explicit path.
///
/// A missing file yields defaults; an unreadable or malformed file is an error.
pub fn load_config_from_path(config_path: &Path) -> Result<RepoDoctorConfig> {
    match read_config_file(config_path) {
        Ok(contents) => {
            let config = parse_and_validate_config(&contents, config_path)?;
            log::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!(
                "No config found at {}. Using default config.",
                config_path.display()
            );
            Ok(RepoDoctorConfig::default())
        }
        Err(e) => Err(Error::file_system(
            "Failed to read config file",
            config_path,
            e,
        )),
    }
}

/// Load `<root>/.repodoctor/config.yaml`, falling back to defaults
pub fn load_config(root: &Path) -> Result<RepoDoctorConfig> {
    load_config_from_path(&config_path(root))
}
