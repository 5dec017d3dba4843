use crate::queue::error::QueueError;
use crate::scenario::scenario::Department;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Request parameters used when the caller supplies none (per hour).
pub const DEFAULT_ARRIVAL_RATE: f64 = 20.0;
pub const DEFAULT_SERVICE_RATE: f64 = 5.0;
pub const DEFAULT_SERVERS: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("department '{name}' is misconfigured: {source}")]
    Department { name: String, source: QueueError },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub log_level: String,
    /// Extra server counts shown beyond the current one in staffing tables.
    pub sweep_width: u32,
    /// Hours.
    pub target_wait: f64,
    pub departments: Vec<Department>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sweep_width: 4,
            target_wait: 0.25,
            departments: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Departments may be unstable (that is what the dashboard shows), but
    /// never non-physical.
    fn validate(&self) -> Result<(), ConfigError> {
        for dept in &self.departments {
            match dept.params() {
                Ok(_) | Err(QueueError::UnstableQueue { .. }) => {}
                Err(source) => {
                    return Err(ConfigError::Department {
                        name: dept.name().to_string(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn test_parses_departments() {
        let raw = r#"
            log_level = "debug"
            sweep_width = 6

            [[departments]]
            name = "Emergency"
            arrival_rate = 20.0
            service_rate = 5.0
            servers = 5

            [[departments]]
            name = "Overflow"
            arrival_rate = 30.0
            service_rate = 5.0
            servers = 2
        "#;
        let settings = Settings::from_toml_str(raw).unwrap();

        assert_eq!("debug", settings.log_level);
        assert_eq!(6, settings.sweep_width);
        assert_eq!(0.25, settings.target_wait);
        assert_eq!(
            vec![
                Department::new("Emergency", 20.0, 5.0, 5),
                Department::new("Overflow", 30.0, 5.0, 2),
            ],
            settings.departments
        );
    }

    #[test]
    fn test_rejects_non_physical_department() {
        let raw = r#"
            [[departments]]
            name = "Ghost Ward"
            arrival_rate = 3.0
            service_rate = 2.0
            servers = 0
        "#;
        match Settings::from_toml_str(raw) {
            Err(ConfigError::Department { name, .. }) => assert_eq!("Ghost Ward", name),
            other => panic!("expected department error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_keys_and_negative_servers() {
        assert!(matches!(
            Settings::from_toml_str("sweep = 3"),
            Err(ConfigError::Parse(_))
        ));
        let raw = r#"
            [[departments]]
            name = "Ward"
            arrival_rate = 3.0
            service_rate = 2.0
            servers = -1
        "#;
        assert!(matches!(Settings::from_toml_str(raw), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_bundled_settings_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("hospital.toml");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(4, settings.departments.len());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/nonexistent/queueflow.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
