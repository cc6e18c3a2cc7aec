//! Configuration loading functionality.
//!
//! Reads the engine configuration from a YAML file into the typed
//! structures of [`super::types`].

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

impl EngineConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g. "./config/engine.yaml")
    ///
    /// # Returns
    ///
    /// Returns the parsed configuration on success, or an error if the
    /// file is missing, contains invalid YAML, or fails validation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use personnel_engine::config::EngineConfig;
    ///
    /// let config = EngineConfig::load("./config/engine.yaml")?;
    /// # Ok::<(), personnel_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BasicSalarySource;

    #[test]
    fn test_load_shipped_configuration() {
        let config = EngineConfig::load("./config/engine.yaml").unwrap();
        assert_eq!(config.payroll.default_basic_salary, Some(250_000));
        assert_eq!(
            config.payroll.basic_salary_source,
            BasicSalarySource::PriorRecord
        );
        assert_eq!(config.payroll.overtime_hourly_rate, 1_500);
        assert_eq!(config.calendar.edit_buffer_days, 7);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = EngineConfig::load("/nonexistent/engine.yaml");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("personnel-engine-bad-config.yaml");
        fs::write(&path, "payroll: [not, a, mapping]").unwrap();

        let result = EngineConfig::load(&path);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));

        let _ = fs::remove_file(&path);
    }
}
