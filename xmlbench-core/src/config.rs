use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Runtime settings of the benchmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchConfig {
    /// Pause between two strategy runs of a comparison, in milliseconds.
    pub settle_millis: u64,
    /// Article count used by `generate` when none is given.
    pub default_sample_records: usize,
    /// `EnvFilter` directive, e.g. `"xmlbench=debug"`.
    pub log_filter: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            settle_millis: 0,
            default_sample_records: 1000,
            log_filter: None,
        }
    }
}

impl BenchConfig {
    /// Reads a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(BenchConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_sample_records > crate::MAX_SAMPLE_RECORDS {
            return Err(ConfigError::Validation(format!(
                "default_sample_records must not exceed {}",
                crate::MAX_SAMPLE_RECORDS
            )));
        }
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "log_filter must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for BenchConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: BenchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "settle_millis = 100").unwrap();
        let config = BenchConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            BenchConfig {
                settle_millis: 100,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_load_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "settle_millis = 5\ndefault_sample_records = 50\nlog_filter = \"xmlbench=debug\""
        )
        .unwrap();
        let config = BenchConfig::load(file.path()).unwrap();
        assert_eq!(config.default_sample_records, 50);
        assert_eq!(config.log_filter.as_deref(), Some("xmlbench=debug"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            "default_sample_records = 20000".parse::<BenchConfig>(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            "settle_millis = \"slow\"".parse::<BenchConfig>(),
            Err(ConfigError::TomlParsing(_))
        ));
    }
}
