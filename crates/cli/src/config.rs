use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use adaptsched_engine::{SchedulerConfig, WorkloadConfig};

/// Scheduler and workload settings loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationFile {
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl SimulationFile {
    /// Return the default config directory path: ~/.config/adaptsched/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("adaptsched");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationFile::default();
        assert_eq!(config.scheduler.min_slice, 10);
        assert_eq!(config.scheduler.max_slice, 30);
        assert_eq!(config.workload.arrival_cycles, vec![3, 6, 9]);
        assert_eq!(config.workload.seed_tasks.len(), 3);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = SimulationFile::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config, SimulationFile::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[scheduler]
max_slice = 15

[scheduler.policy]
critical_load = 0.9

[workload]
arrival_cycles = []
"#,
        )
        .unwrap();

        let config = SimulationFile::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.scheduler.max_slice, 15);
        assert_eq!(config.scheduler.min_slice, 10);
        assert_eq!(config.scheduler.policy.critical_load, 0.9);
        assert!(config.workload.arrival_cycles.is_empty());
        assert_eq!(config.workload.seed_tasks.len(), 3);
    }

    #[test]
    fn test_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scheduler\nmax_slice = ").unwrap();
        let err = SimulationFile::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SimulationFile::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: SimulationFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
