//! Configuration for the waterclock.
//!
//! Settings live in `config.toml` under the platform configuration directory.
//! Every field is optional; anything missing falls back to its default.
//!
//! ```toml
//! fps = 20
//! acceleration = 1
//! trail = true
//!
//! [engine]
//! opening_period = 30
//! drop_interval = 28
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use waterclock_core::EngineConfig;

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "waterclock.log";

/// Errors raised while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per second at normal speed.
    pub fps: u32,
    /// Simulated seconds per real second.
    pub acceleration: u32,
    /// Random seed; a fresh one is drawn at startup when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Keep showing a droplet's colour for a frame after it moves.
    pub trail: bool,
    /// Automaton tunables.
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 20,
            acceleration: 1,
            seed: None,
            trail: true,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "waterclock")
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Default location of the log file.
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
    }

    /// Load from the default location, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        let engine = &self.engine;

        if self.fps == 0 {
            return invalid("fps", "must be at least 1");
        }
        if self.acceleration == 0 {
            return invalid("acceleration", "must be at least 1");
        }
        if engine.move_period == 0 {
            return invalid("engine.move_period", "must be at least 1");
        }
        if engine.cluster_period == 0 {
            return invalid("engine.cluster_period", "must be at least 1");
        }
        if engine.pick_multiplicity == 0 {
            return invalid("engine.pick_multiplicity", "must be at least 1");
        }
        if engine.drop_interval == 0 {
            return invalid("engine.drop_interval", "must be at least 1");
        }
        if engine.drop_size > engine.drop_interval {
            return invalid("engine.drop_size", "must not exceed drop_interval");
        }
        if !(0.0..=1.0).contains(&engine.rare_rise_veto) {
            return invalid("engine.rare_rise_veto", "must be between 0 and 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fps, 20);
        assert_eq!(config.acceleration, 1);
        assert!(config.seed.is_none());
        assert!(config.trail);
        assert_eq!(config.engine.opening_period, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            acceleration = 60
            seed = 12

            [engine]
            drop_interval = 14
            "#,
        )
        .unwrap();
        assert_eq!(config.acceleration, 60);
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.fps, 20);
        assert_eq!(config.engine.drop_interval, 14);
        assert_eq!(config.engine.cluster_period, 120);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            fps: 30,
            seed: Some(99),
            trail: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "fps = \"fast\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_validation() {
        let zero_fps = Config {
            fps: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_fps.validate(),
            Err(ConfigError::Invalid { field: "fps", .. })
        ));

        let mut bad_engine = Config::default();
        bad_engine.engine.drop_interval = 0;
        assert!(bad_engine.validate().is_err());

        let mut bad_veto = Config::default();
        bad_veto.engine.rare_rise_veto = 1.5;
        assert!(matches!(
            bad_veto.validate(),
            Err(ConfigError::Invalid {
                field: "engine.rare_rise_veto",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[engine]\ncluster_period = 0\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
