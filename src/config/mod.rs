// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Configuration module

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{AlarmStatus, ArmingStatus};
use crate::image::{ImageAnalyzer, RandomImageAnalyzer, ScriptedImageAnalyzer};
use crate::repository::InMemoryRepository;
use crate::sensors::{Sensor, SensorType};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Log level
    pub log_level: String,

    /// Run the built-in walkthrough when no scenario is given
    pub demo_mode: bool,

    /// Initial system status
    pub system: SystemConfig,

    /// Sensors registered at startup
    pub sensors: Vec<SensorConfig>,

    /// Camera analysis
    pub analyzer: AnalyzerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "HearthGuard".to_string(),
            log_level: "info".to_string(),
            demo_mode: true,
            system: SystemConfig::default(),
            sensors: vec![
                SensorConfig::new("Front Door", SensorType::Door),
                SensorConfig::new("Living Room Window", SensorType::Window),
                SensorConfig::new("Hallway", SensorType::Motion),
            ],
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("hearthguard"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Reject probabilities outside `0.0..=1.0` and duplicate sensor names
    pub fn validate(&self) -> Result<()> {
        let p = self.analyzer.cat_probability;
        if !(0.0..=1.0).contains(&p) {
            bail!("analyzer.cat_probability must be within 0.0..=1.0, got {}", p);
        }
        if let Some(dup) = self
            .sensors
            .iter()
            .enumerate()
            .find(|(i, s)| self.sensors[..*i].iter().any(|o| o.name == s.name))
        {
            bail!("sensor name {:?} is configured twice", dup.1.name);
        }
        Ok(())
    }

    /// Repository seeded with the configured status and sensors
    pub fn build_repository(&self) -> InMemoryRepository {
        use crate::repository::SecurityRepository;

        let mut repo =
            InMemoryRepository::with_status(self.system.alarm_status, self.system.arming_status);
        for sensor in &self.sensors {
            repo.add_sensor(sensor.build());
        }
        repo
    }
}

/// Status the in-memory repository starts from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Alarm status at startup
    pub alarm_status: AlarmStatus,
    /// Arming status at startup
    pub arming_status: ArmingStatus,
}

/// A sensor to register at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Unique display name
    pub name: String,
    /// Door, window or motion
    pub sensor_type: SensorType,
}

impl SensorConfig {
    /// Describe a sensor by name and type
    pub fn new(name: &str, sensor_type: SensorType) -> Self {
        Self {
            name: name.to_string(),
            sensor_type,
        }
    }

    /// Fresh inactive sensor with a new id
    pub fn build(&self) -> Sensor {
        Sensor::new(self.name.clone(), self.sensor_type)
    }
}

/// Which analyzer stands in for the camera backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// [`RandomImageAnalyzer`]
    Random,
    /// [`ScriptedImageAnalyzer`] fed from `script`
    Scripted,
}

/// Image analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Analyzer to build
    pub kind: AnalyzerKind,

    /// Seed for the random analyzer, entropy when unset
    pub seed: Option<u64>,

    /// Chance a frame is reported as a cat
    pub cat_probability: f64,

    /// Outcomes replayed by the scripted analyzer
    pub script: Vec<bool>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            kind: AnalyzerKind::Random,
            seed: None,
            cat_probability: 0.5,
            script: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Boxed analyzer ready for the service
    pub fn build(&self) -> Box<dyn ImageAnalyzer> {
        match self.kind {
            AnalyzerKind::Random => match self.seed {
                Some(seed) => Box::new(RandomImageAnalyzer::with_seed(self.cat_probability, seed)),
                None => Box::new(RandomImageAnalyzer::new(self.cat_probability)),
            },
            AnalyzerKind::Scripted => Box::new(ScriptedImageAnalyzer::new(self.script.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SecurityRepository;

    #[test]
    fn test_default_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml(&text).unwrap();

        assert_eq!(parsed.sensors.len(), 3);
        assert_eq!(parsed.analyzer.kind, AnalyzerKind::Random);
        assert_eq!(parsed.system.arming_status, ArmingStatus::Disarmed);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = Config::from_toml(
            r#"
            log_level = "debug"

            [system]
            arming_status = "armed_away"

            [analyzer]
            kind = "scripted"
            script = [true, false]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.system.alarm_status, AlarmStatus::NoAlarm);
        assert_eq!(config.system.arming_status, ArmingStatus::ArmedAway);
        assert_eq!(config.analyzer.script, vec![true, false]);
        assert_eq!(config.sensors.len(), 3);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Config::from_toml("[analyzer]\ncat_probability = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("cat_probability"));
    }

    #[test]
    fn test_rejects_duplicate_sensor_names() {
        let doc = r#"
            [[sensors]]
            name = "Door"
            sensor_type = "door"

            [[sensors]]
            name = "Door"
            sensor_type = "window"
        "#;
        assert!(Config::from_toml(doc).is_err());
    }

    #[test]
    fn test_build_repository_seeds_sensors() {
        let mut config = Config::default();
        config.system.alarm_status = AlarmStatus::PendingAlarm;
        let repo = config.build_repository();

        assert_eq!(repo.alarm_status(), AlarmStatus::PendingAlarm);
        assert_eq!(repo.sensors().len(), 3);
        assert!(repo.sensors().iter().all(|s| !s.is_active()));
    }
}
