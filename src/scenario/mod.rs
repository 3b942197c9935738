// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Scripted scenarios - drive the security service from a TOML step list

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SensorConfig;
use crate::core::{AlarmStatus, ArmingStatus, SecurityService, SystemSnapshot};
use crate::error::SecurityError;
use crate::image::{Frame, ScriptedImageAnalyzer};
use crate::sensors::{Sensor, SensorType};

const DEFAULT_FRAME_SIDE: u32 = 64;

fn default_frame_side() -> u32 {
    DEFAULT_FRAME_SIDE
}

/// A named list of steps plus the sensors and camera outcomes they need
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Shown in logs and the final report
    pub name: String,

    /// Registered before the first step
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,

    /// Camera outcomes, one per `frame` step
    #[serde(default)]
    pub camera: Vec<bool>,

    /// Executed in order, the first failure stops the run
    pub steps: Vec<Step>,
}

/// One action against the security service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Change the arming status
    Arm {
        /// Mode to switch to
        status: ArmingStatus,
    },
    /// Mark the named sensor active
    Activate {
        /// Sensor name
        sensor: String,
    },
    /// Mark the named sensor inactive
    Deactivate {
        /// Sensor name
        sensor: String,
    },
    /// Feed a blank frame of the given size to the camera
    Frame {
        /// Width in pixels, 64 when omitted
        #[serde(default = "default_frame_side")]
        width: u32,
        /// Height in pixels, 64 when omitted
        #[serde(default = "default_frame_side")]
        height: u32,
    },
    /// Register a new sensor
    AddSensor {
        /// Name later steps refer to
        name: String,
        /// Door, window or motion
        sensor_type: SensorType,
    },
    /// Unregister the named sensor
    RemoveSensor {
        /// Sensor name
        sensor: String,
    },
    /// Fail unless the alarm status matches
    Expect {
        /// Required alarm status
        alarm_status: AlarmStatus,
    },
}

impl Step {
    fn frame() -> Self {
        Step::Frame {
            width: DEFAULT_FRAME_SIDE,
            height: DEFAULT_FRAME_SIDE,
        }
    }

    fn activate(sensor: &str) -> Self {
        Step::Activate {
            sensor: sensor.to_string(),
        }
    }

    fn expect(alarm_status: AlarmStatus) -> Self {
        Step::Expect { alarm_status }
    }

    fn arm(status: ArmingStatus) -> Self {
        Step::Arm { status }
    }
}

/// Why a scenario stopped early
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A step named a sensor that is not registered
    #[error("step {step}: no sensor named {name:?}")]
    UnknownSensor {
        /// 1-based step number
        step: usize,
        /// Name that did not resolve
        name: String,
    },

    /// An `expect` step did not match
    #[error("step {step}: expected alarm status {expected}, found {actual}")]
    Expectation {
        /// 1-based step number
        step: usize,
        /// Status the step asked for
        expected: AlarmStatus,
        /// Status the service reported
        actual: AlarmStatus,
    },

    /// The service rejected a step
    #[error("step {step}: {source}")]
    Security {
        /// 1-based step number
        step: usize,
        /// Underlying service error
        #[source]
        source: SecurityError,
    },
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml(&content)?;
        info!("Loaded scenario {:?} from {:?}", scenario.name, path);
        Ok(scenario)
    }

    /// Parse a scenario from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Analyzer replaying this scenario's camera script, if it has one
    pub fn camera(&self) -> Option<ScriptedImageAnalyzer> {
        if self.camera.is_empty() {
            None
        } else {
            Some(ScriptedImageAnalyzer::new(self.camera.clone()))
        }
    }

    /// Built-in walkthrough: trip a door twice, ignore a clear frame while
    /// the door is open, then clear a cat alarm once the house is quiet.
    pub fn demo() -> Self {
        Self {
            name: "demo".to_string(),
            sensors: vec![
                SensorConfig::new("Front Door", SensorType::Door),
                SensorConfig::new("Back Window", SensorType::Window),
            ],
            camera: vec![false, true, false],
            steps: vec![
                Step::arm(ArmingStatus::ArmedHome),
                Step::activate("Front Door"),
                Step::expect(AlarmStatus::PendingAlarm),
                Step::activate("Front Door"),
                Step::expect(AlarmStatus::Alarm),
                // Door still open, a clear frame must not reset
                Step::frame(),
                Step::expect(AlarmStatus::Alarm),
                Step::arm(ArmingStatus::Disarmed),
                Step::expect(AlarmStatus::NoAlarm),
                Step::arm(ArmingStatus::ArmedHome),
                Step::frame(),
                Step::expect(AlarmStatus::Alarm),
                Step::frame(),
                Step::expect(AlarmStatus::NoAlarm),
            ],
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Steps executed
    pub steps_run: usize,
    /// `expect` steps that held
    pub expectations_met: usize,
    /// Service state after the last step
    pub final_state: SystemSnapshot,
}

/// Executes scenarios against a service
pub struct ScenarioRunner<'a> {
    service: &'a SecurityService,
}

impl<'a> ScenarioRunner<'a> {
    /// Runner driving `service`
    pub fn new(service: &'a SecurityService) -> Self {
        Self { service }
    }

    /// Register the scenario's sensors, skipping names already present,
    /// then execute every step in order
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        info!("Running scenario {:?} ({} steps)", scenario.name, scenario.steps.len());

        let existing = self.service.sensors();
        for sensor in &scenario.sensors {
            if existing.iter().any(|s| s.name() == sensor.name) {
                debug!("Sensor {:?} already registered, reusing it", sensor.name);
                continue;
            }
            self.service.add_sensor(sensor.build());
        }

        let mut expectations_met = 0;
        for (index, step) in scenario.steps.iter().enumerate() {
            let step_no = index + 1;
            debug!(step = step_no, ?step, "Executing");
            if self.execute(step_no, step)? {
                expectations_met += 1;
            }
        }

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            steps_run: scenario.steps.len(),
            expectations_met,
            final_state: self.service.snapshot(),
        })
    }

    /// Returns true when the step was a satisfied expectation
    fn execute(&self, step_no: usize, step: &Step) -> Result<bool, ScenarioError> {
        match step {
            Step::Arm { status } => self.service.set_arming_status(*status),
            Step::Activate { sensor } => {
                let mut sensor = self.find_sensor(step_no, sensor)?;
                self.service.change_sensor_activation_status(&mut sensor, true);
            }
            Step::Deactivate { sensor } => {
                let mut sensor = self.find_sensor(step_no, sensor)?;
                self.service.change_sensor_activation_status(&mut sensor, false);
            }
            Step::Frame { width, height } => {
                Frame::blank(*width, *height)
                    .map_err(SecurityError::from)
                    .and_then(|frame| self.service.process_image(&frame))
                    .map_err(|source| ScenarioError::Security {
                        step: step_no,
                        source,
                    })?;
            }
            Step::AddSensor { name, sensor_type } => {
                self.service.add_sensor(Sensor::new(name.clone(), *sensor_type));
            }
            Step::RemoveSensor { sensor } => {
                let sensor = self.find_sensor(step_no, sensor)?;
                self.service.remove_sensor(&sensor);
            }
            Step::Expect { alarm_status } => {
                let actual = self.service.alarm_status();
                if actual != *alarm_status {
                    return Err(ScenarioError::Expectation {
                        step: step_no,
                        expected: *alarm_status,
                        actual,
                    });
                }
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn find_sensor(&self, step_no: usize, name: &str) -> Result<Sensor, ScenarioError> {
        self.service
            .sensors()
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| ScenarioError::UnknownSensor {
                step: step_no,
                name: name.to_string(),
            })
    }
}
