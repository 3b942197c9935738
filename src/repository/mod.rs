// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Repository module - where sensors and system status live

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::core::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Store for sensors and the two persisted status fields.
///
/// The security service reads through this before every decision and writes
/// back after it, so an implementation is the single source of truth.
pub trait SecurityRepository: Send {
    /// All registered sensors, ordered by name
    fn sensors(&self) -> Vec<Sensor>;

    /// Register a sensor
    fn add_sensor(&mut self, sensor: Sensor);

    /// Unregister a sensor; unknown sensors are ignored
    fn remove_sensor(&mut self, sensor: &Sensor);

    /// Overwrite the stored copy of `sensor`
    fn update_sensor(&mut self, sensor: &Sensor);

    /// Last stored alarm status
    fn alarm_status(&self) -> AlarmStatus;

    /// Store a new alarm status
    fn set_alarm_status(&mut self, status: AlarmStatus);

    /// Last stored arming status
    fn arming_status(&self) -> ArmingStatus;

    /// Store a new arming status
    fn set_arming_status(&mut self, status: ArmingStatus);
}

/// Volatile repository kept entirely in memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    sensors: HashMap<Uuid, Sensor>,
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
}

impl InMemoryRepository {
    /// Empty repository at `NoAlarm` / `Disarmed`
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty repository starting from the given statuses
    pub fn with_status(alarm_status: AlarmStatus, arming_status: ArmingStatus) -> Self {
        Self {
            sensors: HashMap::new(),
            alarm_status,
            arming_status,
        }
    }
}

impl SecurityRepository for InMemoryRepository {
    fn sensors(&self) -> Vec<Sensor> {
        let mut sensors: Vec<Sensor> = self.sensors.values().cloned().collect();
        sensors.sort();
        sensors
    }

    fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.insert(sensor.id(), sensor);
    }

    fn remove_sensor(&mut self, sensor: &Sensor) {
        self.sensors.remove(&sensor.id());
    }

    fn update_sensor(&mut self, sensor: &Sensor) {
        match self.sensors.get_mut(&sensor.id()) {
            Some(stored) => *stored = sensor.clone(),
            None => debug!("Update for unregistered sensor {} ignored", sensor),
        }
    }

    fn alarm_status(&self) -> AlarmStatus {
        self.alarm_status
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) {
        self.alarm_status = status;
    }

    fn arming_status(&self) -> ArmingStatus {
        self.arming_status
    }

    fn set_arming_status(&mut self, status: ArmingStatus) {
        self.arming_status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorType;

    #[test]
    fn test_defaults() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.alarm_status(), AlarmStatus::NoAlarm);
        assert_eq!(repo.arming_status(), ArmingStatus::Disarmed);
        assert!(repo.sensors().is_empty());
    }

    #[test]
    fn test_sensor_appears_once() {
        let mut repo = InMemoryRepository::new();
        let sensor = Sensor::new("Front Door", SensorType::Door);

        repo.add_sensor(sensor.clone());
        repo.add_sensor(sensor.clone());
        assert_eq!(repo.sensors().len(), 1);

        repo.remove_sensor(&sensor);
        assert!(repo.sensors().is_empty());
        // Removing again is harmless
        repo.remove_sensor(&sensor);
    }

    #[test]
    fn test_update_overwrites_stored_copy() {
        let mut repo = InMemoryRepository::new();
        let mut sensor = Sensor::new("Garage", SensorType::Motion);
        repo.add_sensor(sensor.clone());

        sensor.set_active(true);
        repo.update_sensor(&sensor);
        assert!(repo.sensors()[0].is_active());
    }

    #[test]
    fn test_update_unknown_sensor_does_not_insert() {
        let mut repo = InMemoryRepository::new();
        repo.update_sensor(&Sensor::new("Ghost", SensorType::Window));
        assert!(repo.sensors().is_empty());
    }
}
