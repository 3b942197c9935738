// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Sensor entity and sensor kinds

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of sensor the controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    /// Door contact
    Door,
    /// Window contact
    Window,
    /// Passive motion detector
    Motion,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SensorType::Door => "door",
            SensorType::Window => "window",
            SensorType::Motion => "motion",
        };
        f.write_str(label)
    }
}

/// A binary sensor registered with the security system.
///
/// Identity is the generated [`Uuid`]: two handles with the same id are the
/// same sensor no matter what their `active` flag says. Sensors order by
/// name, then type, then id, which keeps listings stable for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    id: Uuid,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// Create a new, inactive sensor
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    /// Stable identity of this sensor
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Door, window or motion
    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    /// Whether the sensor is currently tripped
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Change the flag on this copy only, no rules run
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            return Ordering::Equal;
        }
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
            .then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sensor_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_sensor_is_inactive() {
        let sensor = Sensor::new("Front Door", SensorType::Door);
        assert!(!sensor.is_active());
        assert_eq!(sensor.name(), "Front Door");
        assert_eq!(sensor.sensor_type(), SensorType::Door);
    }

    #[test]
    fn test_identity_ignores_active_flag() {
        let sensor = Sensor::new("Hallway", SensorType::Motion);
        let mut copy = sensor.clone();
        copy.set_active(true);

        assert_eq!(sensor, copy);

        let mut set = HashSet::new();
        set.insert(sensor);
        set.insert(copy);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_name_and_type_are_distinct_sensors() {
        let a = Sensor::new("Kitchen", SensorType::Window);
        let b = Sensor::new("Kitchen", SensorType::Window);
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_ordering_by_name_then_type() {
        let mut sensors = vec![
            Sensor::new("Garage", SensorType::Motion),
            Sensor::new("Back Door", SensorType::Door),
            Sensor::new("Garage", SensorType::Door),
        ];
        sensors.sort();

        let labels: Vec<String> = sensors.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["Back Door (door)", "Garage (door)", "Garage (motion)"]);
    }
}
