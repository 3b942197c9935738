// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Core module - alarm decision engine and status fan-out

mod status;
mod listener;
mod event_bus;
mod service;

pub use status::{AlarmStatus, ArmingStatus};
pub use listener::{ListenerSet, LoggingListener, StatusListener};
pub use event_bus::{drain_alarm_count, EventBus, EventPayload, StatusEvent};
pub use service::{SecurityService, CAT_CONFIDENCE_THRESHOLD};

use serde::{Deserialize, Serialize};

use crate::sensors::Sensor;

/// Point-in-time view of the whole system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Current alarm status
    pub alarm_status: AlarmStatus,
    /// Current arming status
    pub arming_status: ArmingStatus,
    /// Outcome of the most recent image analysis
    pub cat_detected: bool,
    /// Every registered sensor, ordered by name
    pub sensors: Vec<Sensor>,
}

impl SystemSnapshot {
    /// Number of sensors currently tripped
    pub fn active_sensors(&self) -> usize {
        self.sensors.iter().filter(|s| s.is_active()).count()
    }
}
