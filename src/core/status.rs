// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Alarm and arming status values

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current severity of the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    /// Nothing suspicious
    #[default]
    NoAlarm,
    /// One armed sensor tripped
    PendingAlarm,
    /// Full alarm
    Alarm,
}

impl AlarmStatus {
    /// Human readable description for status displays
    pub fn description(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "All quiet",
            AlarmStatus::PendingAlarm => "Something moved...",
            AlarmStatus::Alarm => "Intruder alert!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlarmStatus::NoAlarm => "no_alarm",
            AlarmStatus::PendingAlarm => "pending_alarm",
            AlarmStatus::Alarm => "alarm",
        };
        f.write_str(label)
    }
}

/// Guard mode of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    /// Sensors are ignored
    #[default]
    Disarmed,
    /// Occupants at home, camera cats raise the alarm
    ArmedHome,
    /// House empty
    ArmedAway,
}

impl ArmingStatus {
    /// Either armed mode
    pub fn is_armed(&self) -> bool {
        !matches!(self, ArmingStatus::Disarmed)
    }

    /// Human readable description for status displays
    pub fn description(&self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "Disarmed",
            ArmingStatus::ArmedHome => "Armed - At Home",
            ArmingStatus::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArmingStatus::Disarmed => "disarmed",
            ArmingStatus::ArmedHome => "armed_home",
            ArmingStatus::ArmedAway => "armed_away",
        };
        f.write_str(label)
    }
}
