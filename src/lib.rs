// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! HearthGuard - Home Security Controller
//!
//! Tracks door, window and motion sensors, the arming mode and the alarm
//! status, and decides how sensor activity, arming changes and camera
//! frames move the alarm between states.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    SecurityService                       │
//! │     (alarm rules, cat flag, operation + state locks)     │
//! ├──────────────────────────────────────────────────────────┤
//! │        ↓                    ↓                  ↓         │
//! │  ┌────────────┐      ┌──────────────┐   ┌─────────────┐  │
//! │  │ Repository │      │ImageAnalyzer │   │ ListenerSet │  │
//! │  │  sensors   │      │  cat / no cat│   │  EventBus   │  │
//! │  │  statuses  │      │              │   │  Logging    │  │
//! │  └────────────┘      └──────────────┘   └─────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Alarm status moves like this:
//!
//! ```text
//! NoAlarm      --(sensor activates, armed)-----> PendingAlarm
//! PendingAlarm --(sensor activates, armed)-----> Alarm
//! PendingAlarm --(sensor deactivates)----------> NoAlarm
//! any          --(disarmed)--------------------> NoAlarm
//! any          --(cat seen while armed home)---> Alarm
//! any          --(no cat, all sensors idle)----> NoAlarm
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod sensors;
pub mod repository;
pub mod image;
pub mod scenario;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use core::{AlarmStatus, ArmingStatus, EventBus, SecurityService, StatusListener};
pub use error::{AnalyzerError, SecurityError};
pub use image::{Frame, ImageAnalyzer};
pub use repository::{InMemoryRepository, SecurityRepository};
pub use sensors::{Sensor, SensorType};

/// HearthGuard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// HearthGuard name
pub const NAME: &str = "HearthGuard";
