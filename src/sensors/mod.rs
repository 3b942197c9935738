// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Sensor module - the binary devices watched by the controller

mod sensor;

pub use sensor::{Sensor, SensorType};
