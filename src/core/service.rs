// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Security service - the alarm decision engine

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{AlarmStatus, ArmingStatus, ListenerSet, StatusListener, SystemSnapshot};
use crate::error::SecurityError;
use crate::image::{Frame, ImageAnalyzer};
use crate::repository::SecurityRepository;
use crate::sensors::Sensor;

/// Confidence (percent) a frame must reach before it counts as a cat
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Listener callback queued while the state lock is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    Alarm(AlarmStatus),
    Cat(bool),
    Sensors,
}

struct State {
    repository: Box<dyn SecurityRepository>,
    image_analyzer: Box<dyn ImageAnalyzer>,
    cat_detected: bool,
    pending: Vec<Notice>,
}

impl State {
    fn all_sensors_inactive(&self) -> bool {
        self.repository.sensors().iter().all(|s| !s.is_active())
    }

    /// Active flag of the stored copy, `None` if the sensor is not registered
    fn stored_active(&self, sensor: &Sensor) -> Option<bool> {
        self.repository
            .sensors()
            .iter()
            .find(|s| s.id() == sensor.id())
            .map(Sensor::is_active)
    }

    fn apply_alarm_status(&mut self, status: AlarmStatus) {
        self.repository.set_alarm_status(status);
        info!(alarm = %status, "Alarm status set");
        self.pending.push(Notice::Alarm(status));
    }

    fn handle_sensor_activated(&mut self) {
        if self.repository.arming_status() == ArmingStatus::Disarmed {
            debug!("Sensor activated while disarmed, ignoring");
            return;
        }
        match self.repository.alarm_status() {
            AlarmStatus::NoAlarm => self.apply_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.apply_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => {}
        }
    }

    fn handle_sensor_deactivated(&mut self) {
        match self.repository.alarm_status() {
            AlarmStatus::PendingAlarm => self.apply_alarm_status(AlarmStatus::NoAlarm),
            // A full alarm is never walked back by a sensor
            AlarmStatus::Alarm | AlarmStatus::NoAlarm => {}
        }
    }
}

/// Receives changes to the security system, forwards them to the
/// repository and decides how the alarm status moves.
///
/// State-changing operations are serialised by an operation lock held until
/// their listeners have been notified, so notifications from two operations
/// never interleave. The state itself sits behind a second lock that is
/// released before any listener runs, which lets callbacks read the service.
pub struct SecurityService {
    operation: Mutex<()>,
    state: Mutex<State>,
    listeners: ListenerSet,
}

impl SecurityService {
    /// Service over the given repository and camera analyzer
    pub fn new(
        repository: impl SecurityRepository + 'static,
        image_analyzer: impl ImageAnalyzer + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(repository), Box::new(image_analyzer))
    }

    /// Same as [`SecurityService::new`] for collaborators chosen at runtime
    pub fn from_boxed(
        repository: Box<dyn SecurityRepository>,
        image_analyzer: Box<dyn ImageAnalyzer>,
    ) -> Self {
        Self {
            operation: Mutex::new(()),
            state: Mutex::new(State {
                repository,
                image_analyzer,
                cat_detected: false,
                pending: Vec::new(),
            }),
            listeners: ListenerSet::new(),
        }
    }

    /// Run `op` against the state, then deliver what it queued.
    ///
    /// The state lock is dropped before delivery. The operation lock is not.
    fn run_operation<T>(&self, op: impl FnOnce(&mut State) -> T) -> T {
        let _operation = self.operation.lock();
        let (result, notices) = {
            let mut state = self.state.lock();
            let result = op(&mut *state);
            (result, std::mem::take(&mut state.pending))
        };
        for notice in notices {
            match notice {
                Notice::Alarm(status) => self.listeners.notify(status),
                Notice::Cat(cat) => self.listeners.cat_detected(cat),
                Notice::Sensors => self.listeners.sensor_status_changed(),
            }
        }
        result
    }

    /// Change the arming status.
    ///
    /// Disarming clears the alarm. Arming resets every active sensor and
    /// raises the alarm straight away if the camera last saw a cat.
    pub fn set_arming_status(&self, arming_status: ArmingStatus) {
        self.run_operation(|state| {
            match arming_status {
                ArmingStatus::Disarmed => state.apply_alarm_status(AlarmStatus::NoAlarm),
                ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => {
                    // Direct reset, not a sensor event
                    for mut sensor in state.repository.sensors() {
                        if sensor.is_active() {
                            sensor.set_active(false);
                            state.repository.update_sensor(&sensor);
                            debug!("Reset {} on arming", sensor);
                        }
                    }
                    if state.cat_detected {
                        state.apply_alarm_status(AlarmStatus::Alarm);
                    }
                }
            }

            state.repository.set_arming_status(arming_status);
            info!(arming = %arming_status, "Arming status set: {}", arming_status.description());
            state.pending.push(Notice::Sensors);
        })
    }

    /// Change the activation status of `sensor` and update the alarm
    /// status if necessary.
    ///
    /// The transition starts from the repository's copy of the sensor, so a
    /// handle left stale by an arming reset cannot fire a deactivation. The
    /// caller's flag is only used for sensors that are not registered. The
    /// new flag is written back to the repository and to `sensor` even when
    /// no rule fires.
    pub fn change_sensor_activation_status(&self, sensor: &mut Sensor, active: bool) {
        self.run_operation(|state| {
            let was_active = state.stored_active(sensor).unwrap_or_else(|| sensor.is_active());

            match (was_active, active) {
                (false, true) | (true, true) => state.handle_sensor_activated(),
                (true, false) => state.handle_sensor_deactivated(),
                (false, false) => {}
            }

            sensor.set_active(active);
            state.repository.update_sensor(sensor);
            debug!(was_active, active, "Sensor {} updated", sensor);
        })
    }

    /// Run `frame` through the image analyzer and update the alarm status.
    ///
    /// An analyzer failure is returned untouched, before any state change.
    pub fn process_image(&self, frame: &Frame) -> Result<(), SecurityError> {
        self.run_operation(|state| -> Result<(), SecurityError> {
            let cat = match state
                .image_analyzer
                .image_contains_cat(frame, CAT_CONFIDENCE_THRESHOLD)
            {
                Ok(cat) => cat,
                Err(e) => {
                    warn!("Image analysis failed: {}", e);
                    return Err(e.into());
                }
            };

            state.cat_detected = cat;

            if cat && state.repository.arming_status() == ArmingStatus::ArmedHome {
                state.apply_alarm_status(AlarmStatus::Alarm);
            } else if state.all_sensors_inactive() {
                state.apply_alarm_status(AlarmStatus::NoAlarm);
            } else {
                debug!(cat, "Frame processed, sensors still active, alarm unchanged");
            }

            state.pending.push(Notice::Cat(cat));
            Ok(())
        })
    }

    /// Change the alarm status and notify all listeners
    pub fn set_alarm_status(&self, status: AlarmStatus) {
        self.run_operation(|state| state.apply_alarm_status(status))
    }

    /// Register a listener; adding the same handle twice has no effect
    pub fn add_status_listener(&self, listener: Arc<dyn StatusListener>) {
        self.listeners.add(listener);
    }

    /// Unregister a listener; unknown handles are ignored
    pub fn remove_status_listener(&self, listener: &Arc<dyn StatusListener>) {
        self.listeners.remove(listener);
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Register a sensor, no rules run
    pub fn add_sensor(&self, sensor: Sensor) {
        info!("Added sensor: {}", sensor);
        self.state.lock().repository.add_sensor(sensor);
    }

    /// Unregister a sensor, no rules run
    pub fn remove_sensor(&self, sensor: &Sensor) {
        info!("Removed sensor: {}", sensor);
        self.state.lock().repository.remove_sensor(sensor);
    }

    /// Current alarm status
    pub fn alarm_status(&self) -> AlarmStatus {
        self.state.lock().repository.alarm_status()
    }

    /// Current arming status
    pub fn arming_status(&self) -> ArmingStatus {
        self.state.lock().repository.arming_status()
    }

    /// Every registered sensor, ordered by name
    pub fn sensors(&self) -> Vec<Sensor> {
        self.state.lock().repository.sensors()
    }

    /// Outcome of the most recent image analysis
    pub fn cat_detected(&self) -> bool {
        self.state.lock().cat_detected
    }

    /// Consistent view of everything at once
    pub fn snapshot(&self) -> SystemSnapshot {
        let state = self.state.lock();
        SystemSnapshot {
            alarm_status: state.repository.alarm_status(),
            arming_status: state.repository.arming_status(),
            cat_detected: state.cat_detected,
            sensors: state.repository.sensors(),
        }
    }
}
