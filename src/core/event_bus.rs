// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Event bus that republishes listener callbacks to channel subscribers

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

use super::{AlarmStatus, StatusListener};

/// Kind of change carried by a [`StatusEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    /// Alarm status was written
    AlarmChanged(AlarmStatus),
    /// Outcome of an image analysis
    CatDetected(bool),
    /// Arming changed
    SensorsChanged,
}

/// Numbered status event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Sequence number, starting at zero
    pub id: u64,
    /// What happened
    pub payload: EventPayload,
}

/// Broadcast fan-out of security status changes.
///
/// Register it with the service as a [`StatusListener`] and hand receivers
/// out through [`EventBus::subscribe`]. Slow receivers lag rather than block
/// the service.
pub struct EventBus {
    event_tx: broadcast::Sender<StatusEvent>,
    event_counter: AtomicU64,
}

impl EventBus {
    /// `capacity` events are retained per receiver before it lags.
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);

        Self {
            event_tx,
            event_counter: AtomicU64::new(0),
        }
    }

    /// New receiver seeing events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.event_tx.subscribe()
    }

    /// Number of events published so far
    pub fn published(&self) -> u64 {
        self.event_counter.load(Ordering::Relaxed)
    }

    fn publish(&self, payload: EventPayload) {
        let id = self.event_counter.fetch_add(1, Ordering::Relaxed);
        // No subscribers is fine
        let _ = self.event_tx.send(StatusEvent { id, payload });
    }
}

/// Drain everything `events` has buffered and count the full alarms.
///
/// A lagged receiver skips the overwritten events and keeps going.
pub fn drain_alarm_count(events: &mut broadcast::Receiver<StatusEvent>) -> usize {
    let mut alarms = 0;
    loop {
        match events.try_recv() {
            Ok(event) => {
                if event.payload == EventPayload::AlarmChanged(AlarmStatus::Alarm) {
                    alarms += 1;
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Event receiver lagged, {} event(s) not counted", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    alarms
}

impl StatusListener for EventBus {
    fn notify(&self, status: AlarmStatus) {
        self.publish(EventPayload::AlarmChanged(status));
    }

    fn cat_detected(&self, cat: bool) {
        self.publish(EventPayload::CatDetected(cat));
    }

    fn sensor_status_changed(&self) {
        self.publish(EventPayload::SensorsChanged);
    }
}
