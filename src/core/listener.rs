// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Status listeners and the registry the service fans out to

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use super::AlarmStatus;

/// Observer of security system changes.
///
/// Callbacks run synchronously, after the operation that caused them has
/// committed its changes and released the state lock. Implementations may
/// read the service (`sensors()`, `alarm_status()`, `snapshot()`) and
/// register or unregister listeners from a callback. They must not start
/// another state-changing operation on the same thread: operations are
/// serialised until their notifications have been delivered.
pub trait StatusListener: Send + Sync {
    /// Alarm status was written
    fn notify(&self, status: AlarmStatus);

    /// An image was analysed
    fn cat_detected(&self, cat: bool);

    /// Arming changed and sensors may have been reset
    fn sensor_status_changed(&self);
}

/// Registered listeners, unique by handle identity, in registration order
#[derive(Default)]
pub struct ListenerSet {
    listeners: RwLock<Vec<Arc<dyn StatusListener>>>,
}

fn same_listener(a: &Arc<dyn StatusListener>, b: &Arc<dyn StatusListener>) -> bool {
    // Compare data pointers only, vtable pointers are not guaranteed unique
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl ListenerSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; registering the same handle twice is a no-op
    pub fn add(&self, listener: Arc<dyn StatusListener>) -> bool {
        let mut listeners = self.listeners.write();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Unregister a listener; unknown handles are ignored
    pub fn remove(&self, listener: &Arc<dyn StatusListener>) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        before != listeners.len()
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// True when nobody is listening
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Copy of the current registrations, so delivery is unaffected by
    /// listeners changing the set mid-notification
    pub fn snapshot(&self) -> Vec<Arc<dyn StatusListener>> {
        self.listeners.read().clone()
    }

    /// Deliver an alarm status change to everyone
    pub fn notify(&self, status: AlarmStatus) {
        for listener in self.snapshot() {
            listener.notify(status);
        }
    }

    /// Deliver an image analysis outcome to everyone
    pub fn cat_detected(&self, cat: bool) {
        for listener in self.snapshot() {
            listener.cat_detected(cat);
        }
    }

    /// Tell everyone the sensor states may have changed
    pub fn sensor_status_changed(&self) {
        for listener in self.snapshot() {
            listener.sensor_status_changed();
        }
    }
}

/// Listener that writes every notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl StatusListener for LoggingListener {
    fn notify(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!(alarm = %status, "🚨 {}", status.description()),
            _ => info!(alarm = %status, "{}", status.description()),
        }
    }

    fn cat_detected(&self, cat: bool) {
        if cat {
            warn!("🐈 Camera sees a cat");
        } else {
            info!("Camera frame clear");
        }
    }

    fn sensor_status_changed(&self) {
        info!("Sensor states refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        notified: AtomicUsize,
    }

    impl StatusListener for Counter {
        fn notify(&self, _status: AlarmStatus) {
            self.notified.fetch_add(1, Ordering::SeqCst);
        }
        fn cat_detected(&self, _cat: bool) {}
        fn sensor_status_changed(&self) {}
    }

    /// Removes `victim` from the set the first time it is notified
    struct Remover {
        set: Arc<ListenerSet>,
        victim: Arc<dyn StatusListener>,
    }

    impl StatusListener for Remover {
        fn notify(&self, _status: AlarmStatus) {
            self.set.remove(&self.victim);
        }
        fn cat_detected(&self, _cat: bool) {}
        fn sensor_status_changed(&self) {}
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let set = ListenerSet::new();
        let counter = Arc::new(Counter::default());
        let handle: Arc<dyn StatusListener> = counter.clone();

        assert!(set.add(handle.clone()));
        assert!(!set.add(handle));
        assert_eq!(set.len(), 1);

        set.notify(AlarmStatus::Alarm);
        assert_eq!(counter.notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_add_then_remove_leaves_empty() {
        let set = ListenerSet::new();
        let handle: Arc<dyn StatusListener> = Arc::new(Counter::default());

        set.add(handle.clone());
        assert!(set.remove(&handle));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let set = ListenerSet::new();
        let registered: Arc<dyn StatusListener> = Arc::new(Counter::default());
        let stranger: Arc<dyn StatusListener> = Arc::new(Counter::default());

        set.add(registered);
        assert!(!set.remove(&stranger));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_removal_during_notification_uses_snapshot() {
        let set = Arc::new(ListenerSet::new());
        let counter = Arc::new(Counter::default());
        let victim: Arc<dyn StatusListener> = counter.clone();
        let remover: Arc<dyn StatusListener> = Arc::new(Remover {
            set: set.clone(),
            victim: victim.clone(),
        });

        set.add(remover);
        set.add(victim);

        // The victim is still in this round's snapshot
        set.notify(AlarmStatus::PendingAlarm);
        assert_eq!(counter.notified.load(Ordering::SeqCst), 1);
        assert_eq!(set.len(), 1);

        set.notify(AlarmStatus::Alarm);
        assert_eq!(counter.notified.load(Ordering::SeqCst), 1);
    }
}
