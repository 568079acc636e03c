//! Outward change notification
//!
//! Every mutation flows through the ChangeNotifier to the host as a
//! ConfigChangedEvent over an unbounded channel. Direct edits notify
//! synchronously; the one migration-triggered notification at setup time
//! is parked in a deferred slot instead, so it cannot race the hosting
//! element's own initialization, and is guaranteed to be delivered before
//! any user-triggered notification.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace};
use ulid::Ulid;

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyOrigin {
    /// A direct user edit (field change or list mutation)
    Edit,
    /// The one-shot legacy migration at initialization
    Migration,
}

/// The "configuration changed" signal carrying the full canonical config
#[derive(Debug, Clone, Serialize)]
pub struct ConfigChangedEvent {
    pub config: Value,
    pub origin: NotifyOrigin,
    pub event_id: String,
    pub time_fired: DateTime<Utc>,
}

impl ConfigChangedEvent {
    fn new(config: Value, origin: NotifyOrigin) -> Self {
        Self {
            config,
            origin,
            event_id: Ulid::new().to_string(),
            time_fired: Utc::now(),
        }
    }
}

/// Packages mutations into outward notifications
pub struct ChangeNotifier {
    tx: mpsc::UnboundedSender<ConfigChangedEvent>,
    deferred: Mutex<Option<ConfigChangedEvent>>,
}

impl ChangeNotifier {
    /// Create a notifier and the receiver the host listens on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConfigChangedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                deferred: Mutex::new(None),
            },
            rx,
        )
    }

    /// Notify immediately for a direct user edit.
    ///
    /// A pending deferred migration event is delivered first, keeping it
    /// strictly ordered before every user-triggered notification.
    pub fn notify(&self, config: Value) {
        self.flush_deferred();
        self.send(ConfigChangedEvent::new(config, NotifyOrigin::Edit));
    }

    /// Park the migration notification instead of sending it during setup.
    ///
    /// Once parked it always fires: either through [`flush_deferred`]
    /// (called by the host when initialization completes) or ahead of the
    /// next direct edit, whichever comes first.
    ///
    /// [`flush_deferred`]: Self::flush_deferred
    pub fn defer(&self, config: Value) {
        debug!("deferring migration notification");
        let mut slot = self.deferred.lock().expect("notifier mutex poisoned");
        *slot = Some(ConfigChangedEvent::new(config, NotifyOrigin::Migration));
    }

    /// Deliver the pending deferred notification, if one is parked
    pub fn flush_deferred(&self) {
        let pending = self.deferred.lock().expect("notifier mutex poisoned").take();
        if let Some(event) = pending {
            self.send(event);
        }
    }

    fn send(&self, event: ConfigChangedEvent) {
        trace!(origin = ?event.origin, "dispatching config-changed");
        // A closed channel just means the host went away
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_edit_notifies_immediately() {
        let (notifier, mut rx) = ChangeNotifier::new();
        notifier.notify(json!({"name": "a"}));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.origin, NotifyOrigin::Edit);
        assert_eq!(event.config, json!({"name": "a"}));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_deferred_not_sent_synchronously() {
        let (notifier, mut rx) = ChangeNotifier::new();
        notifier.defer(json!({}));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_deferred_delivered_before_edit() {
        let (notifier, mut rx) = ChangeNotifier::new();
        notifier.defer(json!({"migrated": true}));
        notifier.notify(json!({"edited": true}));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.origin, NotifyOrigin::Migration);
        assert_eq!(second.origin, NotifyOrigin::Edit);
    }

    #[test]
    fn test_flush_fires_once() {
        let (notifier, mut rx) = ChangeNotifier::new();
        notifier.defer(json!({}));
        notifier.flush_deferred();
        notifier.flush_deferred();

        let event = tokio_test::block_on(rx.recv()).unwrap();
        assert_eq!(event.origin, NotifyOrigin::Migration);
        assert!(rx.try_recv().is_err());
    }
}
