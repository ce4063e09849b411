use crate::models::alert::{alert_ttl, Alert, AlertKind, Coordinates, Severity};
use crate::realtime::broadcaster::Broadcaster;
use crate::realtime::events::SessionId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::info;

/// Registry of every alert raised since startup.
///
/// Expired alerts stay in the backing vector and are filtered out on read.
pub struct AlertStore {
    inner: Mutex<Inner>,
    broadcaster: Broadcaster,
}

struct Inner {
    next_id: u64,
    alerts: Vec<Alert>,
}

impl Inner {
    fn active_at(&self, now: DateTime<Utc>) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.is_active_at(now))
            .cloned()
            .collect()
    }
}

impl AlertStore {
    pub fn new(broadcaster: Broadcaster) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                alerts: Vec::new(),
            }),
            broadcaster,
        }
    }

    /// Records a new alert and pushes it to every connected session.
    ///
    /// The broadcast happens while the store lock is held, so sessions
    /// observe `new_alert` events in id order.
    pub fn add(
        &self,
        kind: AlertKind,
        severity: Severity,
        area: impl Into<String>,
        description: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Alert {
        let mut inner = self.inner.lock();

        let created_at = Utc::now();
        let alert = Alert {
            id: inner.next_id,
            kind,
            severity,
            area: area.into(),
            description: description.into(),
            coordinates,
            created_at,
            expires_at: created_at + alert_ttl(),
        };
        inner.next_id += 1;
        inner.alerts.push(alert.clone());

        info!(
            "Raised alert {} ({}, {:?}) in {}",
            alert.id,
            alert.kind.as_str(),
            alert.severity,
            alert.area
        );
        self.broadcaster.broadcast_new(&alert);

        alert
    }

    pub fn active_alerts(&self) -> Vec<Alert> {
        self.active_alerts_at(Utc::now())
    }

    /// Alerts with `expires_at > now`, in insertion order.
    pub fn active_alerts_at(&self, now: DateTime<Utc>) -> Vec<Alert> {
        self.inner.lock().active_at(now)
    }

    /// Sends the active alerts to one session and returns how many were sent.
    ///
    /// Runs under the store lock, like `add`: an alert either appears in the
    /// snapshot or reaches the session as `new_alert` after it.
    pub fn send_snapshot(&self, id: SessionId) -> usize {
        let inner = self.inner.lock();
        let snapshot = inner.active_at(Utc::now());
        let count = snapshot.len();
        self.broadcaster.send_snapshot(id, snapshot);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::events::ServerEvent;
    use chrono::Duration;
    use std::sync::Arc;

    fn store() -> AlertStore {
        AlertStore::new(Broadcaster::new())
    }

    #[test]
    fn test_first_alert_is_active() {
        let store = store();
        let alert = store.add(AlertKind::Traffic, Severity::High, "Downtown", "Accident", None);

        assert_eq!(alert.id, 1);
        assert_eq!(alert.severity, Severity::High);

        let active = store.active_alerts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 1);
    }

    #[test]
    fn test_ids_increase_from_one() {
        let store = store();
        let ids: Vec<u64> = (0..5)
            .map(|i| {
                store
                    .add(AlertKind::WaterMain, Severity::Low, "East Side", format!("Leak {i}"), None)
                    .id
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_alerts_expire_after_six_hours() {
        let store = store();
        let alert = store.add(AlertKind::RoadClosure, Severity::Medium, "North District", "Parade", None);

        assert_eq!(alert.expires_at - alert.created_at, Duration::hours(6));
        assert_eq!(store.active_alerts_at(alert.expires_at - Duration::seconds(1)).len(), 1);
        assert!(store.active_alerts_at(alert.expires_at).is_empty());
        assert!(store.active_alerts_at(alert.expires_at + Duration::minutes(1)).is_empty());
    }

    #[test]
    fn test_active_view_keeps_insertion_order() {
        let store = store();
        let add = |area: &str| {
            let alert = store.add(AlertKind::Traffic, Severity::Low, area, "Congestion", None);
            std::thread::sleep(std::time::Duration::from_millis(2));
            alert
        };
        let first = add("Downtown");
        let second = add("East Side");
        let _third = add("South District");
        let _fourth = add("North District");

        let ids = |now| -> Vec<u64> { store.active_alerts_at(now).iter().map(|a| a.id).collect() };
        assert_eq!(ids(first.created_at), vec![1, 2, 3, 4]);
        assert_eq!(ids(first.expires_at), vec![2, 3, 4]);
        assert_eq!(ids(second.expires_at), vec![3, 4]);
    }

    #[test]
    fn test_snapshot_goes_to_one_session() {
        let broadcaster = Broadcaster::new();
        let target = SessionId::new();
        let mut rx_target = broadcaster.register(target, None);
        let mut rx_other = broadcaster.register(SessionId::new(), None);
        let store = AlertStore::new(broadcaster);
        store.add(AlertKind::Traffic, Severity::Low, "Downtown", "Congestion", None);
        while rx_target.try_recv().is_ok() {}
        while rx_other.try_recv().is_ok() {}

        assert_eq!(store.send_snapshot(target), 1);
        assert!(matches!(rx_target.try_recv().unwrap(), ServerEvent::AlertsUpdate(a) if a.len() == 1));
        assert!(rx_other.try_recv().is_err());
        assert_eq!(store.send_snapshot(SessionId::new()), 1);
    }

    #[test]
    fn test_add_broadcasts_in_id_order() {
        let broadcaster = Broadcaster::new();
        let mut rx = broadcaster.register(SessionId::new(), None);
        let store = Arc::new(AlertStore::new(broadcaster));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.add(AlertKind::Traffic, Severity::Low, "Downtown", "Queue", None)
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<u64> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|event| match event {
                ServerEvent::NewAlert(a) => Some(a.id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    }
}
