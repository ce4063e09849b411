use super::store::AlertStore;
use crate::models::alert::{Alert, AlertKind, Severity};
use crate::realtime::broadcaster::Broadcaster;
use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub const SIMULATED_AREAS: [&str; 4] = ["Downtown", "North District", "South District", "East Side"];
pub const SIMULATED_DESCRIPTION: &str = "Simulated alert for testing purposes";

/// Periodically injects synthetic alerts and "data updated" notices.
pub struct AlertGenerator {
    store: Arc<AlertStore>,
    broadcaster: Broadcaster,
    period: Duration,
    probability: f64,
    rng: SmallRng,
}

impl AlertGenerator {
    pub fn new(
        store: Arc<AlertStore>,
        broadcaster: Broadcaster,
        period: Duration,
        probability: f64,
    ) -> Self {
        Self {
            store,
            broadcaster,
            period,
            probability: probability.clamp(0.0, 1.0),
            rng: SmallRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    /// Starts the generator on the current runtime. The first tick fires one
    /// period after start; the task runs until the runtime shuts down or the
    /// returned handle is aborted.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            "Starting alert generator (every {:?}, p={})",
            self.period, self.probability
        );
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick();
        }
    }

    /// One generator step. Returns the synthetic alert, if one was raised.
    pub fn tick(&mut self) -> Option<Alert> {
        let alert = if self.rng.gen_bool(self.probability) {
            let kind = AlertKind::SIMULATED[self.rng.gen_range(0..AlertKind::SIMULATED.len())].clone();
            let severity = Severity::ALL[self.rng.gen_range(0..Severity::ALL.len())];
            let area = SIMULATED_AREAS[self.rng.gen_range(0..SIMULATED_AREAS.len())];

            Some(self.store.add(kind, severity, area, SIMULATED_DESCRIPTION, None))
        } else {
            debug!("Generator tick without alert");
            None
        };

        self.broadcaster.broadcast_infrastructure_update(Utc::now());
        alert
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::events::{ServerEvent, SessionId};

    fn generator(probability: f64) -> (AlertGenerator, Arc<AlertStore>, Broadcaster) {
        let broadcaster = Broadcaster::new();
        let store = Arc::new(AlertStore::new(broadcaster.clone()));
        let generator = AlertGenerator::new(
            store.clone(),
            broadcaster.clone(),
            Duration::from_secs(30),
            probability,
        )
        .with_rng(SmallRng::seed_from_u64(7));
        (generator, store, broadcaster)
    }

    #[test]
    fn test_certain_tick_raises_simulated_alert() {
        let (mut generator, store, broadcaster) = generator(1.0);
        let mut rx = broadcaster.register(SessionId::new(), None);

        let alert = generator.tick().expect("alert expected at p=1");
        assert!(AlertKind::SIMULATED.contains(&alert.kind));
        assert!(SIMULATED_AREAS.contains(&alert.area.as_str()));
        assert_eq!(alert.description, SIMULATED_DESCRIPTION);
        assert!(alert.coordinates.is_none());
        assert_eq!(store.active_alerts().len(), 1);

        assert!(matches!(rx.try_recv().unwrap(), ServerEvent::NewAlert(a) if a.id == alert.id));
        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerEvent::InfrastructureUpdate { message, .. } if message == "Infrastructure data updated"
        ));
    }

    #[test]
    fn test_update_notice_is_unconditional() {
        let (mut generator, store, broadcaster) = generator(0.0);
        let mut rx = broadcaster.register(SessionId::new(), None);

        for _ in 0..3 {
            assert!(generator.tick().is_none());
        }

        assert!(store.active_alerts().is_empty());
        let updates = std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|event| matches!(event, ServerEvent::InfrastructureUpdate { .. }))
            .count();
        assert_eq!(updates, 3);
    }

    #[test]
    fn test_choices_cover_all_options() {
        let (mut generator, _store, _broadcaster) = generator(1.0);
        let alerts: Vec<Alert> = (0..200).filter_map(|_| generator.tick()).collect();

        for kind in AlertKind::SIMULATED.iter() {
            assert!(alerts.iter().any(|a| &a.kind == kind));
        }
        for severity in Severity::ALL {
            assert!(alerts.iter().any(|a| a.severity == severity));
        }
        for area in SIMULATED_AREAS {
            assert!(alerts.iter().any(|a| a.area == area));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_generator_ticks_on_period() {
        let (generator, _store, broadcaster) = generator(0.0);
        let mut rx = broadcaster.register(SessionId::new(), None);
        let handle = generator.spawn();

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(matches!(rx.recv().await, Some(ServerEvent::InfrastructureUpdate { .. })));

        handle.abort();
    }
}
