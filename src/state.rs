use crate::alerts::store::AlertStore;
use crate::db::Database;
use crate::geocoding::Geocoder;
use crate::realtime::broadcaster::Broadcaster;
use crate::realtime::session::SessionLayer;
use std::sync::Arc;

/// Services shared by every handler, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub alerts: Arc<AlertStore>,
    pub broadcaster: Broadcaster,
    pub sessions: Arc<SessionLayer>,
    pub geocoder: Arc<dyn Geocoder>,
}

impl AppState {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        let broadcaster = Broadcaster::new();
        let alerts = Arc::new(AlertStore::new(broadcaster.clone()));
        let sessions = Arc::new(SessionLayer::new(alerts.clone(), broadcaster.clone()));

        Self {
            db: Arc::new(Database::with_demo_data()),
            alerts,
            broadcaster,
            sessions,
            geocoder,
        }
    }
}
