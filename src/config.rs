use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub frontend_dir: PathBuf,
    pub alert_interval_secs: u64,
    pub alert_probability: f64,
    pub geocoder_base_url: String,
    pub geocoder_timeout_ms: u64,
    pub geocoder_user_agent: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "1501".to_string())
            .parse()
            .unwrap_or(1501);
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let frontend_dir = env::var("FRONTEND_DIR")
            .unwrap_or_else(|_| "../frontend".to_string())
            .into();

        let alert_interval_secs = env::var("ALERT_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let alert_probability = env::var("ALERT_PROBABILITY")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|p| (0.0..=1.0).contains(p))
            .unwrap_or(0.3);

        let geocoder_base_url = env::var("GEOCODER_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());
        let geocoder_timeout_ms = env::var("GEOCODER_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .unwrap_or(10_000);
        let geocoder_user_agent =
            env::var("GEOCODER_USER_AGENT").unwrap_or_else(|_| "citypulse/0.1".to_string());

        Ok(Self {
            host,
            port,
            log_level,
            frontend_dir,
            alert_interval_secs,
            alert_probability,
            geocoder_base_url,
            geocoder_timeout_ms,
            geocoder_user_agent,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
