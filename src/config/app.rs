use crate::services::TransitionPolicy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `*` or a comma separated list of origins.
    pub cors_origins: String,
    pub transitions: TransitionPolicy,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: "*".to_string(),
            transitions: TransitionPolicy::Open,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Read from the environment. Unset variables keep their defaults;
    /// malformed ones are an error so a typo cannot silently change policy.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = Self::default();

        if let Some(host) = lookup("HOST") {
            cfg.host = host;
        }
        if let Some(port) = lookup("PORT") {
            cfg.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid PORT '{}'", port))?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            cfg.cors_origins = origins;
        }
        if let Some(raw) = lookup("STATUS_TRANSITIONS") {
            cfg.transitions = raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid STATUS_TRANSITIONS: {}", e))?;
        }
        if let Some(raw) = lookup("SEED_DEMO_DATA") {
            cfg.seed_demo_data = parse_bool(&raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid SEED_DEMO_DATA '{}'", raw))?;
        }

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
