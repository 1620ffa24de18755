use std::env;

/// Path the upload page is served from and where expired sessions land.
pub const UPLOAD_PATH: &str = "/";
/// Path the dashboard page is served from and where upload acks point.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Runtime settings, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the analysis backend, without a trailing slash.
    pub backend_url: String,
    /// How long the upload page waits before navigating to the dashboard.
    pub redirect_delay_ms: u64,
    /// How long a stored analysis survives without being replaced.
    pub session_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("DASHBOARD_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            backend_url: env::var("ANALYSIS_BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            redirect_delay_ms: env_u64("REDIRECT_DELAY_MS", 1500),
            session_ttl_secs: env_u64("SESSION_TTL_SECS", 2 * 60 * 60),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            backend_url: "http://127.0.0.1:5000".to_string(),
            redirect_delay_ms: 1500,
            session_ttl_secs: 2 * 60 * 60,
        }
    }
}

fn env_u64(key: &str, fallback: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}
