use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing::info;

use student_dashboard::backend::HttpAnalysisApi;
use student_dashboard::config::AppConfig;
use student_dashboard::session::SessionStore;
use student_dashboard::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "student_dashboard=info,actix_web=info".to_string()),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Using analysis backend at {}", config.backend_url);

    let state = AppState {
        sessions: Arc::new(SessionStore::new(Duration::from_secs(config.session_ttl_secs))),
        api: Arc::new(HttpAnalysisApi::new(config.backend_url.clone())),
        config,
    };
    let bind_addr = state.config.bind_addr.clone();
    info!("Starting student dashboard on http://{}", bind_addr);

    let data = web::Data::new(state);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .bind(bind_addr)?
        .run()
        .await
}
