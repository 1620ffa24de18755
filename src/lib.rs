pub mod backend;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod model;
pub mod pages;
pub mod render;
pub mod session;
pub mod upload;

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::backend::AnalysisApi;
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
    pub api: Arc<dyn AnalysisApi>,
}

/// Route table, kept out of `main` so tests can mount the same app
/// against a stub backend.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(upload::index))
        .route("/dashboard", web::get().to(dashboard::dashboard))
        .route("/back", web::get().to(dashboard::back))
        .route("/api/upload", web::post().to(upload::upload))
        .route("/api/sample", web::get().to(upload::sample))
        .route("/api/plan/export", web::get().to(dashboard::export_plan))
        .route("/api/health", web::get().to(health));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Student Performance Dashboard is running!")
}
