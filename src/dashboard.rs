use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::info;

use crate::config::UPLOAD_PATH;
use crate::export;
use crate::model::AnalysisResponse;
use crate::pages;
use crate::render::DashboardView;
use crate::session::SESSION_COOKIE;
use crate::AppState;

/// GET /dashboard. Renders the stored analysis, or sends the visitor back
/// to the upload page when there is nothing usable to show.
pub async fn dashboard(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let Some(data) = stored_analysis(&req, &state) else {
        return redirect_to(UPLOAD_PATH);
    };

    let response = AnalysisResponse::from_value(&data);
    let view = DashboardView::build(&response);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::dashboard_page(&view))
}

/// GET /back. Drops the stored analysis and its cookie, then returns to
/// the upload page.
pub async fn back(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        info!("clearing analysis session");
        state.sessions.remove(cookie.value());
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, UPLOAD_PATH))
        .cookie(removal)
        .finish()
}

/// GET /api/plan/export. Plain-text download of the study plan; an empty
/// plan yields no content rather than an empty file.
pub async fn export_plan(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let Some(data) = stored_analysis(&req, &state) else {
        return redirect_to(UPLOAD_PATH);
    };

    let response = AnalysisResponse::from_value(&data);
    if response.plan.is_empty() {
        return HttpResponse::NoContent().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export::PLAN_FILENAME),
        ))
        .body(export::plan_text(&response.plan))
}

fn stored_analysis(req: &HttpRequest, state: &AppState) -> Option<Value> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let data = state.sessions.get(cookie.value())?;
    AnalysisResponse::has_analysis(&data).then_some(data)
}

fn redirect_to(path: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, path))
        .finish()
}
