use actix_multipart::Multipart;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use serde::Serialize;
use tracing::{info, warn};

use crate::backend::BackendError;
use crate::config::{AppConfig, DASHBOARD_PATH};
use crate::error::AppError;
use crate::pages;
use crate::session::{SessionStore, SESSION_COOKIE};
use crate::AppState;

/// JSON body of a successful upload or sample load. The page shows the
/// message, waits `delay_ms`, then follows `redirect`.
#[derive(Debug, Serialize)]
pub struct UploadAck {
    pub message: String,
    pub redirect: &'static str,
    pub delay_ms: u64,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::UPLOAD_PAGE)
}

/// POST /api/upload. Validates the file, forwards it to the analysis
/// backend and stores the response under the visitor's session.
pub async fn upload(
    req: HttpRequest,
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let Some(file) = read_file_field(payload).await? else {
        return Err(AppError::NoFileSelected);
    };
    if !is_csv_file(&file.file_name, file.content_type.as_deref()) {
        warn!(file = %file.file_name, "rejected non-CSV upload");
        return Err(AppError::InvalidFileType);
    }

    info!(file = %file.file_name, bytes = file.bytes.len(), "forwarding upload for analysis");
    let content_type = file.content_type.unwrap_or_else(|| "text/csv".to_string());
    let data = state
        .api
        .analyze(&file.file_name, &content_type, file.bytes)
        .await
        .map_err(upload_error)?;

    let token = session_token(&req);
    state.sessions.put(&token, data);
    Ok(ack(
        &token,
        "Analysis complete! Redirecting to dashboard...",
        &state.config,
    ))
}

/// GET /api/sample. Same flow as an upload, with the backend's canned
/// sample standing in for the CSV.
pub async fn sample(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("loading sample analysis data");
    let data = state
        .api
        .sample()
        .await
        .map_err(|err| AppError::SampleUnavailable(err.to_string()))?;

    let token = session_token(&req);
    state.sessions.put(&token, data);
    Ok(ack(
        &token,
        "Sample data loaded! Redirecting to dashboard...",
        &state.config,
    ))
}

async fn read_file_field(mut payload: Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::BadUpload(err.to_string()))?
    {
        if field.name() != "file" {
            continue;
        }

        let file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_string)
            .unwrap_or_default();
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| AppError::BadUpload(err.to_string()))?
        {
            bytes.extend_from_slice(&chunk);
        }
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

/// Mirrors the browser-side check: either the declared type or the file
/// extension has to say CSV.
fn is_csv_file(name: &str, content_type: Option<&str>) -> bool {
    let by_type = content_type
        .map(|t| t.eq_ignore_ascii_case("text/csv"))
        .unwrap_or(false);
    by_type || name.to_ascii_lowercase().ends_with(".csv")
}

fn upload_error(err: BackendError) -> AppError {
    match err {
        BackendError::Rejected { status, message } => AppError::AnalysisFailed { status, message },
        other => AppError::BackendUnreachable(other.to_string()),
    }
}

/// Reuses the visitor's existing session token so a new upload replaces
/// the old analysis instead of piling up entries.
fn session_token(req: &HttpRequest) -> String {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_else(SessionStore::new_token)
}

fn ack(token: &str, message: &str, config: &AppConfig) -> HttpResponse {
    let cookie = Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    HttpResponse::Ok().cookie(cookie).json(UploadAck {
        message: message.to_string(),
        redirect: DASHBOARD_PATH,
        delay_ms: config.redirect_delay_ms,
    })
}
