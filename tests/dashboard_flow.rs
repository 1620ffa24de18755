use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use student_dashboard::backend::{AnalysisApi, BackendError};
use student_dashboard::config::AppConfig;
use student_dashboard::routes;
use student_dashboard::session::{SessionStore, SESSION_COOKIE};
use student_dashboard::AppState;

const BOUNDARY: &str = "----dashboard-test-boundary";

struct StubApi {
    upload_result: Result<Value, BackendError>,
    sample_result: Result<Value, BackendError>,
    upload_calls: AtomicUsize,
}

impl StubApi {
    fn ok(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            upload_result: Ok(payload.clone()),
            sample_result: Ok(payload),
            upload_calls: AtomicUsize::new(0),
        })
    }

    fn failing(err: BackendError) -> Arc<Self> {
        Arc::new(Self {
            upload_result: Err(err.clone()),
            sample_result: Err(err),
            upload_calls: AtomicUsize::new(0),
        })
    }

    fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisApi for StubApi {
    async fn analyze(
        &self,
        _file_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<Value, BackendError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.upload_result.clone()
    }

    async fn sample(&self) -> Result<Value, BackendError> {
        self.sample_result.clone()
    }
}

fn sample_payload() -> Value {
    json!({
        "analysis": {
            "summary": {
                "total_attempts": 40,
                "overall_accuracy": 62.5,
                "avg_time_correct": 45.2,
                "avg_time_incorrect": 78.9,
                "strength_level": "Intermediate"
            },
            "accuracy_by_difficulty": [
                {"difficulty": 1, "accuracy": 80.0, "attempts": 10},
                {"difficulty": 2, "accuracy": 55.0, "attempts": 20},
                {"difficulty": 3, "accuracy": 40.0, "attempts": 10}
            ],
            "time_comparison": {"avg_time_correct": 45.2, "avg_time_incorrect": 78.9},
            "strength_progression": [
                {"test_id": "T1", "strength_score": 48.0},
                {"test_id": "T2", "strength_score": 61.5}
            ],
            "subtopic_ranking": [
                {"subtopic": "Algebra", "topic": "Math", "accuracy": 35.0,
                 "attempts": 8, "topic_weightage": "high"}
            ],
            "topics": ["Math"]
        },
        "plan": (1..=7).map(|n| json!({
            "day": n,
            "date": format!("2024-03-0{n}"),
            "focus": ["Algebra"],
            "study_time": "2-3 hours",
            "activities": ["Drill problems"],
            "goals": ["Reach 80%"]
        })).collect::<Vec<_>>(),
        "recommendations": {
            "Math": [{"name": "Khan Academy - Math", "type": "Video Lessons",
                      "url": "https://www.khanacademy.org/math"}]
        },
        "study_tips": {"Math": ["Practice daily"]},
        "revision_summary": "Focus on Algebra first.",
        "genai_status": {"used": false, "message": ""},
        "unmodelled_extra": {"kept": true}
    })
}

fn app_state(api: Arc<StubApi>) -> (web::Data<AppState>, Arc<SessionStore>) {
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(300)));
    let data = web::Data::new(AppState {
        config: AppConfig::default(),
        sessions: sessions.clone(),
        api,
    });
    (data, sessions)
}

fn csv_request(filename: &str, content_type: &str) -> test::TestRequest {
    multipart_request("file", filename, content_type)
}

fn multipart_request(field: &str, filename: &str, content_type: &str) -> test::TestRequest {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\nsubtopic,correct\r\nAlgebra,1\r\n\r\n--{BOUNDARY}--\r\n"
    );
    test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[actix_web::test]
async fn upload_stores_the_backend_response_verbatim() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api.clone());
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let resp = test::call_service(&app, csv_request("attempts.csv", "text/csv").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let token = session_cookie(&resp).expect("upload should set a session cookie");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Analysis complete! Redirecting to dashboard...");
    assert_eq!(body["redirect"], "/dashboard");
    assert_eq!(body["delay_ms"], 1500);

    assert_eq!(sessions.get(&token), Some(sample_payload()));
    assert_eq!(api.upload_calls(), 1);
}

#[actix_web::test]
async fn upload_reports_the_backend_rejection() {
    let api = StubApi::failing(BackendError::Rejected {
        status: 400,
        message: "CSV file is empty".to_string(),
    });
    let (data, _sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let resp = test::call_service(&app, csv_request("attempts.csv", "text/csv").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Error: CSV file is empty");
}

#[actix_web::test]
async fn unreachable_backend_maps_to_bad_gateway() {
    let api = StubApi::failing(BackendError::Unreachable("connection refused".to_string()));
    let (data, _sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let resp = test::call_service(&app, csv_request("attempts.csv", "text/csv").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Error: connection refused");
}

#[actix_web::test]
async fn non_csv_uploads_never_reach_the_backend() {
    let api = StubApi::ok(sample_payload());
    let (data, _sessions) = app_state(api.clone());
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let resp = test::call_service(&app, csv_request("notes.txt", "text/plain").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Please select a valid CSV file");
    assert_eq!(api.upload_calls(), 0);
}

#[actix_web::test]
async fn a_missing_file_field_is_rejected() {
    let api = StubApi::ok(sample_payload());
    let (data, _sessions) = app_state(api.clone());
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let resp = test::call_service(
        &app,
        multipart_request("meta", "attempts.csv", "text/csv").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Please select a file first");
    assert_eq!(api.upload_calls(), 0);
}

#[actix_web::test]
async fn the_sample_flow_mirrors_an_upload() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/sample").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let token = session_cookie(&resp).expect("sample load should set a session cookie");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Sample data loaded! Redirecting to dashboard...");
    assert_eq!(body["redirect"], "/dashboard");

    assert_eq!(sessions.get(&token), Some(sample_payload()));
}

#[actix_web::test]
async fn sample_failures_carry_their_own_prefix() {
    let api = StubApi::failing(BackendError::Unreachable("connection refused".to_string()));
    let (data, _sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/sample").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Error loading sample data: connection refused");
}

#[actix_web::test]
async fn the_dashboard_redirects_without_a_session() {
    let api = StubApi::ok(sample_payload());
    let (data, _sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));
}

#[actix_web::test]
async fn the_dashboard_redirects_when_the_analysis_is_missing() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    sessions.put("t1", json!({"plan": []}));
    let req = test::TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new(SESSION_COOKIE, "t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));
}

#[actix_web::test]
async fn the_dashboard_renders_the_stored_analysis() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    sessions.put("t1", sample_payload());
    let req = test::TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new(SESSION_COOKIE, "t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let page = std::str::from_utf8(&body).expect("dashboard should be UTF-8");

    assert!(page.contains("62.5%"));
    assert!(page.contains("Intermediate"));
    assert!(page.contains("Day 1"));
    assert!(page.contains("Day 7"));
    assert!(page.contains("📚 Math"));
    assert!(page.contains("💡 Math"));
    assert!(page.contains("Focus on Algebra first."));
    assert!(page.contains("⚙️ Rule-based mode"));
    assert!(page.contains("Difficulty 3"));
    assert!(page.contains("#e74c3c"));
}

#[actix_web::test]
async fn back_clears_the_session_and_returns_to_upload() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    sessions.put("t1", sample_payload());
    let req = test::TestRequest::get()
        .uri("/back")
        .cookie(Cookie::new(SESSION_COOKIE, "t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));
    assert_eq!(sessions.get("t1"), None);
}

#[actix_web::test]
async fn the_plan_export_downloads_a_week_of_text() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    sessions.put("t1", sample_payload());
    let req = test::TestRequest::get()
        .uri("/api/plan/export")
        .cookie(Cookie::new(SESSION_COOKIE, "t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"study-plan.txt\"")
    );

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).expect("plan text should be UTF-8");
    assert!(text.starts_with("Student Performance Analysis - 7-Day Study Plan\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("Day ")).count(), 7);
    assert!(text.contains("  • Drill problems\n"));
    assert!(text.contains("Goals:\n  • Reach 80%\n"));
}

#[actix_web::test]
async fn exporting_without_a_plan_yields_no_content() {
    let api = StubApi::ok(sample_payload());
    let (data, sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    sessions.put("t1", json!({"analysis": {"summary": {"total_attempts": 1}}}));
    let req = test::TestRequest::get()
        .uri("/api/plan/export")
        .cookie(Cookie::new(SESSION_COOKIE, "t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn health_answers_plainly() {
    let api = StubApi::ok(sample_payload());
    let (data, _sessions) = app_state(api);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Student Performance Dashboard is running!");
}
