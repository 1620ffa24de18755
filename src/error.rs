use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Everything the upload and dashboard handlers can fail with. The HTTP
/// status mirrors the analysis backend where one was involved, otherwise
/// it is a plain client or gateway error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please select a file first")]
    NoFileSelected,

    #[error("Please select a valid CSV file")]
    InvalidFileType,

    #[error("Error: {0}")]
    BadUpload(String),

    #[error("Error: {message}")]
    AnalysisFailed { status: u16, message: String },

    #[error("Error: {0}")]
    BackendUnreachable(String),

    #[error("Error loading sample data: {0}")]
    SampleUnavailable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoFileSelected | AppError::InvalidFileType | AppError::BadUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::AnalysisFailed { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::BackendUnreachable(_) | AppError::SampleUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_rejection_keeps_its_status() {
        let err = AppError::AnalysisFailed {
            status: 422,
            message: "CSV file is empty".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Error: CSV file is empty");
    }

    #[test]
    fn unusable_status_falls_back_to_bad_gateway() {
        let err = AppError::AnalysisFailed {
            status: 99,
            message: "odd".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn sample_errors_carry_their_own_prefix() {
        let err = AppError::SampleUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Error loading sample data: connection refused"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
