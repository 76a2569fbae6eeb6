use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),
    #[error("Crop '{0}' has no stage duration/coefficient data")]
    InvalidCropProfile(String),
    #[error("Flow rate must be positive, got {0} L/h")]
    InvalidFlowRate(f64),
    #[error("Days to apply must be at least 1, got {0}")]
    InvalidDuration(i64),
    #[error("Plot area must be positive, got {0} acres")]
    InvalidAcreage(f64),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnknownCrop(_) => "UNKNOWN_CROP",
            AppError::InvalidCropProfile(_) => "INVALID_CROP_PROFILE",
            AppError::InvalidFlowRate(_) => "INVALID_FLOW_RATE",
            AppError::InvalidDuration(_) => "INVALID_DURATION",
            AppError::InvalidAcreage(_) => "INVALID_ACREAGE",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownCrop(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("Request failed: {}", self);
        let body = ErrorResponse {
            error: ErrorDetail { code: self.code().to_owned(), message: self.to_string() },
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
