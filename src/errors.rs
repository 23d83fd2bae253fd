// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{
    dev::ServiceResponse,
    error::{JsonPayloadError, PathError, QueryPayloadError, ResponseError},
    http::{
        header::{self, HeaderValue},
        StatusCode,
    },
    middleware::ErrorHandlerResponse,
    HttpRequest, HttpResponse,
};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every handler failure funnels through this enum
/// Each variant maps to an HTTP status code and the uniform failure envelope
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    /// Underlying detail placed in the `error` field of the envelope
    pub fn detail(&self) -> String {
        match self {
            ApiError::NotFound(detail)
            | ApiError::AlreadyExists(detail)
            | ApiError::ValidationError(detail)
            | ApiError::InvalidInput(detail)
            | ApiError::DatabaseError(detail) => detail.clone(),
            ApiError::InternalError => self.to_string(),
        }
    }

    /// Machine-readable code placed in the `code` field of the envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::AlreadyExists(_) => "ALREADY_EXISTS",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Convert ApiError to HTTP response
/// DOCUMENTATION: Duplicate keys are reported as 400 like every other
/// validation failure; only unclassified failures become 500
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "success": false,
            "message": self.to_string(),
            "error": self.detail(),
            "code": self.error_code(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::AlreadyExists(format!("Duplicate key: {}", db.message()))
            }
            sqlx::Error::Database(db) if db.is_check_violation() => {
                ApiError::ValidationError(db.message().to_string())
            }
            _ => ApiError::DatabaseError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}

/// Malformed or mistyped JSON bodies (including unknown enum values)
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::ValidationError(err.to_string()).into()
}

/// Path segments that fail to parse, e.g. a gallery id that is not a UUID
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidInput(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidInput(err.to_string()).into()
}

/// Replaces the body of server errors in production so store details never
/// reach clients. Installed through `middleware::ErrorHandlers`.
pub fn redact_server_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, res) = res.into_parts();
    log::error!("Redacting server error for {} {}", req.method(), req.path());

    let body = json!({
        "success": false,
        "message": "Something went wrong!",
        "error": "Internal server error",
        "code": "INTERNAL_ERROR"
    })
    .to_string();

    let mut res = res.set_body(body);
    res.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let res = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}
