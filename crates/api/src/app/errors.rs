use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        ServiceError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
        ServiceError::CascadeIncomplete(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "cascade_incomplete",
            format!("{e}; retry the request to complete the cascade"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
