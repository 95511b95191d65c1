use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meander_routing::error::RouteError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    GatewayTimeout(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(format!("{:#}", error))
    }
}

impl From<RouteError> for ApiError {
    fn from(error: RouteError) -> Self {
        let message = error.to_string();
        match error {
            RouteError::InvalidWeights(_) | RouteError::InvalidCoordinate(_) => {
                ApiError::BadRequest(message)
            }
            RouteError::NoNodeFound { .. } | RouteError::NoPathFound { .. } => {
                ApiError::NotFound(message)
            }
            RouteError::SearchBudgetExceeded { .. } => ApiError::ServiceUnavailable(message),
            RouteError::DeadlineExceeded { .. } => ApiError::GatewayTimeout(message),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(error: tokio::task::JoinError) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::ServiceUnavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, message).into_response()
            }
            ApiError::GatewayTimeout(message) => {
                (StatusCode::GATEWAY_TIMEOUT, message).into_response()
            }
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
