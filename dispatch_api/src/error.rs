use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dispatch_optimizer::{planner::DispatchError, problem::customer::CustomerError};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::error;

#[derive(Serialize, JsonSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    BadGateway(String),
    InternalServerError(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<CustomerError> for ApiError {
    fn from(error: CustomerError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::NoCustomers | DispatchError::InvalidCustomer(_) => {
                ApiError::BadRequest(error.to_string())
            }
            DispatchError::Upstream(_) => ApiError::BadGateway(error.to_string()),
            DispatchError::Problem(_) => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::InternalServerError(message) => {
                error!("{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
