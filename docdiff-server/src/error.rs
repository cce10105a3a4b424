use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use docdiff_api_schema::error::ErrorResponse;
use docdiff_gateway::{GatewayError, GatewayErrorKind};

/// Boundary wrapper that renders a [`GatewayError`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self(error)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            GatewayErrorKind::Input => StatusCode::BAD_REQUEST,
            GatewayErrorKind::RemoteInvocation
            | GatewayErrorKind::EnvelopeDecode
            | GatewayErrorKind::Contract => StatusCode::BAD_GATEWAY,
            GatewayErrorKind::NotFound => StatusCode::NOT_FOUND,
            GatewayErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.0.to_string(),
        })
    }
}
