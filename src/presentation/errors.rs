// HTTP error type for collaborator failures reaching the request layer
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::borrow::Cow;

#[derive(Debug)]
pub enum ApiError {
    /// 401 Unauthorized
    Unauthorized(Cow<'static, str>),
    /// 500 Internal Server Error
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn unauthorized<Msg: Into<Cow<'static, str>>>(msg: Msg) -> Self {
        Self::Unauthorized(msg.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl From<askama::Error> for ApiError {
    fn from(e: askama::Error) -> Self {
        Self::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
