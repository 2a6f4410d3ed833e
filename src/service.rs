use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::infer::{ApiError, ConnectError};

pub const NOT_CONFIGURED_DETAIL: &str = "OPENAI_API_KEY not configured";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}", NOT_CONFIGURED_DETAIL)]
    Configuration(#[from] ConnectError),
    #[error("Error calling OpenAI API: {0}")]
    Upstream(#[from] ApiError),
    #[error("{0}")]
    InvalidRequest(Box<str>),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text().into())
    }
}

#[derive(Debug, Serialize)]
pub struct HttpErrorBody {
    pub detail: Box<str>,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Error::Configuration(_) | Error::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let detail = self.to_string().into_boxed_str();
        (status, axum::Json(HttpErrorBody { detail })).into_response()
    }
}
