use reqwest::{StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("{0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("{0}")]
    ErrorResponse(Box<str>),

    #[error("list index out of range")]
    NoChoices,
}

impl From<OpenAIError> for ApiError {
    fn from(err: OpenAIError) -> Self {
        ApiError::ErrorResponse(err.error.message)
    }
}

#[derive(Debug, Serialize)]
pub struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [OpenAIMessage],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenAIMessage {
    pub role: &'static str,
    pub content: Box<str>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    pub content: Option<Box<str>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIErrorDetail {
    pub message: Box<str>,
}

/// Sends one chat completion and returns the content of the first choice.
pub async fn openai_request(
    http: &reqwest::Client,
    base_url: &str,
    authorization: &HeaderValue,
    model: &str,
    messages: &[OpenAIMessage],
) -> Result<Option<Box<str>>, ApiError> {
    let openai_request = OpenAIRequest { model, messages };

    let response = http
        .post(format!("{}/chat/completions", base_url))
        .header(reqwest::header::AUTHORIZATION, authorization.clone())
        .json(&openai_request)
        .send()
        .await?;
    let status = response.status();
    let response_text = response.text().await?;

    // Try parsing as error response first
    if let Ok(error_response) = serde_json::from_str::<OpenAIError>(&response_text) {
        return Err(ApiError::from(error_response));
    }

    if !status.is_success() {
        return Err(status_error(status, &response_text));
    }

    // If not error, parse as success response
    let response: OpenAIResponse = serde_json::from_str(&response_text)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ApiError::NoChoices)
}

/// Text for a failed reply that carries no OpenAI error object: JSON bodies are
/// quoted after the status code, plain text stands on its own.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let code = status.as_u16();
    let text = if body.trim().is_empty() {
        format!("Error code: {code}")
    } else if serde_json::from_str::<serde_json::Value>(body).is_ok() {
        format!("Error code: {code} - {body}")
    } else {
        body.to_owned()
    };
    ApiError::ErrorResponse(text.into())
}
