use std::time::Duration;

use reqwest::header::HeaderValue;

mod error;
pub use error::ConnectError;
pub mod openai;
pub use openai::ApiError;
use openai::OpenAIMessage;

use crate::config::upstream;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn into_role_str(self) -> &'static str {
        match self {
            Self::System => openai::ROLE_SYSTEM,
            Self::User => openai::ROLE_USER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: Box<str>,
}

impl Message {
    pub fn new_text_system(content: impl Into<Box<str>>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    pub fn new_text_user(content: impl Into<Box<str>>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }
}

impl From<&Message> for OpenAIMessage {
    fn from(message: &Message) -> Self {
        OpenAIMessage {
            role: message.role.into_role_str(),
            content: message.content.clone(),
        }
    }
}

/// Connection settings for the completion API, shared by all requests.
///
/// Holds the pooled HTTP client; binding a credential to it is cheap and
/// happens per call in [`Endpoint::connect`].
#[derive(Debug, Clone)]
pub struct Endpoint {
    http: reqwest::Client,
    base_url: Box<str>,
}

impl Endpoint {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    pub fn from_config() -> Result<Self, reqwest::Error> {
        Self::new(&upstream::BASE_URL, *upstream::TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn connect(&self, credential: Option<&str>) -> Result<Client<'_>, ConnectError> {
        let credential = credential
            .filter(|credential| !credential.is_empty())
            .ok_or(ConnectError::MissingCredential)?;
        let mut authorization = HeaderValue::from_str(&format!("Bearer {credential}"))?;
        authorization.set_sensitive(true);
        Ok(Client { endpoint: self, authorization })
    }
}

/// An [`Endpoint`] bound to a credential.
pub struct Client<'a> {
    endpoint: &'a Endpoint,
    authorization: HeaderValue,
}

impl Client<'_> {
    pub async fn complete(&self, model: &str, messages: &[Message]) -> Result<Option<Box<str>>, ApiError> {
        let messages: Vec<OpenAIMessage> = messages.iter().map(OpenAIMessage::from).collect();
        tracing::debug!(model, messages = messages.len(), "Sending chat completion");
        openai::openai_request(
            &self.endpoint.http,
            &self.endpoint.base_url,
            &self.authorization,
            model,
            &messages,
        )
        .await
    }
}

#[cfg(test)]
pub(crate) mod mock;
