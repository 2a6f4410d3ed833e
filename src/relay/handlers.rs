use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Instrument;
use uuid::Uuid;

use super::{
    Relay,
    dto::{ChatReply, ChatRequest, HealthResponse},
};
use crate::service;

pub fn build_router(state: Arc<Relay>) -> Router {
    // Any frontend may call the relay
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_check))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Chat request body. Read as JSON when declared so, and also when the client
/// sends no `Content-Type` at all; any other content type is rejected.
pub struct ChatBody(pub ChatRequest);

impl<S> FromRequest<S> for ChatBody
where
    S: Send + Sync,
{
    type Rejection = service::Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = if req.headers().contains_key(CONTENT_TYPE) {
            Json::<ChatRequest>::from_request(req, state)
                .await
                .map(|Json(request)| request)
                .map_err(service::Error::from)
        } else {
            match Bytes::from_request(req, state).await {
                Ok(body) => serde_json::from_slice::<ChatRequest>(&body)
                    .map_err(|error| service::Error::InvalidRequest(error.to_string().into())),
                Err(rejection) => Err(service::Error::InvalidRequest(rejection.body_text().into())),
            }
        };

        parsed.map(ChatBody).inspect_err(|error| {
            tracing::warn!("Rejected chat request body: {}", error);
        })
    }
}

pub async fn chat_handler(
    State(relay): State<Arc<Relay>>,
    ChatBody(request): ChatBody,
) -> service::Result<Json<ChatReply>> {
    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    let reply = relay.chat(&request.message).instrument(span).await?;
    Ok(Json(ChatReply { reply }))
}
