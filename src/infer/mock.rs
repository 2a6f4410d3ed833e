//! In-process stand-in for the completion API.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(String),
    NullContent,
    NoChoices,
    Error(String),
    Status(u16, String),
    Garbage,
    Hang,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockOpenAIServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockOpenAIServer {
    pub async fn new(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = MockState { behavior, requests: requests.clone() };
        let app = Router::new()
            .route("/v1/chat/completions", post(mock_chat_completions))
            .with_state(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests, _handle: handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop",
        }],
    })
}

async fn mock_chat_completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state.requests.lock().unwrap().push(RecordedRequest { authorization, body });

    match state.behavior {
        Behavior::Reply(text) => Json(completion(json!(text))).into_response(),
        Behavior::NullContent => Json(completion(Value::Null)).into_response(),
        Behavior::NoChoices => Json(json!({"id": "chatcmpl-mock", "choices": []})).into_response(),
        Behavior::Error(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"message": message, "type": "server_error", "code": null}})),
        )
            .into_response(),
        Behavior::Status(code, body) => {
            (StatusCode::from_u16(code).unwrap(), body).into_response()
        }
        Behavior::Garbage => (StatusCode::OK, "not json").into_response(),
        Behavior::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(completion(json!("too late"))).into_response()
        }
    }
}
