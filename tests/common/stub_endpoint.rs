/*!
 * In-process stand-in for Ollama's `/api/generate` endpoint.
 *
 * Binds an ephemeral port on localhost, records every request it receives
 * and answers either from a scripted queue or from a responder function.
 */

use anyhow::Result;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One answer of the stub
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with `{"response": <text>}` plus the metadata Ollama adds
    Generated(String),
    /// Any status with a plain body
    Status(u16, String),
    /// 200 with this exact body
    RawBody(String),
}

impl StubReply {
    pub fn generated(text: impl Into<String>) -> Self {
        Self::Generated(text.into())
    }

    fn into_response(self) -> Response {
        match self {
            Self::Generated(text) => {
                let body = serde_json::json!({
                    "model": "llama3",
                    "created_at": "2024-05-01T10:00:00.000000Z",
                    "response": text,
                    "done": true,
                    "eval_count": 12,
                });
                (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
            }
            Self::Status(code, body) => {
                let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, body).into_response()
            }
            Self::RawBody(body) => (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        }
    }
}

/// A request as received by the stub
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Value of the Content-Type header
    pub content_type: Option<String>,
    /// Decoded JSON body (`Null` if the body was not JSON)
    pub body: serde_json::Value,
}

impl CapturedRequest {
    /// The `prompt` field of the body
    pub fn prompt(&self) -> &str {
        self.body["prompt"].as_str().unwrap_or_default()
    }
}

enum Script {
    Queue(VecDeque<StubReply>),
    Responder(fn(&str) -> StubReply),
}

struct StubState {
    script: Mutex<Script>,
    requests: Mutex<Vec<CapturedRequest>>,
}

/// Running stub endpoint; the server stops when this is dropped
pub struct StubEndpoint {
    /// Full URL of the generate route
    pub url: String,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubEndpoint {
    /// Start a stub that answers with `replies` in order
    pub async fn start(replies: Vec<StubReply>) -> Result<Self> {
        Self::spawn(Script::Queue(replies.into())).await
    }

    /// Start a stub that answers every request by calling `responder` with the prompt
    pub async fn start_with(responder: fn(&str) -> StubReply) -> Result<Self> {
        Self::spawn(Script::Responder(responder)).await
    }

    async fn spawn(script: Script) -> Result<Self> {
        let state = Arc::new(StubState {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/generate", post(generate_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            url: format!("http://{}/api/generate", addr),
            state,
            handle,
        })
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }
}

impl Drop for StubEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn generate_handler(State(state): State<Arc<StubState>>, headers: HeaderMap, body: String) -> Response {
    let captured = CapturedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    };
    let prompt = captured.prompt().to_string();
    state.requests.lock().push(captured);

    let reply = match &mut *state.script.lock() {
        Script::Queue(queue) => queue
            .pop_front()
            .unwrap_or_else(|| StubReply::Status(500, "stub ran out of scripted replies".to_string())),
        Script::Responder(responder) => responder(&prompt),
    };

    reply.into_response()
}
