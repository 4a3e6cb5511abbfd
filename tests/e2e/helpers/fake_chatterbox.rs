use super::fixtures::wav_bytes;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct FakeState {
    requests: Mutex<Vec<Value>>,
    fail_marker: Option<String>,
    model_loaded: bool,
}

/// Minimal Chatterbox server: `/synthesize-wav` answers with a one-sample WAV
/// file, `/health` reports the configured model state
pub struct FakeChatterbox {
    pub base_url: String,
    state: Arc<FakeState>,
    handle: JoinHandle<()>,
}

impl FakeChatterbox {
    pub async fn start(fail_marker: Option<&str>, model_loaded: bool) -> Self {
        let state = Arc::new(FakeState {
            requests: Mutex::new(Vec::new()),
            fail_marker: fail_marker.map(str::to_string),
            model_loaded,
        });

        let app = Router::new()
            .route("/synthesize-wav", post(synthesize_wav))
            .route("/health", get(health))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Chatterbox");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake Chatterbox crashed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().clone()
    }
}

impl Drop for FakeChatterbox {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn synthesize_wav(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let text = body["text"].as_str().unwrap_or_default().to_string();
    let request_number = {
        let mut requests = state.requests.lock();
        requests.push(body);
        requests.len()
    };

    if let Some(marker) = &state.fail_marker {
        if text.contains(marker.as_str()) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "synthesis failed").into_response();
        }
    }

    (StatusCode::OK, wav_bytes(&[request_number as i16], 24_000)).into_response()
}

async fn health(State(state): State<Arc<FakeState>>) -> Json<Value> {
    Json(json!({
        "status": if state.model_loaded { "healthy" } else { "initializing" },
        "model_loaded": state.model_loaded,
        "device": "cpu"
    }))
}
