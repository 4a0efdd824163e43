// system-tests/tests/helpers/idea_stub.rs
// ============================================================================
// Module: Idea Center Stub
// Description: In-process Idea Center service for system-tests.
// Purpose: Exercise the ordered suite over real HTTP without a remote service.
// Dependencies: axum, idea-center-client, tokio
// ============================================================================

//! ## Overview
//! Mirrors the Idea Center REST surface: bearer-token authentication,
//! create/list/edit/delete with the service's success and not-found texts,
//! and a 400 for an empty title. Ideas live in memory in insertion order.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use idea_center_client::ClientConfig;
use idea_center_client::Credentials;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

/// Email accepted by the stub.
pub const STUB_EMAIL: &str = "tester@example.com";
/// Password accepted by the stub.
pub const STUB_PASSWORD: &str = "correct-horse";
/// Token issued by the stub by default.
pub const STUB_TOKEN: &str = "stub-access-token";

/// Stub behavior switches.
#[derive(Clone, Debug)]
pub struct IdeaStubOptions {
    /// Token returned on successful authentication.
    pub token: String,
    /// Return an empty list from `GET /api/Idea/All`.
    pub hide_ideas_from_list: bool,
}

impl Default for IdeaStubOptions {
    fn default() -> Self {
        Self {
            token: STUB_TOKEN.to_string(),
            hide_ideas_from_list: false,
        }
    }
}

/// Idea stored by the stub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoredIdea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
}

#[derive(Default)]
struct StubStore {
    next_id: u64,
    ideas: Vec<StoredIdea>,
    requests: Vec<String>,
}

#[derive(Clone)]
struct StubState {
    options: Arc<IdeaStubOptions>,
    store: Arc<Mutex<StubStore>>,
}

impl StubState {
    fn record(&self, request: &str) {
        let Ok(mut guard) = self.store.lock() else {
            return;
        };
        guard.requests.push(request.to_string());
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.options.token);
        headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) == Some(expected.as_str())
    }
}

/// Handle for the stub Idea Center server.
pub struct IdeaStubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    store: Arc<Mutex<StubStore>>,
}

impl IdeaStubHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a client config with the accepted credentials.
    pub fn client_config(&self) -> Result<ClientConfig, String> {
        self.client_config_with(STUB_EMAIL, STUB_PASSWORD)
    }

    /// Returns a client config with arbitrary credentials.
    pub fn client_config_with(&self, email: &str, password: &str) -> Result<ClientConfig, String> {
        ClientConfig::new(&self.base_url, Credentials::new(email, password))
            .map_err(|err| err.to_string())
    }

    /// Returns the ideas currently stored.
    pub fn ideas(&self) -> Vec<StoredIdea> {
        self.store.lock().map_or_else(|_| Vec::new(), |store| store.ideas.clone())
    }

    /// Returns `METHOD path` for every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.store.lock().map_or_else(|_| Vec::new(), |store| store.requests.clone())
    }
}

impl Drop for IdeaStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Returns a loopback address with nothing listening on it.
pub fn unused_loopback_addr() -> Result<SocketAddr, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    listener.local_addr().map_err(|err| format!("failed to read listener address: {err}"))
}

/// Spawns the stub with default behavior.
pub fn spawn_idea_stub() -> Result<IdeaStubHandle, String> {
    spawn_idea_stub_with(IdeaStubOptions::default())
}

/// Spawns the stub with custom behavior.
pub fn spawn_idea_stub_with(options: IdeaStubOptions) -> Result<IdeaStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("idea stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("idea stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("idea stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let store = Arc::new(Mutex::new(StubStore {
        next_id: 1,
        ..StubStore::default()
    }));
    let state = StubState {
        options: Arc::new(options),
        store: Arc::clone(&store),
    };
    let app = Router::new()
        .route("/api/User/Authentication", post(handle_authentication))
        .route("/api/Idea/Create", post(handle_create))
        .route("/api/Idea/All", get(handle_list))
        .route("/api/Idea/Edit", put(handle_edit))
        .route("/api/Idea/Delete", delete(handle_delete))
        .with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(IdeaStubHandle {
        base_url,
        shutdown: Some(shutdown_tx),
        join: Some(join),
        store,
    })
}

#[derive(Debug, Deserialize)]
struct AuthRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct IdeaBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: Option<String>,
}

const NO_SUCH_IDEA: &str = "There is no such idea!";

async fn handle_authentication(State(state): State<StubState>, bytes: Bytes) -> Response {
    state.record("POST /api/User/Authentication");
    let request: Result<AuthRequest, _> = serde_json::from_slice(bytes.as_ref());
    match request {
        Ok(request) if request.email == STUB_EMAIL && request.password == STUB_PASSWORD => {
            Json(json!({ "accessToken": state.options.token })).into_response()
        }
        _ => (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response(),
    }
}

async fn handle_create(State(state): State<StubState>, headers: HeaderMap, bytes: Bytes) -> Response {
    state.record("POST /api/Idea/Create");
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(body) = parse_idea(&bytes) else {
        return title_required();
    };
    let Ok(mut store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let id = store.next_id.to_string();
    store.next_id += 1;
    let idea = StoredIdea {
        id,
        title: body.title,
        description: body.description,
        url: body.url,
    };
    store.ideas.push(idea.clone());
    Json(json!({ "msg": "Successfully created!", "idea": idea })).into_response()
}

async fn handle_list(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("GET /api/Idea/All");
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.options.hide_ideas_from_list {
        return Json(Vec::<StoredIdea>::new()).into_response();
    }
    let Ok(store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    Json(store.ideas.clone()).into_response()
}

async fn handle_edit(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    bytes: Bytes,
) -> Response {
    state.record("PUT /api/Idea/Edit");
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Ok(mut store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Some(idea) = find_idea(&mut store.ideas, &query) else {
        return (StatusCode::BAD_REQUEST, NO_SUCH_IDEA).into_response();
    };
    let Some(body) = parse_idea(&bytes) else {
        return title_required();
    };
    idea.title = body.title;
    idea.description = body.description;
    idea.url = body.url;
    Json(json!({ "msg": "Edited successfully" })).into_response()
}

async fn handle_delete(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("DELETE /api/Idea/Delete");
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Ok(mut store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Some(id) = query.get("ideaId") else {
        return (StatusCode::BAD_REQUEST, NO_SUCH_IDEA).into_response();
    };
    let before = store.ideas.len();
    store.ideas.retain(|idea| &idea.id != id);
    if store.ideas.len() == before {
        return (StatusCode::BAD_REQUEST, NO_SUCH_IDEA).into_response();
    }
    Json("The idea is deleted!").into_response()
}

fn find_idea<'a>(
    ideas: &'a mut [StoredIdea],
    query: &HashMap<String, String>,
) -> Option<&'a mut StoredIdea> {
    let id = query.get("ideaId")?;
    ideas.iter_mut().find(|idea| &idea.id == id)
}

fn parse_idea(bytes: &Bytes) -> Option<IdeaBody> {
    let body: IdeaBody = serde_json::from_slice(bytes.as_ref()).ok()?;
    if body.title.trim().is_empty() {
        return None;
    }
    Some(body)
}

fn title_required() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": { "Title": ["The Title field is required."] } })),
    )
        .into_response()
}
