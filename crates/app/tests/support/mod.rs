//! In-process fake of the event-site REST API for black-box tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use chrono::Utc;
use eventsite_app::ViewContext;
use eventsite_auth::{AuthSession, TokenStore};
use eventsite_client::{ApiClient, ClientConfig};
use eventsite_core::{
    Attendee, AttendeeId, RegisterRequest, Session, SessionId, SessionWithSpeaker, Speaker,
    SpeakerId, Todo, TodoDraft, TodoId, TodoPatch, UpsertSession, UpsertSpeaker,
};
use serde_json::{Value, json};

pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// One request as the fake saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub authorized: bool,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub todos: Vec<Todo>,
    pub speakers: Vec<Speaker>,
    pub sessions: Vec<Session>,
    pub attendees: Vec<Attendee>,
    /// Every list endpoint answers 500.
    pub fail_reads: bool,
    /// Every mutating endpoint answers 500.
    pub fail_writes: bool,
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default)]
pub struct Fake(Arc<Mutex<FakeState>>);

impl Fake {
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }
}

pub struct FakeApi {
    pub base_url: String,
    pub fake: Fake,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeApi {
    pub async fn spawn() -> Self {
        let fake = Fake::default();

        let app = Router::new()
            .route("/api/todos", get(list_todos).post(create_todo))
            .route("/api/todos/:id", patch(update_todo).delete(delete_todo))
            .route("/api/sessions", get(list_sessions))
            .route("/api/speakers", get(list_speakers))
            .route("/api/register", post(register))
            .route("/api/attendees/count", get(attendee_count))
            .route("/api/admin/login", post(login))
            .route("/api/admin/attendees", get(admin_attendees))
            .route("/api/admin/stats", get(admin_stats))
            .route("/api/admin/speakers", post(upsert_speaker))
            .route("/api/admin/sessions", post(upsert_session))
            .layer(middleware::from_fn_with_state(fake.clone(), record))
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            fake,
            handle,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.fake.state()
    }

    /// Requests seen for `method path`.
    pub fn hits(&self, method: &str, path: &str) -> Vec<Hit> {
        self.state()
            .hits
            .iter()
            .filter(|hit| hit.method == method && hit.path == path)
            .cloned()
            .collect()
    }

    pub fn hit_count(&self, method: &str, path: &str) -> usize {
        self.hits(method, path).len()
    }

    pub fn context(&self, store: Arc<dyn TokenStore>) -> ViewContext {
        let auth = AuthSession::init(store);
        let api = ApiClient::new(&ClientConfig::new(&self.base_url), auth).unwrap();
        ViewContext::new(api, POLL_INTERVAL)
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Poll `check` until it holds or two seconds pass.
pub async fn eventually<F>(mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

// -------------------------------------------------------------------------
// Seed data
// -------------------------------------------------------------------------

pub fn todo(id: &str, title: &str, completed: bool) -> Todo {
    let now = Utc::now();
    Todo {
        id: TodoId::new(id),
        title: title.to_string(),
        description: format!("about {title}"),
        completed,
        created_at: now,
        updated_at: now,
    }
}

pub fn speaker(id: &str, name: &str) -> Speaker {
    Speaker {
        id: SpeakerId::new(id),
        name: name.to_string(),
        bio: String::new(),
        photo_url: String::new(),
    }
}

pub fn session(id: &str, title: &str, speaker_id: Option<&str>) -> Session {
    Session {
        id: SessionId::new(id),
        title: title.to_string(),
        description: String::new(),
        time: "10:00 AM - 11:00 AM".to_string(),
        speaker_id: speaker_id.map(SpeakerId::new),
    }
}

pub fn attendee(name: &str, email: &str, designation: &str) -> Attendee {
    Attendee {
        id: AttendeeId::new(uuid::Uuid::now_v7().to_string()),
        full_name: name.to_string(),
        email: email.to_string(),
        designation: designation.to_string(),
        created_at: Utc::now(),
    }
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

async fn record(State(fake): State<Fake>, req: Request, next: Next) -> Response {
    fake.state().hits.push(Hit {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        authorized: req.headers().contains_key(header::AUTHORIZATION),
    });
    next.run(req).await
}

fn plain(status: StatusCode, message: &str) -> Response {
    (status, format!("{message}\n")).into_response()
}

fn check_admin(headers: &HeaderMap) -> Result<(), Response> {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return Err(plain(StatusCode::UNAUTHORIZED, "Missing authorization header"));
    };
    if value != format!("Bearer {ADMIN_TOKEN}") {
        return Err(plain(StatusCode::UNAUTHORIZED, "Invalid token"));
    }
    Ok(())
}

fn read_failure(state: &FakeState) -> Option<Response> {
    state
        .fail_reads
        .then(|| plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
}

fn write_failure(state: &FakeState) -> Option<Response> {
    state
        .fail_writes
        .then(|| plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
}

fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

async fn list_todos(State(fake): State<Fake>) -> Response {
    let state = fake.state();
    if let Some(failure) = read_failure(&state) {
        return failure;
    }
    Json(state.todos.clone()).into_response()
}

async fn create_todo(State(fake): State<Fake>, Json(draft): Json<TodoDraft>) -> Response {
    let mut state = fake.state();
    if let Some(failure) = write_failure(&state) {
        return failure;
    }
    if draft.title.trim().is_empty() {
        return plain(StatusCode::BAD_REQUEST, "Title is required");
    }

    let now = Utc::now();
    let todo = Todo {
        id: TodoId::new(new_id()),
        title: draft.title,
        description: draft.description,
        completed: false,
        created_at: now,
        updated_at: now,
    };
    state.todos.insert(0, todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn update_todo(
    State(fake): State<Fake>,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> Response {
    let mut state = fake.state();
    if let Some(failure) = write_failure(&state) {
        return failure;
    }
    let Some(todo) = state.todos.iter_mut().find(|t| t.id.as_str() == id) else {
        return plain(StatusCode::NOT_FOUND, "Todo not found");
    };

    if let Some(title) = patch.title {
        todo.title = title;
    }
    if let Some(description) = patch.description {
        todo.description = description;
    }
    if let Some(completed) = patch.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    Json(todo.clone()).into_response()
}

async fn delete_todo(State(fake): State<Fake>, Path(id): Path<String>) -> Response {
    let mut state = fake.state();
    if let Some(failure) = write_failure(&state) {
        return failure;
    }
    let before = state.todos.len();
    state.todos.retain(|t| t.id.as_str() != id);
    if state.todos.len() == before {
        return plain(StatusCode::NOT_FOUND, "Todo not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_sessions(State(fake): State<Fake>) -> Response {
    let state = fake.state();
    if let Some(failure) = read_failure(&state) {
        return failure;
    }
    let sessions: Vec<SessionWithSpeaker> = state
        .sessions
        .iter()
        .cloned()
        .map(|session| {
            let mut session = SessionWithSpeaker::bare(session);
            session.attach_speaker(&state.speakers);
            session
        })
        .collect();
    Json(sessions).into_response()
}

async fn list_speakers(State(fake): State<Fake>) -> Response {
    let state = fake.state();
    if let Some(failure) = read_failure(&state) {
        return failure;
    }
    if state.speakers.is_empty() {
        // The real server marshals an empty slice as null.
        return Json(Value::Null).into_response();
    }
    Json(state.speakers.clone()).into_response()
}

async fn register(State(fake): State<Fake>, Json(request): Json<RegisterRequest>) -> Response {
    let mut state = fake.state();
    if let Some(failure) = write_failure(&state) {
        return failure;
    }
    if state.attendees.iter().any(|a| a.email == request.email) {
        return plain(StatusCode::CONFLICT, "Email already registered");
    }

    let attendee = attendee(&request.full_name, &request.email, &request.designation);
    state.attendees.push(attendee.clone());
    (StatusCode::CREATED, Json(attendee)).into_response()
}

async fn attendee_count(State(fake): State<Fake>) -> Response {
    let count = fake.state().attendees.len();
    Json(json!({ "count": count })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == ADMIN_PASSWORD {
        Json(json!({ "token": ADMIN_TOKEN })).into_response()
    } else {
        plain(StatusCode::UNAUTHORIZED, "Invalid password")
    }
}

async fn admin_attendees(State(fake): State<Fake>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_admin(&headers) {
        return denied;
    }
    let state = fake.state();
    if let Some(failure) = read_failure(&state) {
        return failure;
    }
    Json(state.attendees.clone()).into_response()
}

async fn admin_stats(State(fake): State<Fake>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_admin(&headers) {
        return denied;
    }
    let state = fake.state();
    let mut stats: BTreeMap<String, u64> = BTreeMap::new();
    for attendee in &state.attendees {
        *stats.entry(attendee.designation.clone()).or_default() += 1;
    }
    Json(stats).into_response()
}

async fn upsert_speaker(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<UpsertSpeaker>,
) -> Response {
    if let Err(denied) = check_admin(&headers) {
        return denied;
    }
    let mut state = fake.state();
    if let Some(failure) = write_failure(&state) {
        return failure;
    }

    let speaker = Speaker {
        id: body.id.unwrap_or_else(|| SpeakerId::new(new_id())),
        name: body.draft.name,
        bio: body.draft.bio,
        photo_url: body.draft.photo_url,
    };
    match state.speakers.iter_mut().find(|s| s.id == speaker.id) {
        Some(existing) => *existing = speaker.clone(),
        None => state.speakers.push(speaker.clone()),
    }
    Json(speaker).into_response()
}

async fn upsert_session(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<UpsertSession>,
) -> Response {
    if let Err(denied) = check_admin(&headers) {
        return denied;
    }
    let mut state = fake.state();
    if let Some(failure) = write_failure(&state) {
        return failure;
    }

    let session = Session {
        id: body.id.unwrap_or_else(|| SessionId::new(new_id())),
        title: body.draft.title,
        description: body.draft.description,
        time: body.draft.time,
        speaker_id: body.draft.speaker_id,
    };
    match state.sessions.iter_mut().find(|s| s.id == session.id) {
        Some(existing) => *existing = session.clone(),
        None => state.sessions.push(session.clone()),
    }
    Json(session).into_response()
}
