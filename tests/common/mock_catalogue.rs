//! Mock remote catalogue service for backend tests.
//!
//! Speaks the REST shape `RemoteBackend` expects and hands out numeric ids,
//! the way a typical JSON server does.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A captured request for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    next_id: u64,
    books: Vec<Value>,
    failures: VecDeque<u16>,
    requests: Vec<CapturedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockCatalogue {
    addr: SocketAddr,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl MockCatalogue {
    pub async fn start() -> Self {
        Self::start_on("127.0.0.1:0").await
    }

    /// Serve on a fixed address, e.g. one a client is already retrying.
    pub async fn start_on(addr: &str) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            next_id: 1,
            ..MockState::default()
        }));

        let app = Router::new()
            .route("/books", get(list).post(create))
            .route("/books/{id}", put(update).delete(remove))
            .with_state(state.clone());

        let listener = TcpListener::bind(addr)
            .await
            .expect("Failed to bind mock catalogue");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a book with a numeric id.
    pub fn seed(&self, title: &str, author: &str, year: i32) -> u64 {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state
            .books
            .push(json!({ "id": id, "title": title, "author": author, "year": year }));
        id
    }

    /// Make the next request answer with `status` instead of being served.
    pub fn fail_next(&self, status: u16) {
        self.state.lock().failures.push_back(status);
    }

    pub fn books(&self) -> Vec<Value> {
        self.state.lock().books.clone()
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.lock().requests.clone()
    }
}

impl Drop for MockCatalogue {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(state: &mut MockState, method: &str, path: String, body: Option<Value>) -> Option<Response> {
    state.requests.push(CapturedRequest {
        method: method.to_string(),
        path,
        body,
    });
    state.failures.pop_front().map(|status| {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, "injected failure").into_response()
    })
}

fn id_text(book: &Value) -> String {
    match &book["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn list(State(state): State<Shared>) -> Response {
    let mut state = state.lock();
    if let Some(failure) = record(&mut state, "GET", "/books".to_string(), None) {
        return failure;
    }
    Json(Value::Array(state.books.clone())).into_response()
}

async fn create(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut state = state.lock();
    if let Some(failure) = record(&mut state, "POST", "/books".to_string(), Some(body.clone())) {
        return failure;
    }
    let id = state.next_id;
    state.next_id += 1;
    body["id"] = json!(id);
    state.books.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock();
    let path = format!("/books/{}", id);
    if let Some(failure) = record(&mut state, "PUT", path, Some(body.clone())) {
        return failure;
    }
    match state.books.iter_mut().find(|book| id_text(book) == id) {
        Some(book) => {
            let original_id = book["id"].clone();
            *book = body;
            book["id"] = original_id;
            Json(book.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such book").into_response(),
    }
}

async fn remove(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock();
    let path = format!("/books/{}", id);
    if let Some(failure) = record(&mut state, "DELETE", path, None) {
        return failure;
    }
    let before = state.books.len();
    state.books.retain(|book| id_text(book) != id);
    if state.books.len() == before {
        return (StatusCode::NOT_FOUND, "no such book").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
