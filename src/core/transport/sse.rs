//! SSE transport adapter (MCP HTTP+SSE).
//!
//! A client opens a long-lived event stream with `GET /sse`. The first event
//! (`endpoint`) tells it where to POST its messages:
//! `/sse/message?sessionId=<id>`. Replies to those messages are pushed back
//! on the stream as `message` events; the POST itself is only acknowledged.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{MethodRouter, get, post},
};
use bytes::Bytes;
use futures::{Stream, StreamExt, future, stream};
use http::{Method, StatusCode};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::http::{AppState, method_not_allowed};
use super::jsonrpc;

/// Mount point of the event stream.
pub const SSE_PATH: &str = "/sse";

/// Path clients POST their messages to.
pub const SSE_MESSAGE_PATH: &str = "/sse/message";

/// Events buffered per session before a POST waits for the stream to drain.
const SESSION_BUFFER: usize = 32;

/// Open SSE sessions, keyed by session id.
#[derive(Clone, Default)]
pub struct SseSessions {
    inner: Arc<Mutex<HashMap<String, mpsc::Sender<Event>>>>,
}

impl SseSessions {
    pub fn new() -> Self {
        Self::default()
    }

    // Never held across an await point.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, mpsc::Sender<Event>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session and return its id, event receiver and guard.
    fn open(&self) -> (String, mpsc::Receiver<Event>, SessionGuard) {
        let id = Uuid::new_v4().simple().to_string();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        self.lock().insert(id.clone(), tx);

        let guard = SessionGuard {
            sessions: self.clone(),
            id: id.clone(),
        };
        (id, rx, guard)
    }

    fn sender(&self, id: &str) -> Option<mpsc::Sender<Event>> {
        self.lock().get(id).cloned()
    }

    fn close(&self, id: &str) {
        if self.lock().remove(id).is_some() {
            info!("SSE session closed: {}", id);
        }
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no session is open.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Removes its session when the event stream is dropped.
struct SessionGuard {
    sessions: SseSessions,
    id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.close(&self.id);
    }
}

/// Query string of a message POST.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// Every method on `/sse`: GET opens a stream, anything else is refused here.
pub fn stream_routes() -> MethodRouter<AppState> {
    get(open_stream).fallback(|method: Method| async move { method_not_allowed(&method, "GET") })
}

/// Every method on `/sse/message`: POST delivers, anything else is refused here.
pub fn message_routes() -> MethodRouter<AppState> {
    post(post_message).fallback(|method: Method| async move { method_not_allowed(&method, "POST") })
}

/// `GET /sse` - open an event stream for a new session.
pub async fn open_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, rx, guard) = state.sessions.open();
    info!("SSE session opened: {}", session_id);

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?sessionId={}", SSE_MESSAGE_PATH, session_id));

    // The guard lives in the stream state so the session ends with the stream.
    let messages = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        rx.recv()
            .await
            .map(|event| (Ok::<_, Infallible>(event), (rx, guard)))
    });

    let stream = stream::once(future::ready(Ok::<_, Infallible>(endpoint))).chain(messages);

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.keep_alive))
}

/// `POST /sse/message?sessionId=<id>` - deliver a client message.
#[instrument(skip_all)]
pub async fn post_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> Response {
    let Some(session_id) = query.session_id else {
        return (StatusCode::BAD_REQUEST, "Missing sessionId").into_response();
    };

    let Some(sender) = state.sessions.sender(&session_id) else {
        warn!("Message for unknown SSE session: {}", session_id);
        return (StatusCode::NOT_FOUND, "Session not found").into_response();
    };

    let payload = match jsonrpc::parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => {
            let message = response
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "Invalid message".to_string());
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };

    if let Some(reply) = jsonrpc::handle_payload(&state.server, payload) {
        let event = match Event::default().event("message").json_data(&reply) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to encode reply: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode reply")
                    .into_response();
            }
        };

        if sender.send(event).await.is_err() {
            // Stream already gone; drop the stale entry.
            state.sessions.close(&session_id);
            return (StatusCode::NOT_FOUND, "Session not found").into_response();
        }
        debug!("Reply queued on SSE session {}", session_id);
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

/// Keep-alive interval for new streams.
pub(super) fn keep_alive_interval(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
