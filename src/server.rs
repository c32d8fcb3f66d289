//! HTTP front end for the document search pipeline.
//!
//! ## Endpoints
//!
//! - `POST /document_search`: JSON body with a required string `text`;
//!   every other field is forwarded to the search provider as a query
//!   option. Answers with the ranked results as plain text.
//! - `GET /health`: liveness probe

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use docrank_search::{DocumentSearch, PhraseExtractor, SearchClient, SearchError, SearchQueryOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{Result, ServiceError};

/// Body returned for malformed requests.
pub const INPUT_ERROR_MESSAGE: &str = "Missing or incorrect input";
/// Body returned when the text yields no keywords.
pub const EMPTY_EXTRACTION_MESSAGE: &str = "No keywords could be extracted from the input text";
/// Body returned for collaborator failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A parsed `POST /document_search` body.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSearchRequest {
    /// Free-form text to extract keywords from.
    pub text: String,
    /// Every other body field, forwarded to the search provider.
    pub options: SearchQueryOptions,
}

impl DocumentSearchRequest {
    /// Parse a raw request body.
    ///
    /// Returns `None` unless the body is a JSON object with a string `text`.
    pub fn from_json(body: &[u8]) -> Option<Self> {
        let Value::Object(mut fields) = serde_json::from_slice::<Value>(body).ok()? else {
            return None;
        };
        let Value::String(text) = fields.remove("text")? else {
            return None;
        };
        Some(Self {
            text,
            options: SearchQueryOptions::from(fields),
        })
    }
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is running.
    pub status: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
        .into_response()
}

/// Map a pipeline error to its HTTP status and body message.
pub fn classify_error(err: &SearchError) -> (StatusCode, &'static str) {
    match err {
        SearchError::EmptyExtraction => {
            (StatusCode::UNPROCESSABLE_ENTITY, EMPTY_EXTRACTION_MESSAGE)
        }
        e if e.is_client_error() => (StatusCode::BAD_REQUEST, INPUT_ERROR_MESSAGE),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE),
    }
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
struct AppState<C, P> {
    search: Arc<DocumentSearch<C, P>>,
}

impl<C, P> Clone for AppState<C, P> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
        }
    }
}

/// Build the service router around a shared pipeline.
pub fn router<C, P>(search: Arc<DocumentSearch<C, P>>) -> Router
where
    C: SearchClient + 'static,
    P: PhraseExtractor + 'static,
{
    Router::new()
        .route("/document_search", post(handle_document_search::<C, P>))
        .route("/health", get(handle_health))
        .with_state(AppState { search })
}

// ---------------------------------------------------------------------------
// DocumentSearchServer
// ---------------------------------------------------------------------------

/// HTTP server serving one shared [`DocumentSearch`] pipeline.
pub struct DocumentSearchServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl DocumentSearchServer {
    /// Start the HTTP server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Server`] if the TCP listener cannot bind.
    pub async fn start<C, P>(
        search: Arc<DocumentSearch<C, P>>,
        config: &ServerConfig,
    ) -> Result<Self>
    where
        C: SearchClient + 'static,
        P: PhraseExtractor + 'static,
    {
        let app = router(search);

        let bind_addr = config.bind_address();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::Server(format!("bind to {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Server(format!("failed to get local addr: {e}")))?;

        info!("document search server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("document search server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for DocumentSearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /health`
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

/// `POST /document_search`: rank documents for the given text.
async fn handle_document_search<C, P>(State(state): State<AppState<C, P>>, body: Bytes) -> Response
where
    C: SearchClient + 'static,
    P: PhraseExtractor + 'static,
{
    let Some(request) = DocumentSearchRequest::from_json(&body) else {
        tracing::debug!("rejected malformed document search request");
        return error_response(StatusCode::BAD_REQUEST, INPUT_ERROR_MESSAGE);
    };

    match state
        .search
        .search_formatted(&request.text, &request.options)
        .await
    {
        Ok(text) => text.into_response(),
        Err(err) => {
            let (status, message) = classify_error(&err);
            if status.is_server_error() {
                tracing::error!(error = %err, "document search failed");
            } else {
                tracing::debug!(error = %err, %status, "document search rejected");
            }
            error_response(status, message)
        }
    }
}
