use std::sync::Arc;

use axum::{
    body::{boxed, Body, Bytes},
    handler::Handler,
    http::{header::CONTENT_TYPE, Request, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Extension, Router,
};
use serde_json::json;

mod json;
pub mod ui;
pub mod v1;

pub use json::Json;

use crate::store::{MemoryStore, Store};

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Set when receipts are held in process memory and served from
    /// `/receipts/:key`.
    pub receipts: Option<MemoryStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            receipts: None,
        }
    }

    /// State backed by `store`, which also serves the receipts uploaded to it.
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store.clone()),
            receipts: Some(store),
        }
    }
}

pub fn build(state: AppState) -> Router {
    Router::new()
        .merge(v1::router())
        .merge(ui::router())
        .layer(Extension(state))
        .layer(middleware::from_fn(error_middleware))
        .fallback(not_found_handler.into_service())
}

pub async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "result": "failure",
            "message": "not found",
            "uri": uri.to_string()
        })),
    )
}

/// Rewrites plain-text error bodies from axum's own rejections under `/api/`
/// into the JSON failure format.
async fn error_middleware<B>(req: Request<B>, next: Next<B>) -> Response {
    let api_request = req.uri().path().starts_with("/api/");
    let response = next.run(req).await;

    let failed = response.status().is_client_error() || response.status().is_server_error();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("application/json"));
    if !api_request || !failed || is_json {
        return response;
    }

    let (mut head, body) = response.into_parts();
    let body_bytes = match hyper::body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("failed to read error response body: {}", e);
            Bytes::new()
        }
    };

    let message = String::from_utf8_lossy(&body_bytes);
    let message = if message.trim().is_empty() {
        head.status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        message.trim().to_string()
    };

    let json_body = json!({
        "result": "failure",
        "message": message,
    })
    .to_string();

    head.headers.remove(axum::http::header::CONTENT_LENGTH);
    head.headers.insert(
        CONTENT_TYPE,
        axum::http::HeaderValue::from_static("application/json"),
    );

    Response::from_parts(head, boxed(Body::from(json_body)))
}
