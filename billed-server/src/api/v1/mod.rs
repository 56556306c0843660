use axum::{
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use miette::Diagnostic;
use serde_json::json;
use thiserror::Error;

use crate::api::Json;
use crate::app::App;
use crate::report::{ReportRenderer, ReportType};
use crate::store::StoreError;

pub mod bills;
pub mod receipts;

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("store error")]
    #[diagnostic(code(billed::error::store))]
    Store(#[from] StoreError),
}

pub const BILLS_URI: &str = "/api/v1/bills";
pub const RECEIPTS_URI: &str = "/api/v1/receipts";
pub const HEALTH_URI: &str = "/health";

pub fn router() -> Router {
    Router::new()
        .route(BILLS_URI, get(bills::read_all).post(bills::create))
        .route(&format!("{}/:file_name", RECEIPTS_URI), put(receipts::upload))
        .route(HEALTH_URI, get(health_handler))
}

async fn health_handler() -> &'static str {
    "UP"
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Store(e) = self;
        let status = e.status_code();

        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), "request refused: {}", e);
            return (
                status,
                Json(json!({
                    "result": "failure",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }

        if App::json_output() {
            tracing::error!("{}", ReportRenderer(ReportType::Json, &e));
        } else {
            tracing::error!("{}", ReportRenderer(ReportType::Graphical, &e));
        }

        let message = e.to_string();
        let details: Vec<String> = format!("{}", ReportRenderer(ReportType::Narratable, &e))
            .split('\n')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != message)
            .map(|s| s.to_string())
            .collect();

        let body = if details.is_empty() {
            json!({
                "result": "failure",
                "message": message
            })
        } else {
            json!({
                "result": "failure",
                "message": message,
                "details": details
            })
        };

        (status, Json(body)).into_response()
    }
}
