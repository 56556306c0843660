use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, RequestParts};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use hyper::header::CONTENT_TYPE;
use miette::{Diagnostic, SourceOffset};
use mime_guess::mime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::app::App;
use crate::report::{ReportRenderer, ReportType};

/// JSON body extractor and response. Rejects malformed bodies with a
/// `422` whose message points at the offending line and column.
pub struct Json<T>(pub T);

impl<T> From<T> for Json<T> {
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => json_response(StatusCode::OK, bytes),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(
                    CONTENT_TYPE,
                    HeaderValue::from_static(mime::TEXT_PLAIN_UTF_8.as_ref()),
                )],
                err.to_string(),
            )
                .into_response(),
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("{reason}")]
#[diagnostic(code(billed::error::bad_request))]
struct BodyError<'s> {
    #[source_code]
    json: &'s str,
    reason: String,
    #[label("problem is here")]
    location: SourceOffset,
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(
            CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        )],
        body,
    )
        .into_response()
}

fn failure(status: StatusCode, message: String) -> Response {
    let body = json!({ "result": "failure", "message": message });
    json_response(status, body.to_string().into_bytes())
}

#[async_trait]
impl<B, T> FromRequest<B> for Json<T>
where
    T: DeserializeOwned,
    B: axum::body::HttpBody + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = Response;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let body_bytes = Bytes::from_request(req).await.map_err(|e| {
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to read request body: {}", e),
            )
        })?;

        let body_str = std::str::from_utf8(&body_bytes).map_err(|e| {
            failure(
                StatusCode::BAD_REQUEST,
                format!("request body is not UTF-8: {}", e),
            )
        })?;

        let err = match serde_json::from_str(body_str) {
            Ok(value) => return Ok(Self(value)),
            Err(err) => err,
        };

        if !err.is_syntax() && !err.is_data() && !err.is_eof() {
            return Err(failure(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("JSON parsing error: {}", err),
            ));
        }

        let reason = if err.is_data() {
            format!("JSON is invalid: {}", err)
        } else {
            format!(
                "failed to parse JSON at line {}, column {}",
                err.line(),
                err.column()
            )
        };

        let body_err = BodyError {
            json: body_str,
            reason,
            location: SourceOffset::from_location(body_str, err.line(), err.column() + 1),
        };

        if App::json_output() {
            tracing::warn!("{}", ReportRenderer(ReportType::Json, &body_err));
        } else {
            tracing::warn!("{}", ReportRenderer(ReportType::Graphical, &body_err));
        }

        Err(failure(StatusCode::UNPROCESSABLE_ENTITY, body_err.to_string()))
    }
}
