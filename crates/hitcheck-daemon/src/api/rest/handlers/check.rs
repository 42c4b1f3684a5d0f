//! Hit-check handlers

use crate::api::rest::negotiate::{negotiate, parse_form};
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use hitcheck_core::{ProcessedRequest, RenderedResponse};
use std::collections::HashMap;

/// Run a check from the query string
pub async fn check_query(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let params = parse_form(query.as_deref().unwrap_or_default());
    run_check(&state, &uri, &headers, &params).into_response()
}

/// Run a check from a form-encoded body
pub async fn check_form(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let body = std::str::from_utf8(&body)
        .map_err(|_| ApiError::BadRequest("request body is not valid UTF-8".to_string()))?;
    let params = parse_form(body);
    Ok(run_check(&state, &uri, &headers, &params).into_response())
}

fn run_check(
    state: &AppState,
    uri: &Uri,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> CheckResponse {
    let format = negotiate(headers, uri.path());
    tracing::debug!(path = %uri.path(), %format, params = params.len(), "Handling check");

    let processed = state.pipeline.process(params, format);
    CheckResponse::from(processed)
}

/// Rendered pipeline output, returned with its content type
#[derive(Debug)]
pub struct CheckResponse(pub RenderedResponse);

impl From<ProcessedRequest> for CheckResponse {
    fn from(processed: ProcessedRequest) -> Self {
        Self(processed.response)
    }
}

impl IntoResponse for CheckResponse {
    fn into_response(self) -> Response {
        let content_type = self.0.content_type();
        ([(header::CONTENT_TYPE, content_type)], self.0.body).into_response()
    }
}
