//! Output format selection and raw parameter decoding.
//!
//! A request gets the structured format when the client accepts
//! `application/json`, or when the path is one of the API-style paths
//! (`/api/...` or anything containing `/check`). Everything else gets
//! markup.

use std::collections::HashMap;

use axum::http::{header, HeaderMap};
use hitcheck_core::OutputFormat;

/// Whether the caller should receive the structured format.
pub fn wants_structured(headers: &HeaderMap, path: &str) -> bool {
    let accepts_json = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("application/json"));

    accepts_json || path.contains("/api/") || path.contains("/check")
}

/// Pick the output format for a request.
pub fn negotiate(headers: &HeaderMap, path: &str) -> OutputFormat {
    OutputFormat::from_wants_structured(wants_structured(headers, path))
}

/// Decode an `application/x-www-form-urlencoded` string (query string or
/// body). A later duplicate key wins; a key without `=` maps to `""`.
pub fn parse_form(input: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(input.as_bytes())
        .into_owned()
        .collect()
}
