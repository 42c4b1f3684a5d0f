//! Response rendering.
//!
//! One renderer covers both output formats. Structured documents are
//! serde-derived and serialized by `serde_json`, which also takes care of
//! escaping user-visible messages. Markup documents are plain HTML5 with
//! every interpolated value escaped.

use serde::Serialize;

use crate::error::RenderResult;
use crate::types::{EvaluationRecord, OutputFormat};

/// What happened to the request, as far as rendering is concerned.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// Successful check; `history` is newest first and includes `current`.
    Accepted {
        current: &'a EvaluationRecord,
        history: &'a [EvaluationRecord],
    },
    /// Request refused with a human-readable reason.
    Rejected { message: &'a str },
}

/// Everything the renderer needs for one response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseView<'a> {
    pub outcome: Outcome<'a>,
    pub current_time: &'a str,
    pub script_time_ms: u64,
}

/// Render `view` in the requested format.
pub fn render(view: ResponseView<'_>, format: OutputFormat) -> RenderResult<String> {
    match format {
        OutputFormat::Structured => render_structured(&view),
        OutputFormat::Markup => Ok(render_markup(&view)),
    }
}

/// Message used when a response could not be produced normally.
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

/// Generic error document for internal failures. Cannot fail.
pub fn render_internal_failure(
    current_time: &str,
    script_time_ms: u64,
    format: OutputFormat,
) -> String {
    let view = ResponseView {
        outcome: Outcome::Rejected {
            message: INTERNAL_FAILURE_MESSAGE,
        },
        current_time,
        script_time_ms,
    };
    match format {
        OutputFormat::Structured => serde_json::json!({
            "error": true,
            "message": INTERNAL_FAILURE_MESSAGE,
            "currentTime": current_time,
            "scriptTime": script_time_ms,
        })
        .to_string(),
        OutputFormat::Markup => render_markup(&view),
    }
}

// ── Structured ──────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessDocument<'a> {
    error: bool,
    current_time: &'a str,
    script_time: u64,
    current_result: &'a EvaluationRecord,
    history: &'a [EvaluationRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDocument<'a> {
    error: bool,
    message: &'a str,
    current_time: &'a str,
    script_time: u64,
}

fn render_structured(view: &ResponseView<'_>) -> RenderResult<String> {
    let body = match view.outcome {
        Outcome::Accepted { current, history } => serde_json::to_string_pretty(&SuccessDocument {
            error: false,
            current_time: view.current_time,
            script_time: view.script_time_ms,
            current_result: current,
            history,
        })?,
        Outcome::Rejected { message } => serde_json::to_string_pretty(&ErrorDocument {
            error: true,
            message,
            current_time: view.current_time,
            script_time: view.script_time_ms,
        })?,
    };
    Ok(body)
}

// ── Markup ──────────────────────────────────────────────────────────────

fn render_markup(view: &ResponseView<'_>) -> String {
    match view.outcome {
        Outcome::Accepted { current, history } => markup_success(view, current, history),
        Outcome::Rejected { message } => markup_error(view, message),
    }
}

fn verdict(hit: bool) -> &'static str {
    if hit {
        "HIT"
    } else {
        "MISS"
    }
}

fn markup_timing(view: &ResponseView<'_>) -> String {
    format!(
        "<p><strong>Current time:</strong> {}</p>\n\
         <p><strong>Script time:</strong> {} ms</p>\n",
        escape_html(view.current_time),
        view.script_time_ms
    )
}

fn markup_success(
    view: &ResponseView<'_>,
    current: &EvaluationRecord,
    history: &[EvaluationRecord],
) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n\
         <html><head><meta charset=\"utf-8\"><title>Check result</title></head><body>\n\
         <h1>Check result</h1>\n",
    );
    html.push_str(&markup_timing(view));
    html.push_str(&format!(
        "<p><strong>Result:</strong> {}</p>\n",
        verdict(current.hit)
    ));
    html.push_str(
        "<h2>History</h2>\n\
         <table border=\"1\">\n\
         <tr><th>X</th><th>Y</th><th>R</th><th>Result</th><th>Time</th></tr>\n",
    );
    for record in history {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            record.x,
            record.y,
            record.r,
            verdict(record.hit),
            escape_html(&record.timestamp)
        ));
    }
    html.push_str("</table>\n</body></html>");
    html
}

fn markup_error(view: &ResponseView<'_>, message: &str) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n\
         <html><head><meta charset=\"utf-8\"><title>Error</title></head><body>\n\
         <h1>Error</h1>\n",
    );
    html.push_str(&format!("<p>{}</p>\n", escape_html(message)));
    html.push_str(&markup_timing(view));
    html.push_str("</body></html>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
