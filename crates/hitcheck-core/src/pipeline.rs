//! Request pipeline.
//!
//! Every request ends in exactly one [`Terminal`] state:
//!
//! - `Empty`: no parameters at all; nothing is recorded.
//! - `Rejected`: validation failed; nothing is recorded.
//! - `Accepted`: the point was classified and appended to the ledger.
//! - `Failed`: rendering broke; a generic error document is returned.
//!
//! Each state still produces a well-formed document in the requested
//! format.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tracing::{debug, error};

use crate::error::{RenderResult, ValidationError};
use crate::ledger::HistoryLedger;
use crate::render::{render, render_internal_failure, Outcome, ResponseView};
use crate::types::{format_timestamp, EvaluationRecord, OutputFormat, RenderedResponse};
use crate::validation::validate;

/// Message rendered when the request carries no parameters.
pub const NO_PARAMETERS_MESSAGE: &str = "No parameters provided";

/// Final state of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Empty,
    Rejected(ValidationError),
    Accepted,
    Failed,
}

/// Result of running one request through the pipeline.
#[derive(Debug, Clone)]
pub struct ProcessedRequest {
    pub terminal: Terminal,
    /// Present when the point was classified and recorded.
    pub record: Option<EvaluationRecord>,
    pub response: RenderedResponse,
}

impl ProcessedRequest {
    pub fn is_accepted(&self) -> bool {
        self.terminal == Terminal::Accepted
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.terminal, Terminal::Rejected(_))
    }
}

type Renderer = fn(ResponseView<'_>, OutputFormat) -> RenderResult<String>;

/// Validates, classifies, records and renders inbound requests.
#[derive(Clone)]
pub struct RequestPipeline {
    ledger: Arc<HistoryLedger>,
    renderer: Renderer,
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl RequestPipeline {
    pub fn new(ledger: Arc<HistoryLedger>) -> Self {
        Self {
            ledger,
            renderer: render,
        }
    }

    #[cfg(test)]
    fn with_renderer(ledger: Arc<HistoryLedger>, renderer: Renderer) -> Self {
        Self { ledger, renderer }
    }

    pub fn ledger(&self) -> &Arc<HistoryLedger> {
        &self.ledger
    }

    /// Process a request, stamping it with the local wall-clock time.
    pub fn process(&self, params: &HashMap<String, String>, format: OutputFormat) -> ProcessedRequest {
        let started = Instant::now();
        let current_time = format_timestamp(&Local::now());
        self.process_at(params, format, started, current_time)
    }

    /// Process a request with an explicit start instant and wall-clock
    /// string.
    pub fn process_at(
        &self,
        params: &HashMap<String, String>,
        format: OutputFormat,
        started: Instant,
        current_time: String,
    ) -> ProcessedRequest {
        if params.is_empty() {
            debug!(%format, "request without parameters");
            return self.finish(
                Terminal::Empty,
                None,
                Outcome::Rejected {
                    message: NO_PARAMETERS_MESSAGE,
                },
                format,
                started,
                &current_time,
            );
        }

        let point = match validate(params) {
            Ok(point) => point,
            Err(err) => {
                debug!(%format, reason = err.kind(), "request rejected");
                let message = err.to_string();
                return self.finish(
                    Terminal::Rejected(err),
                    None,
                    Outcome::Rejected { message: &message },
                    format,
                    started,
                    &current_time,
                );
            }
        };

        let record = EvaluationRecord::evaluate(point, current_time.clone());
        let history = self.ledger.append_and_snapshot(record.clone());

        debug!(
            %format,
            x = record.x,
            y = record.y,
            r = record.r,
            hit = record.hit,
            "request accepted"
        );

        let outcome = Outcome::Accepted {
            current: &record,
            history: &history,
        };
        self.finish(
            Terminal::Accepted,
            Some(record.clone()),
            outcome,
            format,
            started,
            &current_time,
        )
    }

    fn finish(
        &self,
        terminal: Terminal,
        record: Option<EvaluationRecord>,
        outcome: Outcome<'_>,
        format: OutputFormat,
        started: Instant,
        current_time: &str,
    ) -> ProcessedRequest {
        let script_time_ms = elapsed_ms(started);
        let view = ResponseView {
            outcome,
            current_time,
            script_time_ms,
        };

        match (self.renderer)(view, format) {
            Ok(body) => ProcessedRequest {
                terminal,
                record,
                response: RenderedResponse::new(format, body),
            },
            Err(err) => {
                error!(%format, error = %err, "failed to render response");
                ProcessedRequest {
                    terminal: Terminal::Failed,
                    record,
                    response: RenderedResponse::new(
                        format,
                        render_internal_failure(current_time, script_time_ms, format),
                    ),
                }
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const NOW: &str = "2024-05-06 07:08:09";

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pipeline() -> RequestPipeline {
        RequestPipeline::new(Arc::new(HistoryLedger::new()))
    }

    fn run(p: &RequestPipeline, pairs: &[(&str, &str)], format: OutputFormat) -> ProcessedRequest {
        p.process_at(&params(pairs), format, Instant::now(), NOW.to_string())
    }

    #[test]
    fn accepted_request_records_hit() {
        let p = pipeline();
        let out = run(&p, &[("x", "-0.5"), ("y", "-0.5"), ("r", "2")], OutputFormat::Structured);

        assert!(out.is_accepted());
        assert_eq!(p.ledger().len(), 1);
        let record = out.record.unwrap();
        assert!(record.hit);
        assert_eq!(record.timestamp, NOW);

        let doc: Value = serde_json::from_str(&out.response.body).unwrap();
        assert_eq!(doc["error"], Value::Bool(false));
        assert_eq!(doc["currentResult"]["hit"], Value::Bool(true));
        assert_eq!(doc["currentTime"], NOW);
        assert_eq!(doc["history"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn missing_parameter_leaves_ledger_untouched() {
        let p = pipeline();
        run(&p, &[("x", "1"), ("y", "1"), ("r", "2")], OutputFormat::Structured);
        let before = p.ledger().len();

        let out = run(&p, &[("x", "1"), ("r", "2")], OutputFormat::Structured);

        assert_eq!(out.terminal, Terminal::Rejected(ValidationError::MissingParameter));
        assert!(out.record.is_none());
        assert_eq!(p.ledger().len(), before);
        let doc: Value = serde_json::from_str(&out.response.body).unwrap();
        assert_eq!(doc["error"], Value::Bool(true));
        assert_eq!(doc["message"], "Missing required parameters: x, y, r");
        assert!(doc.get("history").is_none());
    }

    #[test]
    fn empty_request_is_neutral() {
        let p = pipeline();
        let out = run(&p, &[], OutputFormat::Markup);

        assert_eq!(out.terminal, Terminal::Empty);
        assert!(p.ledger().is_empty());
        assert_eq!(out.response.format, OutputFormat::Markup);
        assert!(out.response.body.contains(NO_PARAMETERS_MESSAGE));
    }

    #[test]
    fn rejection_in_markup() {
        let p = pipeline();
        let out = run(&p, &[("x", "1"), ("y", "1"), ("r", "-1")], OutputFormat::Markup);

        assert!(out.is_rejected());
        assert!(out.response.body.contains("R must be positive"));
        assert_eq!(out.response.content_type(), "text/html; charset=utf-8");
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let p = pipeline();
        for i in 0..25 {
            let x = format!("{}", f64::from(i) / 10.0);
            run(&p, &[("x", x.as_str()), ("y", "0"), ("r", "1")], OutputFormat::Structured);
        }
        let out = run(&p, &[("x", "-1"), ("y", "-1"), ("r", "1")], OutputFormat::Structured);
        let doc: Value = serde_json::from_str(&out.response.body).unwrap();
        let history = doc["history"].as_array().unwrap();

        assert_eq!(history.len(), 20);
        assert_eq!(history[0]["x"].as_f64(), Some(-1.0));
        assert_eq!(history[1]["x"].as_f64(), Some(2.4));
        assert_eq!(history[19]["x"].as_f64(), Some(0.6));
    }

    #[test]
    fn process_stamps_current_time() {
        let p = pipeline();
        let out = p.process(&params(&[("x", "0"), ("y", "0"), ("r", "1")]), OutputFormat::Structured);
        let record = out.record.unwrap();
        assert_eq!(record.timestamp.len(), "YYYY-MM-DD HH:MM:SS".len());
    }

    fn broken_renderer(_: ResponseView<'_>, _: OutputFormat) -> RenderResult<String> {
        let err = serde_json::from_str::<Value>("{").unwrap_err();
        Err(err.into())
    }

    #[test]
    fn render_failure_yields_generic_document_in_both_formats() {
        let ledger = Arc::new(HistoryLedger::new());
        let p = RequestPipeline::with_renderer(Arc::clone(&ledger), broken_renderer);

        let out = run(&p, &[("x", "-0.5"), ("y", "-0.5"), ("r", "2")], OutputFormat::Structured);
        assert_eq!(out.terminal, Terminal::Failed);
        assert!(out.record.is_some());
        assert_eq!(out.response.format, OutputFormat::Structured);
        let doc: Value = serde_json::from_str(&out.response.body).unwrap();
        assert_eq!(doc["error"], Value::Bool(true));
        assert_eq!(doc["message"], "Internal server error");
        assert_eq!(doc["currentTime"], NOW);
        assert_eq!(ledger.len(), 1);

        let out = run(&p, &[("x", "1"), ("y", "1"), ("r", "2")], OutputFormat::Markup);
        assert_eq!(out.terminal, Terminal::Failed);
        assert_eq!(out.response.format, OutputFormat::Markup);
        assert!(out.response.body.contains("Internal server error"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn render_failure_on_rejection_is_also_failed() {
        let p = RequestPipeline::with_renderer(Arc::new(HistoryLedger::new()), broken_renderer);
        let out = run(&p, &[("x", "9"), ("y", "0"), ("r", "1")], OutputFormat::Structured);

        assert_eq!(out.terminal, Terminal::Failed);
        assert!(out.record.is_none());
        assert!(p.ledger().is_empty());
        assert!(out.response.body.contains("Internal server error"));
    }

    #[test]
    fn response_history_always_leads_with_current_under_contention() {
        let ledger = Arc::new(HistoryLedger::new());
        let p = RequestPipeline::new(Arc::clone(&ledger));
        let writers: Vec<_> = (0..6)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for i in 0..2000 {
                        ledger.append(EvaluationRecord {
                            x: f64::from(t),
                            y: f64::from(i),
                            r: 1.0,
                            hit: false,
                            timestamp: NOW.to_string(),
                        });
                    }
                })
            })
            .collect();

        for _ in 0..2000 {
            let out = run(&p, &[("x", "-0.5"), ("y", "-0.5"), ("r", "2")], OutputFormat::Structured);
            let doc: Value = serde_json::from_str(&out.response.body).unwrap();
            assert_eq!(doc["history"][0], doc["currentResult"]);
        }

        for handle in writers {
            handle.join().unwrap();
        }
    }

    #[test]
    fn pipeline_clones_share_ledger() {
        let p = pipeline();
        let q = p.clone();
        run(&q, &[("x", "0"), ("y", "0"), ("r", "1")], OutputFormat::Markup);
        assert_eq!(p.ledger().len(), 1);
    }
}
