//! Core data types shared across the pipeline.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock format used for `currentTime` and record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a wall-clock instant as `YYYY-MM-DD HH:MM:SS` (no zone marker).
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

// ── Point ───────────────────────────────────────────────────────────────

/// A validated query point together with its scale parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    /// Scale of the region; always positive once validated.
    pub r: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    /// Whether this point falls inside the region scaled by `r`.
    pub fn classify(&self) -> bool {
        crate::geometry::classify(self.x, self.y, self.r)
    }
}

// ── Evaluation Record ───────────────────────────────────────────────────

/// Outcome of one successful check, as stored in the history ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub hit: bool,
    pub timestamp: String,
}

impl EvaluationRecord {
    /// Classify `point` and record the verdict under `timestamp`.
    pub fn evaluate(point: Point3, timestamp: impl Into<String>) -> Self {
        Self {
            x: point.x,
            y: point.y,
            r: point.r,
            hit: point.classify(),
            timestamp: timestamp.into(),
        }
    }
}

// ── Output ──────────────────────────────────────────────────────────────

/// Response document flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JSON document.
    Structured,
    /// HTML page.
    Markup,
}

impl OutputFormat {
    pub fn from_wants_structured(wants_structured: bool) -> Self {
        if wants_structured {
            OutputFormat::Structured
        } else {
            OutputFormat::Markup
        }
    }

    /// Value for the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "application/json; charset=utf-8",
            OutputFormat::Markup => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Structured => write!(f, "structured"),
            OutputFormat::Markup => write!(f, "markup"),
        }
    }
}

/// A rendered response body together with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub format: OutputFormat,
    pub body: String,
}

impl RenderedResponse {
    pub fn new(format: OutputFormat, body: String) -> Self {
        Self { format, body }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
