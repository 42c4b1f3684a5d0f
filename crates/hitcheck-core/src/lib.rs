//! # hitcheck-core
//!
//! Domain core of the hit checker: decides whether a point lies inside a
//! composite region and keeps a short rolling history of past checks.
//!
//! ## Pipeline
//!
//! ```text
//!   raw parameters ──► validation ──► geometry ──► ledger append ──► render
//!                          │                                          ▲
//!                          └──────────── rejection ───────────────────┘
//! ```
//!
//! The region is built from one shape per quadrant, all scaled by `r`:
//!
//! - `x ≥ 0, y ≥ 0`: rectangle `[0, r/2] × [0, r]`
//! - `x ≥ 0, y ≤ 0`: right triangle with legs `r/2` on both axes
//! - `x ≤ 0, y ≤ 0`: quarter circle of radius `r/2`
//! - `x ≤ 0, y ≥ 0`: empty
//!
//! Nothing in this crate performs I/O. The transport lives in
//! `hitcheck-daemon`, which hands each request to [`RequestPipeline`].

#![deny(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod ledger;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod validation;

pub use error::{RenderError, RenderResult, ValidationError};
pub use geometry::classify;
pub use ledger::{HistoryLedger, DEFAULT_CAPACITY};
pub use pipeline::{ProcessedRequest, RequestPipeline, Terminal};
pub use render::{render, Outcome, ResponseView};
pub use types::{format_timestamp, EvaluationRecord, OutputFormat, Point3, RenderedResponse};
pub use validation::{validate, COORDINATE_MAX, COORDINATE_MIN};
