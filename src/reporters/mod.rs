//! Report payloads and the summarizer overview
//!
//! [`build_report`] assembles a serializable [`ReportPayload`]; the json
//! helpers serialize it. The overview submodule builds the summarizer
//! projection and its deterministic fallback.

mod json;
pub mod overview;
mod payload;

pub use json::{to_json, to_json_compact};
pub use overview::{
    fallback_overview, resolve_overview, sanitize_items, Overview, OverviewDraft, OverviewRequest,
};
pub use payload::{
    build_report, ActionQueueCount, BenchmarkEntry, ChartsSummary, DeveloperScore,
    ReportBenchmarks, ReportDevelopers, ReportHealth, ReportInputs, ReportPayload,
};
