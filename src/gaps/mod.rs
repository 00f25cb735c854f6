//! Gap detection and remediation prioritization.
//!
//! Gap detection scans the selected answers for gap-trigger IDs, resolves
//! them against a [`GapCatalog`](crate::model::GapCatalog), merges repeated
//! triggers into one detected gap, and ranks the result by priority score.
//! The prioritizer turns the top of that ranking into recommendations, and
//! the roadmap schedules every detected gap into implementation phases.
//!
//! Unknown gap IDs and stale answer labels are skipped, never reported as
//! errors; the integrity validator in [`crate::reference`] is where authoring
//! mistakes surface.

mod cost;
mod detector;
mod export;
mod filter;
mod layer_summary;
mod prioritizer;
mod roadmap;

pub use cost::{estimated_cost_usd, expected_roi_usd, format_currency};
pub use detector::{
    detect_gaps, DetectedGap, DetectionConfidence, GapAnalysisResult, GapDetector, TOP_GAP_COUNT,
};
pub use export::{GapExport, GapExportRow, GapExportSummary, PriorityCounts};
pub use filter::{filter_gaps, GapFilter};
pub use layer_summary::{layer_gap_summaries, LayerGapSummary};
pub use prioritizer::{prioritize_recommendations, rationale_for, PrioritizedRecommendation};
pub use roadmap::{roadmap_phases, RoadmapPhase};
