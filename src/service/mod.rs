pub mod eligibility;
pub mod http;
pub mod pipeline;
pub mod sources;
pub mod sync;

pub use eligibility::{Eligibility, EligibilityClassifier, IndustryFilter};
pub use pipeline::{AggregationPipeline, PipelineRun, SourceSummary};
pub use sources::{default_sources, SourceAdapter, SourceContext};
pub use sync::{validate_endpoint, SyncEngine};
