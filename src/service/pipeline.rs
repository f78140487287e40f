use std::collections::HashSet;

use crate::domain::models::{JobRecord, SourceReport};
use crate::service::eligibility::{EligibilityClassifier, IndustryFilter};
use crate::service::sources::SourceAdapter;

/// Per-source tally for the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: &'static str,
    pub fetched: usize,
    pub accepted: usize,
    pub ineligible: usize,
    pub off_industry: usize,
    /// Already contributed by an earlier source.
    pub duplicates: usize,
    pub request_failures: usize,
    pub item_failures: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineRun {
    /// Accepted candidates, unique by link, in source invocation order.
    pub jobs: Vec<JobRecord>,
    pub summaries: Vec<SourceSummary>,
}

impl PipelineRun {
    pub fn into_jobs(self) -> Vec<JobRecord> {
        self.jobs
    }
}

/// Runs every source in order, filters and merges their postings.
pub struct AggregationPipeline {
    sources: Vec<Box<dyn SourceAdapter>>,
    classifier: EligibilityClassifier,
    industry_filter: Option<IndustryFilter>,
}

impl AggregationPipeline {
    pub fn new(sources: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self {
            sources,
            classifier: EligibilityClassifier::new(),
            industry_filter: None,
        }
    }

    /// Additionally drop postings from non-game industries.
    pub fn with_industry_filter(mut self, enabled: bool) -> Self {
        self.industry_filter = enabled.then_some(IndustryFilter);
        self
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Always completes: a failing source only shrinks its own contribution.
    pub async fn run(&self) -> PipelineRun {
        let mut run = PipelineRun::default();
        let mut seen = HashSet::new();
        tracing::info!("[PIPELINE] Sources: {}", self.source_names().join(", "));

        for source in &self.sources {
            tracing::info!("[PIPELINE] Crawling {}", source.name());
            let report = source.fetch().await;
            let summary = self.absorb(report, &mut seen, &mut run.jobs);
            tracing::info!(
                "[PIPELINE] {}: {} accepted of {} fetched ({} ineligible, {} duplicates)",
                summary.source,
                summary.accepted,
                summary.fetched,
                summary.ineligible,
                summary.duplicates
            );
            run.summaries.push(summary);
        }

        tracing::info!("[PIPELINE] {} candidates across {} sources", run.jobs.len(), run.summaries.len());
        run
    }

    fn absorb(
        &self,
        report: SourceReport,
        seen: &mut HashSet<String>,
        accepted: &mut Vec<JobRecord>,
    ) -> SourceSummary {
        let mut summary = SourceSummary {
            source: report.source,
            fetched: report.jobs.len(),
            request_failures: report.request_failures(),
            item_failures: report.item_failures(),
            ..Default::default()
        };

        for job in report.jobs {
            let verdict = self.classifier.classify(&job);
            if !verdict.is_eligible() {
                tracing::debug!("[PIPELINE] Rejected {} | {}: {:?}", job.company, job.position, verdict);
                summary.ineligible += 1;
                continue;
            }

            if let Some(filter) = &self.industry_filter {
                if !filter.is_game_industry(&job) {
                    tracing::debug!("[PIPELINE] Off-industry {} | {}", job.company, job.position);
                    summary.off_industry += 1;
                    continue;
                }
            }

            if !seen.insert(job.link.clone()) {
                summary.duplicates += 1;
                continue;
            }

            summary.accepted += 1;
            accepted.push(job);
        }

        summary
    }
}
