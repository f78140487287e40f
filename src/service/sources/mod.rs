//! Job sources.
//!
//! Four sources are wired in:
//! - **Wanted**: JSON API, one request
//! - **Saramin**: HTML search, several queries x a few pages
//! - **Gamejob**: HTML search, EUC-KR encoded
//! - **JobKorea**: HTML search
//!
//! All implement the `SourceAdapter` trait. A source never returns an error:
//! failures end up in its `SourceReport` next to whatever it collected.

mod gamejob;
mod jobkorea;
mod saramin;
mod wanted;

pub use gamejob::GamejobSource;
pub use jobkorea::JobKoreaSource;
pub use saramin::SaraminSource;
pub use wanted::WantedSource;

use async_trait::async_trait;
use encoding_rs::Encoding;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

use crate::domain::models::{JobRecord, SourceFailure, SourceReport};
use crate::error::Result;
use crate::extractor::{extract_listings, DateNormalizer, ListingLayout, RawListing};
use crate::service::http::fetch_text;

/// One external job listing provider.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable name, also used in summaries.
    fn name(&self) -> &'static str;

    /// Collect this source's postings, deduplicated by link.
    async fn fetch(&self) -> SourceReport;
}

/// Shared configuration handed to every source.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub client: Client,
    pub dates: DateNormalizer,
    /// Upper bound of the page range walked per query.
    pub max_pages: u32,
}

impl SourceContext {
    pub const DEFAULT_MAX_PAGES: u32 = 3;

    pub fn new(client: Client, dates: DateNormalizer) -> Self {
        Self {
            client,
            dates,
            max_pages: Self::DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// The four production sources, in invocation order.
pub fn default_sources(ctx: &SourceContext) -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(WantedSource::new(ctx.clone())),
        Box::new(SaraminSource::new(ctx.clone())),
        Box::new(GamejobSource::new(ctx.clone())),
        Box::new(JobKoreaSource::new(ctx.clone())),
    ]
}

/// Accumulates one fetch call's results. Tracks links so a posting seen on
/// two pages (or two queries) is kept once.
pub(crate) struct JobCollector {
    report: SourceReport,
    seen: HashSet<String>,
}

impl JobCollector {
    pub(crate) fn new(source: &'static str) -> Self {
        Self {
            report: SourceReport::new(source),
            seen: HashSet::new(),
        }
    }

    /// Returns false when the link was already collected.
    pub(crate) fn push(&mut self, job: JobRecord) -> bool {
        if !self.seen.insert(job.link.clone()) {
            tracing::trace!("[{}] Duplicate link within source: {}", self.report.source, job.link);
            return false;
        }
        self.report.jobs.push(job);
        true
    }

    pub(crate) fn request_failed(&mut self, url: &Url, reason: impl ToString) {
        let reason = reason.to_string();
        tracing::warn!("[{}] Request failed for {}: {}", self.report.source, url, reason);
        self.report.failures.push(SourceFailure::Request {
            url: url.to_string(),
            reason,
        });
    }

    pub(crate) fn item_failed(&mut self, url: &Url, index: usize, reason: impl ToString) {
        let reason = reason.to_string();
        tracing::debug!(
            "[{}] Skipping item {} on {}: {}",
            self.report.source,
            index,
            url,
            reason
        );
        self.report.failures.push(SourceFailure::Item {
            url: url.to_string(),
            index,
            reason,
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.report.jobs.len()
    }

    pub(crate) fn finish(self) -> SourceReport {
        tracing::info!(
            "[{}] Collected {} jobs ({} failures)",
            self.report.source,
            self.report.jobs.len(),
            self.report.failures.len()
        );
        self.report
    }
}

/// Walks pages `1..=max_pages` of one HTML search.
///
/// Stops at the first page without result rows. A page that cannot be
/// fetched contributes nothing and the walk moves on to the next page; a
/// layout that cannot be applied at all ends the walk.
pub(crate) async fn crawl_pages<P, M>(
    ctx: &SourceContext,
    collector: &mut JobCollector,
    layout: &ListingLayout,
    encoding: &'static Encoding,
    base: &Url,
    page_url: P,
    mut to_job: M,
) where
    P: Fn(u32) -> Result<Url> + Send + Sync,
    M: FnMut(RawListing) -> Option<JobRecord> + Send,
{
    for page in 1..=ctx.max_pages {
        let url = match page_url(page) {
            Ok(url) => url,
            Err(e) => {
                collector.request_failed(base, e);
                return;
            }
        };

        let html = match fetch_text(&ctx.client, &url, encoding).await {
            Ok(html) => html,
            Err(e) => {
                collector.request_failed(&url, e);
                continue;
            }
        };

        let parsed = match extract_listings(&html, layout, base) {
            Ok(parsed) => parsed,
            Err(e) => {
                collector.request_failed(&url, e);
                return;
            }
        };

        if parsed.is_end_of_results() {
            tracing::debug!("[{}] No results on page {}, stopping", collector.report.source, page);
            return;
        }

        tracing::info!(
            "[{}] Page {}: {} rows ({} unusable)",
            collector.report.source,
            page,
            parsed.items_seen(),
            parsed.skipped.len()
        );

        for (index, reason) in parsed.skipped {
            collector.item_failed(&url, index, reason);
        }
        for listing in parsed.listings {
            let row = listing.row;
            match to_job(listing) {
                Some(job) => {
                    collector.push(job);
                }
                None => collector.item_failed(&url, row, "incomplete listing"),
            }
        }
    }
}
