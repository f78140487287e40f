use async_trait::async_trait;
use url::Url;

use super::{crawl_pages, JobCollector, SourceAdapter, SourceContext};
use crate::domain::models::{JobRecord, SourceReport};
use crate::error::Result;
use crate::extractor::{infer_category, normalize_link, ListingLayout, RawListing};

pub const JOBKOREA_BASE_URL: &str = "https://www.jobkorea.co.kr";

const SEARCH_TEXT: &str = "게임 신입";

const LAYOUT: ListingLayout = ListingLayout {
    item: ".list-default .list-post",
    company: ".name",
    title: ".title",
    date: Some(".date"),
};

pub struct JobKoreaSource {
    ctx: SourceContext,
    base_url: Url,
}

impl JobKoreaSource {
    pub fn new(ctx: SourceContext) -> Self {
        Self::with_base_url(ctx, Url::parse(JOBKOREA_BASE_URL).expect("valid base url"))
    }

    pub fn with_base_url(ctx: SourceContext, base_url: Url) -> Self {
        Self { ctx, base_url }
    }

    fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = self.base_url.join("/Search/")?;
        url.query_pairs_mut()
            .append_pair("stext", SEARCH_TEXT)
            .append_pair("careerType", "1")
            .append_pair("tabType", "recruit")
            .append_pair("Page_No", &page.to_string());
        Ok(url)
    }

    fn to_job(&self, listing: RawListing) -> Option<JobRecord> {
        let category = infer_category(&listing.position);
        JobRecord::create(
            listing.company,
            listing.position,
            normalize_link(&listing.link),
            self.ctx.dates.normalize_opt(listing.date_text.as_deref()),
            "신입",
            category,
            &["잡코리아", "게임"],
        )
    }
}

#[async_trait]
impl SourceAdapter for JobKoreaSource {
    fn name(&self) -> &'static str {
        "jobkorea"
    }

    async fn fetch(&self) -> SourceReport {
        let mut collector = JobCollector::new(self.name());
        tracing::info!("[JOBKOREA] Crawling up to {} pages", self.ctx.max_pages);

        crawl_pages(
            &self.ctx,
            &mut collector,
            &LAYOUT,
            encoding_rs::UTF_8,
            &self.base_url,
            |page| self.page_url(page),
            |listing| self.to_job(listing),
        )
        .await;

        collector.finish()
    }
}
