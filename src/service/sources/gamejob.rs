use async_trait::async_trait;
use url::form_urlencoded::byte_serialize;
use url::Url;

use super::{crawl_pages, JobCollector, SourceAdapter, SourceContext};
use crate::domain::models::{JobRecord, SourceReport};
use crate::error::Result;
use crate::extractor::{infer_category, normalize_link, ListingLayout, RawListing};

pub const GAMEJOB_BASE_URL: &str = "https://www.gamejob.co.kr";

const SEARCH_WORD: &str = "신입";

const LAYOUT: ListingLayout = ListingLayout {
    item: ".list tr[class^=\"row\"]",
    company: ".col-company a",
    title: ".col-subject a",
    date: Some(".col-date"),
};

/// Gamejob listing search. The site only speaks EUC-KR, both in its query
/// string and in the pages it serves.
pub struct GamejobSource {
    ctx: SourceContext,
    base_url: Url,
}

impl GamejobSource {
    pub fn new(ctx: SourceContext) -> Self {
        Self::with_base_url(ctx, Url::parse(GAMEJOB_BASE_URL).expect("valid base url"))
    }

    pub fn with_base_url(ctx: SourceContext, base_url: Url) -> Self {
        Self { ctx, base_url }
    }

    /// `SEARCH_WORD` percent-encoded as EUC-KR bytes.
    fn encoded_search_word() -> String {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode(SEARCH_WORD);
        byte_serialize(&bytes).collect()
    }

    fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = self.base_url.join("/List_GI/GIB_List.asp")?;
        url.set_query(Some(&format!(
            "Part_No=0&Search_Word={}&GI_Page={}",
            Self::encoded_search_word(),
            page
        )));
        Ok(url)
    }

    fn to_job(&self, listing: RawListing) -> Option<JobRecord> {
        let category = infer_category(&listing.position);
        JobRecord::create(
            listing.company,
            listing.position,
            normalize_link(&listing.link),
            self.ctx.dates.normalize_opt(listing.date_text.as_deref()),
            "인턴/신입",
            category,
            &["게임잡"],
        )
    }
}

#[async_trait]
impl SourceAdapter for GamejobSource {
    fn name(&self) -> &'static str {
        "gamejob"
    }

    async fn fetch(&self) -> SourceReport {
        let mut collector = JobCollector::new(self.name());
        tracing::info!("[GAMEJOB] Crawling up to {} pages", self.ctx.max_pages);

        crawl_pages(
            &self.ctx,
            &mut collector,
            &LAYOUT,
            encoding_rs::EUC_KR,
            &self.base_url,
            |page| self.page_url(page),
            |listing| self.to_job(listing),
        )
        .await;

        collector.finish()
    }
}
