use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{JobCollector, SourceAdapter, SourceContext};
use crate::domain::models::{Category, JobRecord, SourceReport};
use crate::error::Result;
use crate::extractor::category::infer_category_or;
use crate::extractor::normalize_link;
use crate::service::http::fetch_json;

pub const WANTED_BASE_URL: &str = "https://www.wanted.co.kr";

/// Wanted's "game development" tag.
const GAME_DEV_TAG: &str = "518";
const PAGE_LIMIT: &str = "100";

#[derive(Debug, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WantedJob {
    id: u64,
    position: String,
    company: WantedCompany,
    due_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WantedCompany {
    name: String,
}

/// Wanted JSON API, filtered server-side to entry-level game development.
pub struct WantedSource {
    ctx: SourceContext,
    base_url: Url,
}

impl WantedSource {
    pub fn new(ctx: SourceContext) -> Self {
        Self::with_base_url(ctx, Url::parse(WANTED_BASE_URL).expect("valid base url"))
    }

    pub fn with_base_url(ctx: SourceContext, base_url: Url) -> Self {
        Self { ctx, base_url }
    }

    fn jobs_url(&self) -> Result<Url> {
        let mut url = self.base_url.join("/api/v4/jobs")?;
        url.query_pairs_mut()
            .append_pair("country", "kr")
            .append_pair("tag_type_ids", GAME_DEV_TAG)
            .append_pair("years", "0")
            .append_pair("limit", PAGE_LIMIT);
        Ok(url)
    }

    fn to_job(&self, item: WantedJob) -> Result<Option<JobRecord>> {
        let link = self.base_url.join(&format!("/wd/{}", item.id))?;
        // The tag filter already selects development roles
        let category = infer_category_or(&item.position, Category::Programming);

        Ok(JobRecord::create(
            item.company.name,
            item.position,
            normalize_link(link.as_str()),
            self.ctx.dates.normalize_opt(item.due_time.as_deref()),
            "수시",
            category,
            &["원티드", "게임", "신입"],
        ))
    }
}

#[async_trait]
impl SourceAdapter for WantedSource {
    fn name(&self) -> &'static str {
        "wanted"
    }

    async fn fetch(&self) -> SourceReport {
        let mut collector = JobCollector::new(self.name());
        tracing::info!("[WANTED] Fetching job API");

        let url = match self.jobs_url() {
            Ok(url) => url,
            Err(e) => {
                collector.request_failed(&self.base_url, e);
                return collector.finish();
            }
        };

        let response: JobsResponse = match fetch_json(&self.ctx.client, &url).await {
            Ok(response) => response,
            Err(e) => {
                collector.request_failed(&url, e);
                return collector.finish();
            }
        };

        for (index, raw) in response.data.into_iter().enumerate() {
            let item = match serde_json::from_value::<WantedJob>(raw) {
                Ok(item) => item,
                Err(e) => {
                    collector.item_failed(&url, index, e);
                    continue;
                }
            };
            match self.to_job(item) {
                Ok(Some(job)) => {
                    collector.push(job);
                }
                Ok(None) => collector.item_failed(&url, index, "blank company or position"),
                Err(e) => collector.item_failed(&url, index, e),
            }
        }

        tracing::info!("[WANTED] {} jobs parsed", collector.len());
        collector.finish()
    }
}
