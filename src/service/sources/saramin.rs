use async_trait::async_trait;
use url::Url;

use super::{crawl_pages, JobCollector, SourceAdapter, SourceContext};
use crate::domain::models::{JobRecord, SourceReport};
use crate::error::Result;
use crate::extractor::{infer_category, normalize_link, ListingLayout, RawListing};

pub const SARAMIN_BASE_URL: &str = "https://www.saramin.co.kr";

/// Search words walked in order. Their results overlap heavily, which the
/// per-fetch link tracking absorbs.
pub const SARAMIN_QUERIES: &[&str] = &["게임 신입", "게임 인턴", "게임 개발 신입"];

const LAYOUT: ListingLayout = ListingLayout {
    item: ".item_recruit",
    company: ".corp_name a",
    title: ".job_tit a",
    date: Some(".job_date .date, .date"),
};

/// Saramin recruit search, restricted to the newcomer experience code.
pub struct SaraminSource {
    ctx: SourceContext,
    base_url: Url,
    queries: Vec<String>,
}

impl SaraminSource {
    pub fn new(ctx: SourceContext) -> Self {
        Self::with_base_url(ctx, Url::parse(SARAMIN_BASE_URL).expect("valid base url"))
    }

    pub fn with_base_url(ctx: SourceContext, base_url: Url) -> Self {
        Self {
            ctx,
            base_url,
            queries: SARAMIN_QUERIES.iter().map(|q| q.to_string()).collect(),
        }
    }

    pub fn with_queries(mut self, queries: &[&str]) -> Self {
        self.queries = queries.iter().map(|q| q.to_string()).collect();
        self
    }

    fn page_url(&self, query: &str, page: u32) -> Result<Url> {
        let mut url = self.base_url.join("/zf_user/search/recruit")?;
        url.query_pairs_mut()
            .append_pair("searchword", query)
            .append_pair("exp_cd", "1")
            .append_pair("recruitPage", &page.to_string());
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
            &["사람인", "게임"],
        )
    }
}

#[async_trait]
impl SourceAdapter for SaraminSource {
    fn name(&self) -> &'static str {
        "saramin"
    }

    async fn fetch(&self) -> SourceReport {
        let mut collector = JobCollector::new(self.name());

        for query in &self.queries {
            tracing::info!("[SARAMIN] Searching {:?} (up to {} pages)", query, self.ctx.max_pages);
            crawl_pages(
                &self.ctx,
                &mut collector,
                &LAYOUT,
                encoding_rs::UTF_8,
                &self.base_url,
                |page| self.page_url(query, page),
                |listing| self.to_job(listing),
            )
            .await;
        }

        collector.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::DateNormalizer;
    use crate::service::http::{create_client, ClientType, DEFAULT_TIMEOUT};
    use mockito::Matcher;

    fn row(company: &str, title: &str, rec_idx: u32, date: &str) -> String {
        format!(
            r#"<div class="item_recruit">
                <div class="area_corp"><strong class="corp_name"><a href="/c">{company}</a></strong></div>
                <div class="area_job">
                    <h2 class="job_tit"><a href="/zf_user/jobs/relay/view?view_type=search&rec_idx={rec_idx}">{title}</a></h2>
                    <div class="job_date"><span class="date">{date}</span></div>
                </div>
            </div>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!("<html><body><div id=\"recruit_info_list\">{}</div></body></html>", rows.join(""))
    }

    fn source(server: &mockito::Server, max_pages: u32) -> SaraminSource {
        let client = create_client(ClientType::Browser, DEFAULT_TIMEOUT).unwrap();
        let ctx = SourceContext::new(client, DateNormalizer::new(2026)).with_max_pages(max_pages);
        SaraminSource::with_base_url(ctx, Url::parse(&server.url()).unwrap())
    }

    fn query(word: &str, page: u32) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("searchword".into(), word.into()),
            Matcher::UrlEncoded("recruitPage".into(), page.to_string()),
        ])
    }

    #[tokio::test]
    async fn test_stops_query_at_empty_page_and_dedups_across_queries() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 신입", 1))
            .with_status(200)
            .with_body(page(&[
                row("넥슨", "클라이언트 프로그래머 신입", 1, "~ 05/21(목)"),
                row("넷마블", "게임 기획 신입", 2, "상시채용"),
            ]))
            .create_async()
            .await;
        let end = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 신입", 2))
            .with_status(200)
            .with_body(page(&[]))
            .create_async()
            .await;
        let never = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 신입", 3))
            .expect(0)
            .create_async()
            .await;
        let other_query = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 인턴", 1))
            .with_status(200)
            .with_body(page(&[
                row("넥슨", "클라이언트 프로그래머 신입", 1, "~ 05/21(목)"),
                row("크래프톤", "3D 아트 인턴", 3, "~ 06/01(월)"),
            ]))
            .create_async()
            .await;
        let other_end = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 인턴", 2))
            .with_status(200)
            .with_body(page(&[]))
            .create_async()
            .await;

        let report = source(&server, 3)
            .with_queries(&["게임 신입", "게임 인턴"])
            .fetch()
            .await;

        first.assert_async().await;
        end.assert_async().await;
        never.assert_async().await;
        other_query.assert_async().await;
        other_end.assert_async().await;

        let companies: Vec<_> = report.jobs.iter().map(|j| j.company.as_str()).collect();
        assert_eq!(companies, vec!["넥슨", "넷마블", "크래프톤"]);
        assert!(report.failures.is_empty());
        assert_eq!(report.jobs[0].deadline.as_deref(), Some("2026-05-21"));
        assert_eq!(report.jobs[1].deadline, None);
        assert_eq!(report.jobs[0].job_type, "신입");
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped_not_fatal() {
        let mut server = mockito::Server::new_async().await;
        let _broken = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 신입", 1))
            .with_status(500)
            .create_async()
            .await;
        let _ok = server
            .mock("GET", "/zf_user/search/recruit")
            .match_query(query("게임 신입", 2))
            .with_status(200)
            .with_body(page(&[row("펄어비스", "서버 프로그래머", 9, "~ 12/01(화)")]))
            .create_async()
            .await;

        let report = source(&server, 2)
            .with_queries(&["게임 신입"])
            .fetch()
            .await;

        assert_eq!(report.jobs.len(), 1);
        assert_eq!(report.jobs[0].company, "펄어비스");
        assert_eq!(report.request_failures(), 1);
    }

    #[test]
    fn test_page_url_encodes_query() {
        let client = create_client(ClientType::Browser, DEFAULT_TIMEOUT).unwrap();
        let ctx = SourceContext::new(client, DateNormalizer::new(2026));
        let url = SaraminSource::new(ctx).page_url("게임 신입", 2).unwrap();

        assert_eq!(url.host_str(), Some("www.saramin.co.kr"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("searchword".into(), "게임 신입".into())));
        assert!(pairs.contains(&("recruitPage".into(), "2".into())));
        assert!(pairs.contains(&("exp_cd".into(), "1".into())));
    }
}
