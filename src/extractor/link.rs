use regex::Regex;
use std::sync::OnceLock;

const SARAMIN_VIEW_URL: &str =
    "https://www.saramin.co.kr/zf_user/jobs/relay/view?view_type=search&rec_idx=";

/// Canonical form of a posting link, used as the identity key.
///
/// Trims whitespace and one trailing `/`. Saramin links are reduced to their
/// `rec_idx`, which is the only stable part across search result pages.
pub fn normalize_link(link: &str) -> String {
    static REC_IDX: OnceLock<Regex> = OnceLock::new();
    let rec_idx = REC_IDX.get_or_init(|| Regex::new(r"rec_idx=(\d+)").unwrap());

    let mut url = link.trim();
    if let Some(stripped) = url.strip_suffix('/') {
        url = stripped;
    }

    if url.contains("saramin.co.kr") {
        if let Some(caps) = rec_idx.captures(url) {
            return format!("{}{}", SARAMIN_VIEW_URL, &caps[1]);
        }
    }

    url.to_string()
}
