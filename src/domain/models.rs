//! Rich domain entities - behavior lives WITH data

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ====== Enums ======

/// Closed set of posting categories. Serialized with the labels the job
/// store already uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "프로그래밍")]
    Programming,
    #[serde(rename = "아트")]
    Art,
    #[serde(rename = "기획")]
    Design,
    #[serde(rename = "마케팅")]
    Marketing,
    #[serde(rename = "기타")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Programming => "프로그래밍",
            Category::Art => "아트",
            Category::Design => "기획",
            Category::Marketing => "마케팅",
            Category::Other => "기타",
        }
    }
}

/// Result of normalizing a free-text deadline.
///
/// `Unknown` means no date could be found in the text. It is never encoded as
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deadline {
    /// Canonical `YYYY-MM-DD` string. Not validated as a calendar date.
    On(String),
    Unknown,
}

impl Deadline {
    pub fn as_date(&self) -> Option<&str> {
        match self {
            Deadline::On(date) => Some(date),
            Deadline::Unknown => None,
        }
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            Deadline::On(date) => Some(date),
            Deadline::Unknown => None,
        }
    }
}

// ====== Job posting ======

/// One normalized job posting. `link` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub company: String,
    pub position: String,
    pub link: String,
    pub deadline: Option<String>,
    pub job_type: String,
    pub category: Category,
    pub tags: BTreeSet<String>,
    pub is_active: bool,
}

impl JobRecord {
    /// Builds an active posting. Empty `company` or `position` is rejected so
    /// every emitted record carries display text.
    pub fn create(
        company: impl Into<String>,
        position: impl Into<String>,
        link: impl Into<String>,
        deadline: Deadline,
        job_type: impl Into<String>,
        category: Category,
        tags: &[&str],
    ) -> Option<Self> {
        let company = company.into().trim().to_string();
        let position = position.into().trim().to_string();
        let link = link.into();
        if company.is_empty() || position.is_empty() || link.is_empty() {
            return None;
        }

        Some(Self {
            company,
            position,
            link,
            deadline: deadline.into_option(),
            job_type: job_type.into(),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_active: true,
        })
    }

    /// Lowercased `company` + `position`, the text the classifiers look at.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.company, self.position).to_lowercase()
    }
}

// ====== Per-source outcomes ======

/// A recovered failure inside one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFailure {
    /// A whole request (API call or page load) produced no data.
    Request { url: String, reason: String },
    /// One listing on an otherwise usable page was skipped.
    Item {
        url: String,
        index: usize,
        reason: String,
    },
}

impl SourceFailure {
    pub fn is_request(&self) -> bool {
        matches!(self, SourceFailure::Request { .. })
    }

    pub fn is_item(&self) -> bool {
        matches!(self, SourceFailure::Item { .. })
    }
}

/// Everything one source contributed to a run.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: &'static str,
    pub jobs: Vec<JobRecord>,
    pub failures: Vec<SourceFailure>,
}

impl SourceReport {
    pub fn new(source: &'static str) -> Self {
        Self {
            source,
            jobs: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn request_failures(&self) -> usize {
        self.failures.iter().filter(|f| f.is_request()).count()
    }

    pub fn item_failures(&self) -> usize {
        self.failures.iter().filter(|f| f.is_item()).count()
    }

    /// True when at least one request of this source failed.
    pub fn is_degraded(&self) -> bool {
        self.request_failures() > 0
    }
}

// ====== Sync outcome ======

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The existing-record read failed and the run assumed an empty store.
    pub existing_read_failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_blank_fields() {
        let job = JobRecord::create(
            "  ",
            "클라이언트 프로그래머",
            "https://example.com/1",
            Deadline::Unknown,
            "신입",
            Category::Programming,
            &["사람인"],
        );
        assert!(job.is_none());
    }

    #[test]
    fn test_create_trims_and_activates() {
        let job = JobRecord::create(
            " 넥슨 ",
            " 서버 개발 ",
            "https://example.com/1",
            Deadline::On("2026-05-21".into()),
            "신입",
            Category::Programming,
            &["게임", "사람인", "게임"],
        )
        .unwrap();

        assert_eq!(job.company, "넥슨");
        assert_eq!(job.position, "서버 개발");
        assert_eq!(job.deadline.as_deref(), Some("2026-05-21"));
        assert!(job.is_active);
        assert_eq!(job.tags.len(), 2);
    }

    #[test]
    fn test_category_label_matches_wire_format() {
        for category in [
            Category::Programming,
            Category::Art,
            Category::Design,
            Category::Marketing,
            Category::Other,
        ] {
            assert_eq!(
                serde_json::to_value(category).unwrap(),
                serde_json::Value::from(category.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_deadline_serializes_as_null() {
        let job = JobRecord::create(
            "Krafton",
            "QA Intern",
            "https://example.com/2",
            Deadline::Unknown,
            "인턴/신입",
            Category::Other,
            &["게임잡"],
        )
        .unwrap();

        let value = serde_json::to_value(&job).unwrap();
        assert!(value["deadline"].is_null());
        assert_eq!(value["category"], "기타");
        assert_eq!(value["is_active"], true);
    }

    #[test]
    fn test_report_distinguishes_failure_kinds() {
        let mut report = SourceReport::new("saramin");
        report.failures.push(SourceFailure::Item {
            url: "https://example.com".into(),
            index: 3,
            reason: "missing company".into(),
        });
        assert!(!report.is_degraded());
        assert_eq!(report.item_failures(), 1);

        report.failures.push(SourceFailure::Request {
            url: "https://example.com".into(),
            reason: "timeout".into(),
        });
        assert!(report.is_degraded());
        assert_eq!(report.request_failures(), 1);
    }
}
